//! HTTP request handlers for the chat shim.
//!
//! The chat-completion handler is the request orchestrator: it validates the
//! payload, calls the backend, transforms the reply, and emits either a JSON
//! response or a simulated stream. Validation failures are rejected before
//! any backend I/O.

use crate::api::models::ModelList;
use crate::api::streaming::create_sse_response;
use crate::api::transform::build_completion;
use crate::api::validate::validate_chat_request;
use crate::backend::Backend;
use crate::core::logging::{generate_request_id, REQUEST_ID};
use crate::core::{AppConfig, AppError, ModelRegistry, Result};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// Shared application state.
///
/// Everything here is read-only after startup; concurrent requests share it
/// without synchronization.
pub struct AppState {
    pub config: AppConfig,
    pub registry: ModelRegistry,
    pub backend: Arc<dyn Backend>,
}

/// Handle chat completion requests.
///
/// Supports both streaming and non-streaming responses.
#[tracing::instrument(skip(state, payload))]
pub async fn chat_completions(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Response> {
    let request_id = generate_request_id();

    REQUEST_ID
        .scope(request_id.clone(), async move {
            // Fail fast: no backend I/O for contract violations
            let request = validate_chat_request(&payload).map_err(|e| {
                tracing::info!(
                    request_id = %request_id,
                    field = %e.field,
                    "Rejected invalid chat completion request"
                );
                AppError::from(e)
            })?;

            tracing::debug!(
                request_id = %request_id,
                model = %request.model,
                messages = request.messages.len(),
                stream = request.stream,
                "Processing chat completion request"
            );

            let reply = state.backend.generate(&request.messages).await?;
            let completion = build_completion(&request, reply);

            tracing::debug!(
                request_id = %request_id,
                completion_id = %completion.id,
                completion_tokens = completion.usage.completion_tokens,
                "Backend reply transformed"
            );

            if request.stream {
                Ok(create_sse_response(
                    completion,
                    state.config.stream_chunk_delay_ms,
                ))
            } else {
                Ok(Json(completion).into_response())
            }
        })
        .await
}

/// List advertised models.
///
/// The registry is fixed at startup, so repeated calls return identical content.
#[tracing::instrument(skip(state))]
pub async fn list_models(State(state): State<Arc<AppState>>) -> Json<ModelList> {
    Json(ModelList {
        object: "list".to_string(),
        data: state.registry.list().to_vec(),
    })
}

/// Basic health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok"
    }))
}
