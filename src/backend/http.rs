//! HTTP backend adapter.
//!
//! Posts the conversation as JSON to the configured generate endpoint and
//! expects a JSON object with a string `reply` field back. The shim owns both
//! sides of this wire contract.

use crate::api::models::Message;
use crate::backend::{Backend, BackendError};
use futures::future::BoxFuture;
use serde::Deserialize;

/// Shape of the backend's reply body.
#[derive(Debug, Deserialize)]
struct GenerateReply {
    reply: String,
}

/// Backend reachable via a single HTTP POST per call.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    url: String,
}

impl HttpBackend {
    /// Create an adapter for the given generate endpoint.
    ///
    /// The client is expected to carry the per-call timeout (see
    /// `create_http_client` in `main`); exceeding it surfaces as
    /// [`BackendError::Unreachable`].
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

impl Backend for HttpBackend {
    fn generate<'a>(
        &'a self,
        messages: &'a [Message],
    ) -> BoxFuture<'a, Result<String, BackendError>> {
        Box::pin(async move {
            let response = self
                .client
                .post(&self.url)
                .json(&serde_json::json!({ "messages": messages }))
                .send()
                .await
                .map_err(|e| {
                    tracing::warn!(
                        url = %self.url,
                        error = %e,
                        is_timeout = e.is_timeout(),
                        is_connect = e.is_connect(),
                        "Backend request failed"
                    );
                    BackendError::Unreachable(e.to_string())
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(BackendError::MalformedReply(format!(
                    "unexpected HTTP status {}",
                    status
                )));
            }

            let body: GenerateReply = response.json().await.map_err(|e| {
                if e.is_timeout() {
                    BackendError::Unreachable(e.to_string())
                } else {
                    BackendError::MalformedReply(e.to_string())
                }
            })?;

            Ok(body.reply)
        })
    }
}
