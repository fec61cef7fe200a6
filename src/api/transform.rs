//! Response transformation: backend reply -> contract-shaped completion.
//!
//! Given the validated request and the backend's raw text reply, builds a
//! `ChatCompletionResponse` with a fresh id, a construction-time timestamp,
//! the echoed model name, and estimated token usage. Infallible.

use crate::api::models::{
    ChatCompletionRequest, ChatCompletionResponse, Choice, FinishReason, Message, Role, Usage,
};
use crate::core::tokens::{count_message_tokens, count_tokens};

/// Generate a fresh per-call completion id.
pub fn generate_completion_id() -> String {
    format!("chatcmpl-{}", uuid::Uuid::new_v4().simple())
}

/// Build a contract-shaped completion from the original request and the
/// backend's reply text.
///
/// The backend never signals truncation, so `finish_reason` is always `stop`.
pub fn build_completion(request: &ChatCompletionRequest, reply: String) -> ChatCompletionResponse {
    let prompt_tokens = count_message_tokens(&request.messages);
    let completion_tokens = count_tokens(&reply);

    ChatCompletionResponse {
        id: generate_completion_id(),
        object: "chat.completion".to_string(),
        created: chrono::Utc::now().timestamp(),
        model: request.model.clone(),
        choices: vec![Choice {
            index: 0,
            message: Message {
                role: Role::Assistant,
                content: reply,
            },
            finish_reason: Some(FinishReason::Stop),
        }],
        usage: Usage {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        },
    }
}
