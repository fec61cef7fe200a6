//! API layer for the chat shim.
//!
//! This module contains the HTTP handlers, the contract request/response
//! models, schema validation, response transformation, and streaming support.

pub mod disconnect;
pub mod handlers;
pub mod models;
pub mod streaming;
pub mod transform;
pub mod validate;

// Re-export commonly used types
pub use handlers::{chat_completions, health, list_models, AppState};
pub use models::{ChatCompletionRequest, ChatCompletionResponse, Message, ModelList, Role};
pub use streaming::{chunk_completion, create_sse_response};
pub use validate::{validate_chat_request, SchemaError};
