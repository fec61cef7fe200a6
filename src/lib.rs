//! Chat Shim - An OpenAI-compatible front for an arbitrary text backend
//!
//! This library exposes an HTTP interface that is bit-compatible with the
//! OpenAI chat-completion contract while delegating reply generation to an
//! external HTTP backend:
//!
//! - **Schema Validation**: Inbound payloads are checked against the contract
//!   before any backend I/O, with errors naming the offending field
//! - **Backend Adapter**: A swappable [`backend::Backend`] capability issues one
//!   call per request to the external generate endpoint
//! - **Response Transformation**: Backend replies become contract-shaped
//!   completions with synthesized ids, timestamps, and token-usage estimates
//! - **Streaming Simulation**: A complete reply is re-chunked into ordered SSE
//!   delta frames terminated by `[DONE]`
//!
//! # Architecture
//!
//! The codebase is organized into three main layers:
//!
//! - [`core`]: Core functionality (config, errors, registry, token estimation)
//! - [`api`]: HTTP handlers, contract models, validation, and streaming
//! - [`backend`]: The external backend capability and its HTTP implementation
//!
//! # Configuration
//!
//! The server requires the following environment variable:
//! - `BACKEND_URL`: URL of the external backend's generate endpoint
//!
//! Optional environment variables:
//! - `HOST`: Server bind address (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8000)
//! - `BACKEND_TIMEOUT_SECS`: Per-call backend timeout (default: 30)
//! - `MODELS`: Comma-separated advertised model ids (default: mock-gpt-model)
//! - `STREAM_CHUNK_DELAY_MS`: Pacing between streamed chunks (default: 0)

pub mod api;
pub mod backend;
pub mod core;

// Re-export commonly used types for convenience
pub use api::{chat_completions, list_models, AppState, ChatCompletionRequest, ChatCompletionResponse};
pub use backend::{Backend, BackendError, HttpBackend};
pub use core::{AppConfig, AppError, ModelRegistry, Result};
