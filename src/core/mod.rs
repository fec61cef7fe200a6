//! Core functionality for the chat shim.
//!
//! This module contains fundamental components used throughout the application:
//! - Configuration management
//! - Error handling
//! - Request-scoped logging context
//! - The advertised model registry
//! - Token-usage estimation
//! - Stream cancellation handles

pub mod cancel;
pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
pub mod tokens;

// Re-export commonly used types
pub use cancel::StreamCancelHandle;
pub use config::{AppConfig, ServerConfig};
pub use error::{AppError, Result};
pub use logging::{generate_request_id, get_request_id, REQUEST_ID};
pub use registry::ModelRegistry;
