//! Backend capability: the external service that actually produces replies.
//!
//! The shim treats the backend as a black box with a single operation:
//! hand it the conversation, get back one text reply. Alternate backends can
//! be swapped in by implementing [`Backend`] without touching the validator,
//! transformer, or handlers.

pub mod http;

use crate::api::models::Message;
use futures::future::BoxFuture;
use thiserror::Error;

pub use http::HttpBackend;

/// Failures a backend call can produce.
///
/// Both variants are server-side faults (HTTP 500); neither is retried here.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection, DNS, or timeout failure reaching the backend
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// The backend answered, but its reply could not be parsed into text
    #[error("backend returned a malformed reply: {0}")]
    MalformedReply(String),
}

/// A reply generator reachable over some transport.
///
/// Implementations must preserve conversation order when serializing
/// `messages` for the wire.
pub trait Backend: Send + Sync {
    /// Issue one generate call for the given conversation and await one text reply.
    fn generate<'a>(
        &'a self,
        messages: &'a [Message],
    ) -> BoxFuture<'a, Result<String, BackendError>>;
}
