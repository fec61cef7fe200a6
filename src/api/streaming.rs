//! Streaming simulation for chat completions.
//!
//! The backend returns one complete reply; this module re-chunks it into an
//! ordered sequence of Server-Sent Event frames that imitates token-by-token
//! streaming.
//!
//! Chunking policy: the assistant content is split with
//! `split_inclusive(char::is_whitespace)`, so every fragment keeps its trailing
//! whitespace and concatenating all fragments reproduces the content
//! byte-for-byte. The first content chunk also carries `delta.role`; the
//! terminal chunk has an empty delta and `finish_reason = "stop"`, followed by
//! the literal `data: [DONE]` sentinel frame.

use crate::api::disconnect::DisconnectStream;
use crate::api::models::{
    ChatCompletionResponse, Delta, FinishReason, Role, StreamChoice, StreamChunk,
};
use crate::core::cancel::StreamCancelHandle;
use axum::body::Body;
use axum::response::Response;
use bytes::Bytes;
use std::convert::Infallible;

/// End-of-stream sentinel frame.
pub const DONE_FRAME: &str = "data: [DONE]\n\n";

/// Split assistant content into ordered fragments.
///
/// Fragments keep their trailing whitespace so concatenation is lossless.
pub fn split_content(content: &str) -> Vec<String> {
    content
        .split_inclusive(char::is_whitespace)
        .map(str::to_string)
        .collect()
}

/// Re-chunk a completion into the ordered, finite chunk sequence.
///
/// The last element is always the terminal chunk (empty delta, `stop`); for
/// empty content it is the only element. All chunks share the completion's
/// id, timestamp, and model.
pub fn chunk_completion(response: &ChatCompletionResponse) -> Vec<StreamChunk> {
    let content = response
        .choices
        .first()
        .map(|c| c.message.content.as_str())
        .unwrap_or_default();

    let fragments = split_content(content);
    let mut chunks = Vec::with_capacity(fragments.len() + 1);

    for (i, fragment) in fragments.into_iter().enumerate() {
        chunks.push(StreamChunk {
            id: response.id.clone(),
            object: "chat.completion.chunk".to_string(),
            created: response.created,
            model: response.model.clone(),
            choices: vec![StreamChoice {
                index: 0,
                delta: Delta {
                    role: (i == 0).then_some(Role::Assistant),
                    content: Some(fragment),
                },
                finish_reason: None,
            }],
        });
    }

    chunks.push(StreamChunk {
        id: response.id.clone(),
        object: "chat.completion.chunk".to_string(),
        created: response.created,
        model: response.model.clone(),
        choices: vec![StreamChoice {
            index: 0,
            delta: Delta::default(),
            finish_reason: Some(FinishReason::Stop),
        }],
    });

    chunks
}

/// Encode one chunk as an SSE data frame.
fn sse_frame(chunk: &StreamChunk) -> Result<Bytes, serde_json::Error> {
    let json = serde_json::to_string(chunk)?;
    Ok(Bytes::from(format!("data: {}\n\n", json)))
}

/// Build the streaming HTTP response for a completion.
///
/// Chunks are emitted strictly in order on a lazy stream; production stops
/// promptly if the client disconnects (the body drop cancels the handle).
/// `delay_ms` adds simulated pacing between content chunks.
pub fn create_sse_response(completion: ChatCompletionResponse, delay_ms: u64) -> Response {
    let cancel_handle = StreamCancelHandle::new();
    let producer_handle = cancel_handle.clone();
    let chunks = chunk_completion(&completion);

    let stream = async_stream::stream! {
        for (i, chunk) in chunks.into_iter().enumerate() {
            if producer_handle.is_cancelled() {
                tracing::debug!("Client disconnected mid-stream; stopping chunk emission");
                return;
            }

            if i > 0 && delay_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
            }

            match sse_frame(&chunk) {
                Ok(frame) => yield Ok::<Bytes, Infallible>(frame),
                Err(e) => {
                    // Terminate the stream cleanly rather than hang the client
                    tracing::error!(error = %e, "Failed to encode stream chunk");
                    return;
                }
            }
        }

        yield Ok(Bytes::from(DONE_FRAME));
        producer_handle.mark_completed();
    };

    let body = Body::from_stream(DisconnectStream {
        stream: Box::pin(stream),
        cancel_handle,
    });

    Response::builder()
        .status(200)
        .header("Content-Type", "text/event-stream")
        .header("Cache-Control", "no-cache")
        .header("Connection", "keep-alive")
        .body(body)
        .unwrap()
}
