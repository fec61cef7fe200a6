//! Deterministic token-usage estimation.
//!
//! The shim never runs a real tokenizer; usage numbers only need to be stable
//! and reproducible for a given input. Tokens are counted as whitespace-separated
//! words, which is the same granularity the stream chunker uses.

use crate::api::models::Message;

/// Count estimated tokens in a piece of text.
pub fn count_tokens(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

/// Count estimated prompt tokens across all messages of a conversation.
///
/// Counts content words plus one token per message for the role marker.
pub fn count_message_tokens(messages: &[Message]) -> u32 {
    messages
        .iter()
        .map(|m| count_tokens(&m.content) + 1)
        .sum()
}
