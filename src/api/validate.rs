//! Schema validation for inbound chat-completion payloads.
//!
//! Validation runs over the raw JSON body so the error response can name the
//! offending field instead of surfacing a generic deserialization failure.
//! It happens before any backend I/O.

use crate::api::models::{default_temperature, ChatCompletionRequest, Message, Role};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// A contract violation in the inbound payload.
///
/// Identifies the offending field and the expected type. Surfaced to the
/// client as HTTP 422; never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid value for field '{field}': expected {expected}")]
pub struct SchemaError {
    pub field: String,
    pub expected: String,
}

impl SchemaError {
    fn new(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
        }
    }
}

/// Fields consumed into typed request fields; everything else round-trips
/// through `extra`.
const KNOWN_FIELDS: &[&str] = &["model", "messages", "temperature", "stream", "max_tokens"];

/// Validate a raw payload against the chat-completion contract.
///
/// Applies defaults (`temperature` 1.0, `stream` false) and normalizes
/// multimodal `content` arrays into plain text before checking.
pub fn validate_chat_request(payload: &Value) -> Result<ChatCompletionRequest, SchemaError> {
    let body = payload
        .as_object()
        .ok_or_else(|| SchemaError::new("body", "JSON object"))?;

    let model = match body.get("model") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::String(_)) => return Err(SchemaError::new("model", "non-empty string")),
        Some(_) => return Err(SchemaError::new("model", "string")),
        None => return Err(SchemaError::new("model", "string (required)")),
    };

    let raw_messages = match body.get("messages") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        Some(Value::Array(_)) => return Err(SchemaError::new("messages", "non-empty array")),
        Some(_) => return Err(SchemaError::new("messages", "array")),
        None => return Err(SchemaError::new("messages", "array (required)")),
    };

    let mut messages = Vec::with_capacity(raw_messages.len());
    for (i, item) in raw_messages.iter().enumerate() {
        messages.push(validate_message(item, i)?);
    }

    let temperature = match body.get("temperature") {
        Some(value) => match value.as_f64() {
            Some(t) if (0.0..=2.0).contains(&t) => t as f32,
            _ => return Err(SchemaError::new("temperature", "number between 0 and 2")),
        },
        None => default_temperature(),
    };

    let stream = match body.get("stream") {
        Some(Value::Bool(b)) => *b,
        Some(_) => return Err(SchemaError::new("stream", "boolean")),
        None => false,
    };

    let max_tokens = match body.get("max_tokens") {
        Some(value) => match value.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(n) => Some(n),
            None => return Err(SchemaError::new("max_tokens", "non-negative integer")),
        },
        None => None,
    };

    // Type-check the remaining well-known sampling parameters; anything else
    // passes through untouched.
    if let Some(value) = body.get("top_p") {
        if !value.is_number() {
            return Err(SchemaError::new("top_p", "number"));
        }
    }
    if let Some(value) = body.get("n") {
        match value.as_u64() {
            Some(n) if n >= 1 => {}
            _ => return Err(SchemaError::new("n", "positive integer")),
        }
    }

    let extra: HashMap<String, Value> = body
        .iter()
        .filter(|(key, _)| !KNOWN_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(ChatCompletionRequest {
        model,
        messages,
        temperature,
        stream,
        max_tokens,
        extra,
    })
}

fn validate_message(item: &Value, index: usize) -> Result<Message, SchemaError> {
    let obj = item
        .as_object()
        .ok_or_else(|| SchemaError::new(format!("messages[{index}]"), "object"))?;

    let role = match obj.get("role") {
        Some(Value::String(s)) => match s.as_str() {
            "system" => Role::System,
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => {
                return Err(SchemaError::new(
                    format!("messages[{index}].role"),
                    "one of 'system', 'user', 'assistant'",
                ))
            }
        },
        _ => {
            return Err(SchemaError::new(
                format!("messages[{index}].role"),
                "string (required)",
            ))
        }
    };

    let content = match obj.get("content") {
        Some(Value::String(s)) => s.clone(),
        // Multimodal clients send content as an array of typed parts;
        // flatten the text parts so the backend sees plain text.
        Some(Value::Array(parts)) => flatten_content_parts(parts),
        _ => {
            return Err(SchemaError::new(
                format!("messages[{index}].content"),
                "string",
            ))
        }
    };

    Ok(Message { role, content })
}

fn flatten_content_parts(parts: &[Value]) -> String {
    parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_valid_request() {
        let payload = json!({
            "model": "mock-gpt-model",
            "messages": [{"role": "user", "content": "hi"}]
        });

        let request = validate_chat_request(&payload).unwrap();
        assert_eq!(request.model, "mock-gpt-model");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, Role::User);
        assert_eq!(request.temperature, 1.0);
        assert!(!request.stream);
    }

    #[test]
    fn test_missing_model_fails() {
        let payload = json!({"messages": [{"role": "user", "content": "hi"}]});
        let err = validate_chat_request(&payload).unwrap_err();
        assert_eq!(err.field, "model");
    }

    #[test]
    fn test_empty_model_fails() {
        let payload = json!({"model": "", "messages": [{"role": "user", "content": "hi"}]});
        let err = validate_chat_request(&payload).unwrap_err();
        assert_eq!(err.field, "model");
        assert_eq!(err.expected, "non-empty string");
    }

    #[test]
    fn test_empty_messages_fails() {
        let payload = json!({"model": "m", "messages": []});
        let err = validate_chat_request(&payload).unwrap_err();
        assert_eq!(err.field, "messages");
        assert_eq!(err.expected, "non-empty array");
    }

    #[test]
    fn test_missing_messages_fails() {
        let payload = json!({"model": "m"});
        let err = validate_chat_request(&payload).unwrap_err();
        assert_eq!(err.field, "messages");
    }

    #[test]
    fn test_unknown_role_fails() {
        let payload = json!({
            "model": "m",
            "messages": [{"role": "robot", "content": "hi"}]
        });
        let err = validate_chat_request(&payload).unwrap_err();
        assert_eq!(err.field, "messages[0].role");
    }

    #[test]
    fn test_missing_content_fails() {
        let payload = json!({"model": "m", "messages": [{"role": "user"}]});
        let err = validate_chat_request(&payload).unwrap_err();
        assert_eq!(err.field, "messages[0].content");
    }

    #[test]
    fn test_empty_content_is_allowed() {
        let payload = json!({
            "model": "m",
            "messages": [{"role": "user", "content": ""}]
        });
        let request = validate_chat_request(&payload).unwrap();
        assert_eq!(request.messages[0].content, "");
    }

    #[test]
    fn test_message_order_preserved() {
        let payload = json!({
            "model": "m",
            "messages": [
                {"role": "system", "content": "first"},
                {"role": "user", "content": "second"},
                {"role": "assistant", "content": "third"},
                {"role": "user", "content": "fourth"}
            ]
        });

        let request = validate_chat_request(&payload).unwrap();
        let contents: Vec<&str> = request
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["first", "second", "third", "fourth"]);
    }

    #[test]
    fn test_multimodal_content_is_flattened() {
        let payload = json!({
            "model": "m",
            "messages": [{
                "role": "user",
                "content": [
                    {"type": "text", "text": "describe"},
                    {"type": "image_url", "image_url": {"url": "https://example.com/cat.png"}},
                    {"type": "text", "text": "this image"}
                ]
            }]
        });

        let request = validate_chat_request(&payload).unwrap();
        assert_eq!(request.messages[0].content, "describe this image");
    }

    #[test]
    fn test_non_string_content_fails() {
        let payload = json!({
            "model": "m",
            "messages": [{"role": "user", "content": 42}]
        });
        let err = validate_chat_request(&payload).unwrap_err();
        assert_eq!(err.field, "messages[0].content");
    }

    #[test]
    fn test_temperature_type_checked() {
        let payload = json!({
            "model": "m",
            "messages": [{"role": "user", "content": "hi"}],
            "temperature": "hot"
        });
        let err = validate_chat_request(&payload).unwrap_err();
        assert_eq!(err.field, "temperature");
    }

    #[test]
    fn test_temperature_out_of_range_fails() {
        let payload = json!({
            "model": "m",
            "messages": [{"role": "user", "content": "hi"}],
            "temperature": 3.5
        });
        let err = validate_chat_request(&payload).unwrap_err();
        assert_eq!(err.field, "temperature");
    }

    #[test]
    fn test_stream_type_checked() {
        let payload = json!({
            "model": "m",
            "messages": [{"role": "user", "content": "hi"}],
            "stream": "yes"
        });
        let err = validate_chat_request(&payload).unwrap_err();
        assert_eq!(err.field, "stream");
    }

    #[test]
    fn test_stream_true_accepted() {
        let payload = json!({
            "model": "m",
            "messages": [{"role": "user", "content": "hi"}],
            "stream": true
        });
        let request = validate_chat_request(&payload).unwrap();
        assert!(request.stream);
    }

    #[test]
    fn test_max_tokens_type_checked() {
        let payload = json!({
            "model": "m",
            "messages": [{"role": "user", "content": "hi"}],
            "max_tokens": -5
        });
        let err = validate_chat_request(&payload).unwrap_err();
        assert_eq!(err.field, "max_tokens");
    }

    #[test]
    fn test_top_p_type_checked() {
        let payload = json!({
            "model": "m",
            "messages": [{"role": "user", "content": "hi"}],
            "top_p": "high"
        });
        let err = validate_chat_request(&payload).unwrap_err();
        assert_eq!(err.field, "top_p");
    }

    #[test]
    fn test_n_zero_rejected() {
        let payload = json!({
            "model": "m",
            "messages": [{"role": "user", "content": "hi"}],
            "n": 0
        });
        let err = validate_chat_request(&payload).unwrap_err();
        assert_eq!(err.field, "n");
        assert_eq!(err.expected, "positive integer");
    }

    #[test]
    fn test_n_one_accepted() {
        let payload = json!({
            "model": "m",
            "messages": [{"role": "user", "content": "hi"}],
            "n": 1
        });
        let request = validate_chat_request(&payload).unwrap();
        assert_eq!(request.extra["n"], json!(1));
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let payload = json!({
            "model": "m",
            "messages": [{"role": "user", "content": "hi"}],
            "frequency_penalty": 0.5,
            "user": "abc"
        });

        let request = validate_chat_request(&payload).unwrap();
        assert_eq!(request.extra["frequency_penalty"], json!(0.5));
        assert_eq!(request.extra["user"], json!("abc"));
    }

    #[test]
    fn test_non_object_body_fails() {
        let err = validate_chat_request(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.field, "body");
    }
}
