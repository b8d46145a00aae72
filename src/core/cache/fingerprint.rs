//! Deterministic request fingerprinting: canonical JSON over a fixed
//! field set, SHA-256 over the canonical bytes.

use sha2::{Digest, Sha256};

use crate::core::models::openai::ChatCompletionRequest;

/// The exact fields that participate in the fingerprint, in this order.
/// Field order here doesn't affect the digest (the JSON value is
/// re-serialized with sorted keys below) but documents what's covered.
const FINGERPRINT_FIELDS: &[&str] = &[
    "model",
    "messages",
    "temperature",
    "top_p",
    "max_tokens",
    "n",
    "stop",
    "tools",
    "tool_choice",
    "response_format",
    "frequency_penalty",
    "presence_penalty",
    "logit_bias",
    "seed",
    "user",
];

/// Rounds every JSON float in `value` to 6 decimal places so requests
/// differing only in float noise produce the same fingerprint.
fn round_floats(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                if n.as_i64().is_none() && n.as_u64().is_none() {
                    let rounded = (f * 1_000_000.0).round() / 1_000_000.0;
                    if let Some(new_num) = serde_json::Number::from_f64(rounded) {
                        *n = new_num;
                    }
                }
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                round_floats(item);
            }
        }
        serde_json::Value::Object(map) => {
            for (_, v) in map.iter_mut() {
                round_floats(v);
            }
        }
        _ => {}
    }
}

/// Canonicalizes a JSON value: object keys in sorted order, recursively.
/// `serde_json::Value::Object` is backed by a `BTreeMap` in this build
/// (the `preserve_order` feature is not enabled), so straightforward
/// re-serialization already yields sorted keys; this function exists to
/// make that guarantee explicit and independent of future feature flags.
fn canonicalize(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut sorted = serde_json::Map::new();
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key]));
            }
            serde_json::Value::Object(sorted)
        }
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(canonicalize).collect())
        }
        other => other.clone(),
    }
}

/// Computes the deterministic fingerprint for a cacheable request. The
/// request is first projected down to [`FINGERPRINT_FIELDS`], so
/// gateway-only additions (e.g. `metadata`) never affect the key.
pub fn fingerprint(request: &ChatCompletionRequest) -> String {
    let full = serde_json::to_value(request).unwrap_or(serde_json::Value::Null);
    let mut projected = serde_json::Map::new();

    if let serde_json::Value::Object(map) = &full {
        for field in FINGERPRINT_FIELDS {
            if let Some(v) = map.get(*field) {
                if !v.is_null() {
                    projected.insert((*field).to_string(), v.clone());
                }
            }
        }
    }

    let mut value = serde_json::Value::Object(projected);
    round_floats(&mut value);
    let canonical = canonicalize(&value);
    let bytes = serde_json::to_vec(&canonical).unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::openai::{ChatMessage, MessageContent, MessageRole};

    fn base_request() -> ChatCompletionRequest {
        let mut req = ChatCompletionRequest::default();
        req.model = "gpt-4o".to_string();
        req.messages = vec![ChatMessage {
            role: MessageRole::User,
            content: Some(MessageContent::Text("hello".to_string())),
            name: None,
            function_call: None,
            tool_calls: None,
            tool_call_id: None,
            audio: None,
        }];
        req
    }

    #[test]
    fn identical_requests_produce_identical_fingerprints() {
        let a = base_request();
        let b = base_request();
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn float_precision_noise_does_not_change_fingerprint() {
        let mut a = base_request();
        let mut b = base_request();
        a.temperature = Some(0.7000001);
        b.temperature = Some(0.6999999);
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn different_messages_produce_different_fingerprints() {
        let a = base_request();
        let mut b = base_request();
        b.messages[0].content = Some(MessageContent::Text("goodbye".to_string()));
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn metadata_does_not_affect_fingerprint() {
        let mut a = base_request();
        let mut b = base_request();
        b.metadata = Some(crate::core::pipeline::RequestMetadata {
            trace_id: Some("trace-123".to_string()),
            ..Default::default()
        });
        a.metadata = None;
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }
}
