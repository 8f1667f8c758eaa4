//! Cache key derivation.
//!
//! Turns a request's semantic identity — a raw string or any serializable
//! structure — into a fixed-length hex key. Objects are canonicalized
//! through `serde_json::Value` first: `Value` maps are ordered, so
//! logically-identical identities hash equal regardless of the order their
//! fields were constructed in.
//!
//! SHA-256 (rather than a per-process hasher) keeps keys stable across
//! processes, so a shared backend can be swapped in behind
//! [`ResponseCache`](crate::cache::ResponseCache) without a key migration.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Cache identity for the chat/message flow.
///
/// Two requests with the same prompt, request type, and task/project
/// references derive the same key.
#[derive(Debug, Clone, Serialize)]
pub struct RequestIdentity {
    pub prompt: String,
    pub request_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

impl RequestIdentity {
    pub fn new(prompt: impl Into<String>, request_type: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            request_type: request_type.into(),
            task_id: None,
            project_id: None,
        }
    }

    pub fn task_id(mut self, id: impl Into<String>) -> Self {
        self.task_id = Some(id.into());
        self
    }

    pub fn project_id(mut self, id: impl Into<String>) -> Self {
        self.project_id = Some(id.into());
        self
    }
}

/// Derive a fixed-length cache key from a request identity.
///
/// Total: never fails for any serializable input. Raw strings are hashed
/// as-is (no JSON quoting); everything else is hashed over its canonical
/// JSON rendering.
pub fn derive_key<T: Serialize + ?Sized>(identity: &T) -> String {
    let canonical = match serde_json::to_value(identity) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(value) => value.to_string(),
        // Only reachable for exotic inputs (e.g. non-string map keys);
        // hashing the error text keeps the function total.
        Err(e) => format!("!unserializable:{e}"),
    };
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}
