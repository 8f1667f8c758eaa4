//! Structured-payload extraction from raw model output.
//!
//! Models routinely wrap the JSON they were asked for in prose or markdown
//! fences. The brace-scanning recovery here — first `{` to last `}` — is
//! load-bearing against that behavior and deliberately kept behind this one
//! function so an alternative (e.g. grammar-constrained decoding) can
//! replace it without touching callers.
//!
//! No semantic validation happens here beyond "is a keyed object";
//! contract-level completeness is [`contracts`](crate::contracts)' job.

use serde_json::{Map, Value};

use crate::{MuninnError, Result};

/// Longest excerpt of offending text carried in an error.
const EXCERPT_MAX_CHARS: usize = 200;

/// Recover a JSON object from raw completion text.
///
/// The substring between the first `{` and the last `}` (inclusive) is
/// treated as the candidate payload. Failure modes:
///
/// - no brace pair at all → [`MuninnError::NoStructuredPayload`], unless a
///   bracket pair parses as valid JSON, in which case the model produced a
///   well-formed non-object → [`MuninnError::UnexpectedPayloadShape`];
/// - candidate does not parse → [`MuninnError::MalformedStructuredPayload`];
/// - candidate parses to a non-object → [`MuninnError::UnexpectedPayloadShape`].
///
/// Every failure carries a bounded excerpt of the offending text.
pub fn extract(raw: &str) -> Result<Map<String, Value>> {
    let candidate = match span(raw, '{', '}') {
        Some(c) => c,
        None => {
            // No object braces. A bare array (or other valid JSON) between
            // brackets is a shape error, not a missing payload.
            if let Some(c) = span(raw, '[', ']') {
                if let Ok(value) = serde_json::from_str::<Value>(c) {
                    return Err(MuninnError::UnexpectedPayloadShape {
                        kind: kind_of(&value),
                        excerpt: excerpt(c),
                    });
                }
            }
            return Err(MuninnError::NoStructuredPayload {
                excerpt: excerpt(raw),
            });
        }
    };

    let value: Value =
        serde_json::from_str(candidate).map_err(|source| MuninnError::MalformedStructuredPayload {
            excerpt: excerpt(candidate),
            source,
        })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(MuninnError::UnexpectedPayloadShape {
            kind: kind_of(&other),
            excerpt: excerpt(candidate),
        }),
    }
}

/// Substring from the first `open` to the last `close`, inclusive.
fn span(raw: &str, open: char, close: char) -> Option<&str> {
    let start = raw.find(open)?;
    let end = raw.rfind(close)?;
    if start > end {
        return None;
    }
    Some(&raw[start..end + close.len_utf8()])
}

/// Bounded, char-boundary-safe excerpt for diagnostics.
fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= EXCERPT_MAX_CHARS {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(EXCERPT_MAX_CHARS).collect();
    out.push('…');
    out
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
