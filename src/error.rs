//! Muninn error types

/// Muninn error types
#[derive(Debug, thiserror::Error)]
pub enum MuninnError {
    // Upstream completion endpoint errors
    #[error("completion endpoint unreachable: {0}")]
    UpstreamUnavailable(String),

    #[error("completion endpoint returned an unusable response{}: {message}", fmt_status(.status))]
    UpstreamInvalidResponse {
        /// HTTP status, when the endpoint responded at all.
        status: Option<u16>,
        message: String,
    },

    // Extraction errors. Each carries a bounded excerpt of the offending
    // text, never the full model output.
    #[error("no structured payload found in model output: {excerpt}")]
    NoStructuredPayload { excerpt: String },

    #[error("malformed structured payload: {excerpt}")]
    MalformedStructuredPayload {
        excerpt: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a keyed object, got {kind}: {excerpt}")]
    UnexpectedPayloadShape { kind: &'static str, excerpt: String },

    // Caller errors
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

fn fmt_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" ({code})"),
        None => String::new(),
    }
}

/// Result type alias for Muninn operations
pub type Result<T> = std::result::Result<T, MuninnError>;
