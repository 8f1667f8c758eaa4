//! Chat history types

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Who produced a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

/// One prior turn of a conversation.
///
/// Turns carry their creation time so composition can linearize history
/// chronologically regardless of the order the caller fetched it in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
    pub created_at: SystemTime,
}

impl ChatTurn {
    /// Create a user turn.
    pub fn user(text: impl Into<String>, created_at: SystemTime) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            created_at,
        }
    }

    /// Create an assistant turn.
    pub fn assistant(text: impl Into<String>, created_at: SystemTime) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
            created_at,
        }
    }
}
