//! Conversation turn types.

use serde::{Deserialize, Serialize};

/// Represents the role of a turn in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// Turn from the user.
    User,
    /// Turn from the AI assistant.
    Assistant,
}

/// A single turn in a session's conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// The role of the turn's author.
    pub role: TurnRole,
    /// The content of the turn.
    pub content: String,
    /// Timestamp when the turn was created (ISO 8601 format).
    pub timestamp: String,
}

impl Turn {
    /// Creates a turn stamped with the current time.
    pub fn now(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
