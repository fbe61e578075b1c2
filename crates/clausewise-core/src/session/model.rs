//! Session domain model.

use super::message::{Turn, TurnRole};
use serde::{Deserialize, Serialize};

/// Number of trailing turns included in each new prompt. Older turns stay
/// persisted but are truncated from the head of the context, never
/// reordered.
pub const CONTEXT_WINDOW_TURNS: usize = 6;

/// A durable conversation thread scoped to one document.
///
/// Turns are strictly append-only and ordered by creation time. The session
/// is persisted write-through after every successful assistant turn;
/// durable storage is the source of truth across process restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    /// The document this conversation is about.
    pub document_uid: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub turns: Vec<Turn>,
}

impl Session {
    /// Creates a new empty session for a document.
    pub fn new(id: impl Into<String>, document_uid: impl Into<String>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: id.into(),
            document_uid: document_uid.into(),
            created_at: now.clone(),
            updated_at: now,
            turns: Vec::new(),
        }
    }

    /// Appends a turn and refreshes `updated_at`.
    pub fn push_turn(&mut self, role: TurnRole, content: impl Into<String>) {
        self.turns.push(Turn::now(role, content));
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }

    /// The context window: the last `CONTEXT_WINDOW_TURNS` turns, oldest
    /// first.
    pub fn recent_turns(&self) -> &[Turn] {
        let start = self.turns.len().saturating_sub(CONTEXT_WINDOW_TURNS);
        &self.turns[start..]
    }
}
