//! Session engine use case.
//!
//! Answers free-form questions about a document inside a durable,
//! append-only conversation session. Each question reads the full clause
//! context plus the bounded recent history, and the session is persisted
//! write-through after every successful assistant turn.

use crate::prompts;
use clausewise_core::clause::ClauseRepository;
use clausewise_core::collaborator::TextGenerator;
use clausewise_core::error::{ClausewiseError, Result};
use clausewise_core::session::{SessionManager, SessionRef, SessionRepository, Turn, TurnRole};
use std::sync::Arc;

pub struct ChatService {
    clauses: Arc<dyn ClauseRepository>,
    sessions: SessionManager,
    generator: Arc<dyn TextGenerator>,
}

impl ChatService {
    pub fn new(
        clauses: Arc<dyn ClauseRepository>,
        session_repository: Arc<dyn SessionRepository>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            clauses,
            sessions: SessionManager::new(session_repository),
            generator,
        }
    }

    /// Answers one question against a document, inside the session that
    /// `session_ref` resolves to. Returns the answer together with the
    /// session id, so a first call with `SessionRef::New` hands the caller
    /// the id to resume with.
    ///
    /// Per-session serialization: the session handle stays locked from
    /// prompt construction through persistence, so two concurrent
    /// questions against the same session id cannot interleave their
    /// appends. A failed generation rolls the user turn back — no orphan
    /// user-only turn is ever persisted.
    ///
    /// # Errors
    ///
    /// - `DocumentNotFound` if `uid` has no clauses (checked before any
    ///   upstream call)
    /// - `SessionNotFound` for `SessionRef::Resume` with an unknown id
    /// - `UpstreamGeneration` if the collaborator call fails
    pub async fn ask(
        &self,
        uid: &str,
        question: &str,
        session_ref: SessionRef,
    ) -> Result<(String, String)> {
        let clause_texts = self.clauses.get_all_clauses(uid).await?;
        if clause_texts.is_empty() {
            return Err(ClausewiseError::document_not_found(uid));
        }

        let (session_id, handle) = self.sessions.open(uid, session_ref).await?;
        let mut session = handle.lock().await;

        // The window is taken before the new question is appended; the
        // question rides separately at the end of the prompt.
        let prompt = prompts::chat_prompt(&clause_texts, session.recent_turns(), question);
        session.push_turn(TurnRole::User, question);

        let answer = match self.generator.generate(&prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                session.turns.pop();
                return Err(e);
            }
        };

        session.push_turn(TurnRole::Assistant, &answer);
        self.sessions.persist(&session).await?;
        tracing::debug!(
            "session '{}' answered question ({} turns total)",
            session_id,
            session.turns.len()
        );

        Ok((answer, session_id))
    }

    /// Lists all known session ids.
    pub async fn list_sessions(&self) -> Result<Vec<String>> {
        self.sessions.list_ids().await
    }

    /// Returns a session's full turn history in chronological order.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the id is unknown
    pub async fn get_session(&self, session_id: &str) -> Result<Vec<Turn>> {
        Ok(self.sessions.get(session_id).await?.turns)
    }
}
