use super::model::Session;
use super::repository::SessionRepository;
use crate::error::{ClausewiseError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// How a caller refers to the session a question belongs to.
///
/// The source system silently created a fresh session whenever a supplied
/// id was unknown, which masks typos as "new session". Here that behavior
/// is an explicit choice:
///
/// - `New`: always create a session under a generated unique id.
/// - `Resume`: the id must exist (in cache or durable storage), otherwise
///   the call fails with `SessionNotFound`.
/// - `ResumeOrCreate`: resume if the id exists, otherwise create a new
///   empty session under that exact id (the source behavior, opt-in).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionRef {
    New,
    Resume(String),
    ResumeOrCreate(String),
}

/// Manages session identity, the in-memory session cache, and per-session
/// mutual exclusion.
///
/// Each cached session is wrapped in its own `Mutex`; holding that lock for
/// the whole read-modify-append-persist sequence is what serializes
/// concurrent requests against the same session id. Sessions under
/// different ids share nothing and proceed in parallel.
///
/// The cache only avoids redundant reads: durable storage remains the
/// source of truth across process restarts, and a session is persisted
/// through [`SessionManager::persist`] after each successful assistant
/// turn, not on creation.
pub struct SessionManager {
    /// In-memory session cache, keyed by session id.
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
    /// Persistent storage backend for session data.
    repository: Arc<dyn SessionRepository>,
}

impl SessionManager {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            repository,
        }
    }

    /// Resolves a `SessionRef` to a live session handle, loading from
    /// durable storage or creating an empty session as the ref dictates.
    ///
    /// Returns the session id together with the handle; callers lock the
    /// handle for the duration of one logical question.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` for `SessionRef::Resume` with an unknown id
    pub async fn open(
        &self,
        document_uid: &str,
        session_ref: SessionRef,
    ) -> Result<(String, Arc<Mutex<Session>>)> {
        let (id, create_if_missing) = match session_ref {
            SessionRef::New => {
                let id = uuid::Uuid::new_v4().to_string();
                (id, true)
            }
            SessionRef::Resume(id) => (id, false),
            SessionRef::ResumeOrCreate(id) => (id, true),
        };

        // The write lock is held across the storage read so two concurrent
        // opens of the same id resolve to one cache entry.
        let mut sessions = self.sessions.write().await;

        if let Some(handle) = sessions.get(&id) {
            return Ok((id, handle.clone()));
        }

        let session = match self.repository.find_by_id(&id).await? {
            Some(session) => session,
            None if create_if_missing => {
                tracing::debug!("creating new session '{}' for document '{}'", id, document_uid);
                Session::new(id.clone(), document_uid)
            }
            None => return Err(ClausewiseError::session_not_found(id)),
        };

        let handle = Arc::new(Mutex::new(session));
        sessions.insert(id.clone(), handle.clone());
        Ok((id, handle))
    }

    /// Writes a session through to durable storage.
    pub async fn persist(&self, session: &Session) -> Result<()> {
        self.repository.save(session).await
    }

    /// Returns a point-in-time snapshot of a session's state.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the id is in neither the cache nor storage
    pub async fn get(&self, session_id: &str) -> Result<Session> {
        let cached = {
            let sessions = self.sessions.read().await;
            sessions.get(session_id).cloned()
        };
        if let Some(handle) = cached {
            return Ok(handle.lock().await.clone());
        }

        self.repository
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| ClausewiseError::session_not_found(session_id))
    }

    /// Lists all known session ids: stored ids plus any created in this
    /// process that have not reached their first persist yet.
    pub async fn list_ids(&self) -> Result<Vec<String>> {
        let mut ids = self.repository.list_ids().await?;
        {
            let sessions = self.sessions.read().await;
            ids.extend(sessions.keys().cloned());
        }
        ids.sort();
        ids.dedup();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TurnRole;
    use std::sync::Mutex as StdMutex;

    // Mock SessionRepository for testing
    struct MockSessionRepository {
        sessions: StdMutex<HashMap<String, Session>>,
    }

    impl MockSessionRepository {
        fn new() -> Self {
            Self {
                sessions: StdMutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl SessionRepository for MockSessionRepository {
        async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
            let sessions = self.sessions.lock().unwrap();
            Ok(sessions.get(session_id).cloned())
        }

        async fn save(&self, session: &Session) -> Result<()> {
            let mut sessions = self.sessions.lock().unwrap();
            sessions.insert(session.id.clone(), session.clone());
            Ok(())
        }

        async fn list_ids(&self) -> Result<Vec<String>> {
            let sessions = self.sessions.lock().unwrap();
            Ok(sessions.keys().cloned().collect())
        }
    }

    #[tokio::test]
    async fn test_open_new_generates_unique_ids() {
        let manager = SessionManager::new(Arc::new(MockSessionRepository::new()));

        let (id_a, _) = manager.open("doc1", SessionRef::New).await.unwrap();
        let (id_b, _) = manager.open("doc1", SessionRef::New).await.unwrap();

        assert_ne!(id_a, id_b);
    }

    #[tokio::test]
    async fn test_resume_unknown_id_fails() {
        let manager = SessionManager::new(Arc::new(MockSessionRepository::new()));

        let err = manager
            .open("doc1", SessionRef::Resume("missing".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, ClausewiseError::SessionNotFound { .. }));
    }

    #[tokio::test]
    async fn test_resume_or_create_adopts_the_supplied_id() {
        let manager = SessionManager::new(Arc::new(MockSessionRepository::new()));

        let (id, handle) = manager
            .open("doc1", SessionRef::ResumeOrCreate("chosen-id".to_string()))
            .await
            .unwrap();

        assert_eq!(id, "chosen-id");
        assert_eq!(handle.lock().await.document_uid, "doc1");
    }

    #[tokio::test]
    async fn test_open_resumes_from_durable_storage() {
        let repository = Arc::new(MockSessionRepository::new());
        let mut stored = Session::new("stored-id", "doc1");
        stored.push_turn(TurnRole::User, "earlier question");
        repository.save(&stored).await.unwrap();

        let manager = SessionManager::new(repository);
        let (_, handle) = manager
            .open("doc1", SessionRef::Resume("stored-id".to_string()))
            .await
            .unwrap();

        assert_eq!(handle.lock().await.turns.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_opens_share_one_handle() {
        let manager = Arc::new(SessionManager::new(Arc::new(MockSessionRepository::new())));

        let (_, first) = manager
            .open("doc1", SessionRef::ResumeOrCreate("same".to_string()))
            .await
            .unwrap();
        let (_, second) = manager
            .open("doc1", SessionRef::ResumeOrCreate("same".to_string()))
            .await
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_list_ids_unions_cache_and_storage() {
        let repository = Arc::new(MockSessionRepository::new());
        repository.save(&Session::new("persisted", "doc1")).await.unwrap();

        let manager = SessionManager::new(repository);
        manager
            .open("doc1", SessionRef::ResumeOrCreate("in-memory".to_string()))
            .await
            .unwrap();

        let ids = manager.list_ids().await.unwrap();
        assert_eq!(ids, vec!["in-memory".to_string(), "persisted".to_string()]);
    }

    #[tokio::test]
    async fn test_get_prefers_cache_then_storage() {
        let repository = Arc::new(MockSessionRepository::new());
        repository.save(&Session::new("cold", "doc1")).await.unwrap();

        let manager = SessionManager::new(repository);

        // Not in cache: read through to storage.
        assert_eq!(manager.get("cold").await.unwrap().id, "cold");

        // Cached with un-persisted turns: snapshot reflects memory.
        let (_, handle) = manager
            .open("doc1", SessionRef::ResumeOrCreate("warm".to_string()))
            .await
            .unwrap();
        handle.lock().await.push_turn(TurnRole::User, "pending");
        assert_eq!(manager.get("warm").await.unwrap().turns.len(), 1);

        let err = manager.get("absent").await.unwrap_err();
        assert!(matches!(err, ClausewiseError::SessionNotFound { .. }));
    }
}
