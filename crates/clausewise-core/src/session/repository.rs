//! Session repository trait.
//!
//! Defines the interface for session persistence operations.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for durable session storage.
///
/// This trait defines the contract for persisting and retrieving sessions,
/// decoupling the engine's core logic from the specific storage mechanism
/// (e.g., TOML files, database, remote API). Saving an existing id
/// overwrites the stored turn sequence (overwrite-on-append semantics).
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Finds a session by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: session found
    /// - `Ok(None)`: session not stored
    /// - `Err(_)`: storage failure
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>>;

    /// Saves a session, creating or overwriting its stored record.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Lists the ids of all stored sessions.
    async fn list_ids(&self) -> Result<Vec<String>>;
}
