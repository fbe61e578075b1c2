//! TOML-based SessionRepository implementation
//!
//! Stores each session as an individual TOML file:
//!
//! ```text
//! base_dir/
//! └── sessions/
//!     ├── session-id-1.toml
//!     └── session-id-2.toml
//! ```
//!
//! Saving an existing id overwrites the whole file, which gives the session
//! engine its overwrite-on-append write-through semantics.

use async_trait::async_trait;
use clausewise_core::error::{ClausewiseError, Result};
use clausewise_core::session::{Session, SessionRepository};
use std::path::{Path, PathBuf};
use tokio::fs;

pub struct TomlSessionRepository {
    sessions_dir: PathBuf,
}

impl TomlSessionRepository {
    /// Creates a new `TomlSessionRepository` with the specified base
    /// directory, creating the `sessions/` directory if needed.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let sessions_dir = base_dir.as_ref().join("sessions");
        fs::create_dir_all(&sessions_dir).await?;
        Ok(Self { sessions_dir })
    }

    /// Creates a repository at the default location (`~/.config/clausewise`).
    pub async fn default_location() -> Result<Self> {
        let base_dir = crate::paths::ClausewisePaths::config_dir()
            .map_err(|e| ClausewiseError::internal(e.to_string()))?;
        Self::new(base_dir).await
    }

    /// Returns the file path for a given session ID.
    fn session_file_path(&self, session_id: &str) -> Result<PathBuf> {
        // Session ids may be caller-supplied (resume-or-create); refuse any
        // id that would escape the sessions directory.
        if session_id.is_empty()
            || session_id.contains('/')
            || session_id.contains('\\')
            || session_id.contains("..")
        {
            return Err(ClausewiseError::internal(format!(
                "session id '{}' is not a valid storage key",
                session_id
            )));
        }
        Ok(self.sessions_dir.join(format!("{}.toml", session_id)))
    }
}

#[async_trait]
impl SessionRepository for TomlSessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
        let file_path = self.session_file_path(session_id)?;

        let content = match fs::read_to_string(&file_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let session = toml::from_str(&content)?;
        Ok(Some(session))
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let file_path = self.session_file_path(&session.id)?;
        let content = toml::to_string_pretty(session)?;
        fs::write(&file_path, content).await?;
        tracing::debug!(
            "persisted session '{}' ({} turns)",
            session.id,
            session.turns.len()
        );
        Ok(())
    }

    async fn list_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut entries = fs::read_dir(&self.sessions_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("toml") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}
