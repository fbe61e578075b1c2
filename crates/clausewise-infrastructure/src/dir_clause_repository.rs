//! Directory-backed ClauseRepository implementation.
//!
//! Each document persists as one TOML file under a `documents/` directory:
//!
//! ```text
//! base_dir/
//! └── documents/
//!     ├── doc-uid-1.toml
//!     └── doc-uid-2.toml
//! ```
//!
//! Documents are write-once: re-ingesting identical content is a no-op,
//! conflicting content is rejected, and the only permitted mutation is the
//! per-clause risk annotation.

use async_trait::async_trait;
use clausewise_core::clause::{Clause, ClauseRepository, RiskRating};
use clausewise_core::error::{ClausewiseError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// On-disk record for one ingested document.
#[derive(Debug, Serialize, Deserialize)]
struct StoredDocument {
    uid: String,
    created_at: String,
    #[serde(default, rename = "clause")]
    clauses: Vec<Clause>,
}

pub struct DirClauseRepository {
    documents_dir: PathBuf,
}

impl DirClauseRepository {
    /// Creates a new repository rooted at `base_dir`, creating the
    /// `documents/` directory if needed.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let documents_dir = base_dir.as_ref().join("documents");
        fs::create_dir_all(&documents_dir).await?;
        Ok(Self { documents_dir })
    }

    /// Creates a repository at the default location (`~/.config/clausewise`).
    pub async fn default_location() -> Result<Self> {
        let base_dir = crate::paths::ClausewisePaths::config_dir()
            .map_err(|e| ClausewiseError::internal(e.to_string()))?;
        Self::new(base_dir).await
    }

    fn document_file_path(&self, uid: &str) -> Result<PathBuf> {
        // Uids become file names directly; refuse anything that would
        // escape the documents directory.
        if uid.is_empty() || uid.contains('/') || uid.contains('\\') || uid.contains("..") {
            return Err(ClausewiseError::internal(format!(
                "document uid '{}' is not a valid storage key",
                uid
            )));
        }
        Ok(self.documents_dir.join(format!("{}.toml", uid)))
    }

    async fn load_document(&self, uid: &str) -> Result<StoredDocument> {
        let path = self.document_file_path(uid)?;
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ClausewiseError::document_not_found(uid));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(toml::from_str(&content)?)
    }

    async fn store_document(&self, document: &StoredDocument) -> Result<()> {
        let path = self.document_file_path(&document.uid)?;
        let content = toml::to_string_pretty(document)?;
        fs::write(&path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl ClauseRepository for DirClauseRepository {
    async fn put_clauses(&self, uid: &str, clauses: Vec<String>) -> Result<()> {
        match self.load_document(uid).await {
            Ok(existing) => {
                // Idempotent re-ingest of the same content keeps the stored
                // record (and its risk annotations) untouched.
                let existing_texts: Vec<&str> = existing
                    .clauses
                    .iter()
                    .map(|c| c.original_text.as_str())
                    .collect();
                let new_texts: Vec<&str> = clauses.iter().map(String::as_str).collect();
                if existing_texts == new_texts {
                    tracing::debug!("document '{}' re-ingested with identical content", uid);
                    return Ok(());
                }
                Err(ClausewiseError::DocumentConflict {
                    uid: uid.to_string(),
                })
            }
            Err(ClausewiseError::DocumentNotFound { .. }) => {
                let document = StoredDocument {
                    uid: uid.to_string(),
                    created_at: chrono::Utc::now().to_rfc3339(),
                    clauses: clauses
                        .into_iter()
                        .enumerate()
                        .map(|(index, original_text)| Clause {
                            index,
                            original_text,
                            risk: None,
                            clause_type: None,
                        })
                        .collect(),
                };
                tracing::info!(
                    "storing document '{}' with {} clauses",
                    uid,
                    document.clauses.len()
                );
                self.store_document(&document).await
            }
            Err(e) => Err(e),
        }
    }

    async fn get_clause(&self, uid: &str, index: usize) -> Result<String> {
        let document = self.load_document(uid).await?;
        document
            .clauses
            .get(index)
            .map(|c| c.original_text.clone())
            .ok_or_else(|| ClausewiseError::clause_not_found(uid, index))
    }

    async fn get_all_clauses(&self, uid: &str) -> Result<Vec<String>> {
        let document = self.load_document(uid).await?;
        Ok(document
            .clauses
            .into_iter()
            .map(|c| c.original_text)
            .collect())
    }

    async fn get_clauses(&self, uid: &str) -> Result<Vec<Clause>> {
        Ok(self.load_document(uid).await?.clauses)
    }

    async fn set_clause_risk(&self, uid: &str, index: usize, risk: RiskRating) -> Result<()> {
        let mut document = self.load_document(uid).await?;
        let clause = document
            .clauses
            .get_mut(index)
            .ok_or_else(|| ClausewiseError::clause_not_found(uid, index))?;
        clause.risk = Some(risk);
        self.store_document(&document).await
    }

    async fn document_exists(&self, uid: &str) -> bool {
        match self.document_file_path(uid) {
            Ok(path) => fs::try_exists(&path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    async fn list_documents(&self) -> Result<Vec<String>> {
        let mut uids = Vec::new();
        let mut entries = fs::read_dir(&self.documents_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("toml") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    uids.push(stem.to_string());
                }
            }
        }
        uids.sort();
        Ok(uids)
    }
}
