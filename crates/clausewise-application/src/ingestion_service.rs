//! Document ingestion pipeline.
//!
//! Orchestrates extraction, segmentation and persistence into the clause
//! store. Extraction failure for an unsupported or corrupt input yields a
//! failed status with no clauses written; the pipeline never persists
//! partial output.

use clausewise_core::clause::{ClauseRepository, segment_clauses};
use clausewise_core::collaborator::{DocumentKind, TextExtractor};
use clausewise_core::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Terminal state of one ingestion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestStatus {
    Completed { clause_count: usize },
    Failed { reason: String },
}

pub struct IngestionService {
    extractor: Arc<dyn TextExtractor>,
    clauses: Arc<dyn ClauseRepository>,
    /// Per-uid ingest locks: ingestion of one document is serialized
    /// against itself, while different documents ingest in parallel.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl IngestionService {
    pub fn new(extractor: Arc<dyn TextExtractor>, clauses: Arc<dyn ClauseRepository>) -> Self {
        Self {
            extractor,
            clauses,
            locks: Mutex::new(HashMap::new()),
        }
    }

    async fn ingest_lock(&self, uid: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(uid.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Ingests one document: extract, segment, persist.
    ///
    /// `type_hint` is the declared filename or type of the upload; it
    /// selects the extraction path. Extraction failures and empty
    /// extractions report `IngestStatus::Failed` — only store-level
    /// problems (e.g. a conflicting re-ingest) surface as errors.
    pub async fn ingest(
        &self,
        uid: &str,
        raw_bytes: &[u8],
        type_hint: &str,
    ) -> Result<IngestStatus> {
        let kind = DocumentKind::from_hint(type_hint);
        let lock = self.ingest_lock(uid).await;
        let _guard = lock.lock().await;

        let text = match self.extractor.extract(raw_bytes, kind).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("extraction failed for document '{}': {}", uid, e);
                return Ok(IngestStatus::Failed {
                    reason: e.to_string(),
                });
            }
        };

        let clauses = segment_clauses(&text);
        if clauses.is_empty() {
            tracing::warn!("document '{}' produced no text to segment", uid);
            return Ok(IngestStatus::Failed {
                reason: "no text extracted".to_string(),
            });
        }

        let clause_count = clauses.len();
        self.clauses.put_clauses(uid, clauses).await?;
        tracing::info!("ingested document '{}' ({} clauses)", uid, clause_count);
        Ok(IngestStatus::Completed { clause_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use clausewise_core::clause::{Clause, RiskRating};
    use clausewise_core::error::ClausewiseError;
    use std::sync::Mutex as StdMutex;

    struct MemoryClauseRepository {
        documents: StdMutex<HashMap<String, Vec<Clause>>>,
    }

    impl MemoryClauseRepository {
        fn new() -> Self {
            Self {
                documents: StdMutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl ClauseRepository for MemoryClauseRepository {
        async fn put_clauses(&self, uid: &str, clauses: Vec<String>) -> Result<()> {
            let mut documents = self.documents.lock().unwrap();
            if documents.contains_key(uid) {
                return Err(ClausewiseError::DocumentConflict {
                    uid: uid.to_string(),
                });
            }
            documents.insert(
                uid.to_string(),
                clauses
                    .into_iter()
                    .enumerate()
                    .map(|(index, original_text)| Clause {
                        index,
                        original_text,
                        risk: None,
                        clause_type: None,
                    })
                    .collect(),
            );
            Ok(())
        }

        async fn get_clause(&self, uid: &str, index: usize) -> Result<String> {
            let documents = self.documents.lock().unwrap();
            let clauses = documents
                .get(uid)
                .ok_or_else(|| ClausewiseError::document_not_found(uid))?;
            clauses
                .get(index)
                .map(|c| c.original_text.clone())
                .ok_or_else(|| ClausewiseError::clause_not_found(uid, index))
        }

        async fn get_all_clauses(&self, uid: &str) -> Result<Vec<String>> {
            let documents = self.documents.lock().unwrap();
            documents
                .get(uid)
                .map(|clauses| clauses.iter().map(|c| c.original_text.clone()).collect())
                .ok_or_else(|| ClausewiseError::document_not_found(uid))
        }

        async fn get_clauses(&self, uid: &str) -> Result<Vec<Clause>> {
            let documents = self.documents.lock().unwrap();
            documents
                .get(uid)
                .cloned()
                .ok_or_else(|| ClausewiseError::document_not_found(uid))
        }

        async fn set_clause_risk(&self, uid: &str, index: usize, risk: RiskRating) -> Result<()> {
            let mut documents = self.documents.lock().unwrap();
            let clauses = documents
                .get_mut(uid)
                .ok_or_else(|| ClausewiseError::document_not_found(uid))?;
            let clause = clauses
                .get_mut(index)
                .ok_or_else(|| ClausewiseError::clause_not_found(uid, index))?;
            clause.risk = Some(risk);
            Ok(())
        }

        async fn document_exists(&self, uid: &str) -> bool {
            self.documents.lock().unwrap().contains_key(uid)
        }

        async fn list_documents(&self) -> Result<Vec<String>> {
            let mut uids: Vec<String> =
                self.documents.lock().unwrap().keys().cloned().collect();
            uids.sort();
            Ok(uids)
        }
    }

    struct FixedExtractor {
        text: &'static str,
    }

    #[async_trait]
    impl TextExtractor for FixedExtractor {
        async fn extract(&self, _bytes: &[u8], _kind: DocumentKind) -> Result<String> {
            Ok(self.text.to_string())
        }
    }

    struct FailingExtractor;

    #[async_trait]
    impl TextExtractor for FailingExtractor {
        async fn extract(&self, _bytes: &[u8], _kind: DocumentKind) -> Result<String> {
            Err(ClausewiseError::extraction("corrupt input"))
        }
    }

    #[tokio::test]
    async fn test_ingest_segments_and_persists() {
        let repo = Arc::new(MemoryClauseRepository::new());
        let service = IngestionService::new(
            Arc::new(FixedExtractor {
                text: "Clause A text\n\nClause B text\n",
            }),
            repo.clone(),
        );

        let status = service.ingest("doc1", b"raw", "lease.txt").await.unwrap();

        assert_eq!(status, IngestStatus::Completed { clause_count: 2 });
        assert_eq!(repo.get_clause("doc1", 0).await.unwrap(), "Clause A text");
        assert_eq!(repo.get_clause("doc1", 1).await.unwrap(), "Clause B text");
    }

    #[tokio::test]
    async fn test_extraction_failure_writes_nothing() {
        let repo = Arc::new(MemoryClauseRepository::new());
        let service = IngestionService::new(Arc::new(FailingExtractor), repo.clone());

        let status = service.ingest("doc1", b"raw", "scan.pdf").await.unwrap();

        assert!(matches!(status, IngestStatus::Failed { .. }));
        assert!(!repo.document_exists("doc1").await);
    }

    #[tokio::test]
    async fn test_empty_extraction_is_failed_not_empty_document() {
        let repo = Arc::new(MemoryClauseRepository::new());
        let service =
            IngestionService::new(Arc::new(FixedExtractor { text: "  \n \n" }), repo.clone());

        let status = service.ingest("doc1", b"raw", "blank.txt").await.unwrap();

        assert_eq!(
            status,
            IngestStatus::Failed {
                reason: "no text extracted".to_string()
            }
        );
        assert!(!repo.document_exists("doc1").await);
    }

    #[tokio::test]
    async fn test_conflicting_reingest_surfaces_store_error() {
        let repo = Arc::new(MemoryClauseRepository::new());
        let first = IngestionService::new(
            Arc::new(FixedExtractor { text: "original" }),
            repo.clone(),
        );
        first.ingest("doc1", b"raw", "a.txt").await.unwrap();

        let second =
            IngestionService::new(Arc::new(FixedExtractor { text: "changed" }), repo.clone());
        let err = second.ingest("doc1", b"raw", "a.txt").await.unwrap_err();
        assert!(matches!(err, ClausewiseError::DocumentConflict { .. }));
    }
}
