//! Missing-clause ("ghost") analysis.
//!
//! Asks the generation collaborator which clauses a standard contract
//! would contain that this document lacks. Unlike classification there is
//! no structural fallback for a list of findings, so generation and parse
//! failures surface as typed errors.

use crate::prompts;
use clausewise_core::clause::ClauseRepository;
use clausewise_core::collaborator::TextGenerator;
use clausewise_core::error::Result;
use clausewise_core::extract;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A clause the document is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhostClause {
    pub clause_name: String,
    pub description: String,
    pub reason: String,
}

pub struct GhostClauseService {
    generator: Arc<dyn TextGenerator>,
    clauses: Arc<dyn ClauseRepository>,
}

impl GhostClauseService {
    pub fn new(generator: Arc<dyn TextGenerator>, clauses: Arc<dyn ClauseRepository>) -> Self {
        Self { generator, clauses }
    }

    /// Returns up to five clauses missing from the stored document.
    ///
    /// # Errors
    ///
    /// - `DocumentNotFound` if `uid` is unknown
    /// - `UpstreamGeneration` if the collaborator call fails
    /// - `MalformedResponse` if the response holds no parseable JSON array
    pub async fn find_missing(&self, uid: &str) -> Result<Vec<GhostClause>> {
        let texts = self.clauses.get_all_clauses(uid).await?;
        let prompt = prompts::ghost_prompt(&texts.join("\n"));

        let raw = self.generator.generate(&prompt).await?;
        let missing: Vec<GhostClause> = extract::parse_embedded_array(&raw)?;
        tracing::debug!("document '{}': {} missing clauses flagged", uid, missing.len());
        Ok(missing)
    }
}
