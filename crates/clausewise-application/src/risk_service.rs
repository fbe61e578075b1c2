//! Risk classifier adapter.
//!
//! Invokes the generation collaborator with the strict clause-analysis
//! instruction and normalizes its free-form output into a `RiskRecord`.
//! Classification failure is always absorbed locally into the fixed
//! fallback record — callers never see a classification error and always
//! get *some* answer.

use crate::prompts;
use clausewise_core::clause::ClauseRepository;
use clausewise_core::collaborator::TextGenerator;
use clausewise_core::error::Result;
use clausewise_core::extract;
use clausewise_core::risk::RiskRecord;
use std::sync::Arc;

/// One clause of a stored document paired with its fresh classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ClauseAnalysis {
    pub index: usize,
    pub original_text: String,
    pub record: RiskRecord,
}

pub struct RiskAnalysisService {
    generator: Arc<dyn TextGenerator>,
    clauses: Arc<dyn ClauseRepository>,
}

impl RiskAnalysisService {
    pub fn new(generator: Arc<dyn TextGenerator>, clauses: Arc<dyn ClauseRepository>) -> Self {
        Self { generator, clauses }
    }

    /// Classifies one clause. Exactly one upstream call, no retries; any
    /// failure — transport, timeout, missing JSON, missing required fields
    /// — degrades to [`RiskRecord::fallback`].
    pub async fn classify(&self, clause_text: &str) -> RiskRecord {
        let prompt = prompts::classification_prompt(clause_text);

        let raw = match self.generator.generate(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("classification call failed, using fallback: {}", e);
                return RiskRecord::fallback();
            }
        };

        match extract::parse_embedded_object::<RiskRecord>(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("classification response unusable, using fallback: {}", e);
                RiskRecord::fallback()
            }
        }
    }

    /// Classifies every clause of a stored document in index order.
    ///
    /// Per-clause failures degrade to the fallback record; the sweep never
    /// aborts part-way. Only a missing document surfaces as an error.
    ///
    /// # Errors
    ///
    /// - `DocumentNotFound` if `uid` is unknown
    pub async fn analyze_document(&self, uid: &str) -> Result<Vec<ClauseAnalysis>> {
        let texts = self.clauses.get_all_clauses(uid).await?;

        let mut analyses = Vec::with_capacity(texts.len());
        for (index, original_text) in texts.into_iter().enumerate() {
            let record = self.classify(&original_text).await;
            analyses.push(ClauseAnalysis {
                index,
                original_text,
                record,
            });
        }
        Ok(analyses)
    }
}
