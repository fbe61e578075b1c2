//! Risk classification record.
//!
//! A `RiskRecord` is derived per classification request and is not cached;
//! persistence of a rating alongside the clause is the caller's decision.

use crate::clause::RiskRating;
use serde::{Deserialize, Serialize};

/// Classifier confidence in its own rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// The structured result of classifying one clause.
///
/// Deserialization accepts the upstream classifier's field spelling
/// (`detailed_rationale`) as an alias, so the wire object parses directly.
/// `rating`, `rationale` and `confidence` are required; a response missing
/// any of them is malformed and degrades to [`RiskRecord::fallback`] at the
/// adapter boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRecord {
    pub rating: RiskRating,
    #[serde(alias = "detailed_rationale")]
    pub rationale: String,
    /// Exact short quotes from the clause that triggered concern.
    #[serde(default)]
    pub risky_phrases: Vec<String>,
    pub confidence: Confidence,
    /// 1-10 severity scale, when the classifier provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<u8>,
    /// Coarse risk categories (Financial, Liability, Privacy, ...).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub risk_types: Vec<String>,
}

impl RiskRecord {
    /// The fixed record returned whenever classification fails or the
    /// upstream output cannot be parsed. Deterministic: same value every
    /// time, never an error.
    pub fn fallback() -> Self {
        Self {
            rating: RiskRating::Yellow,
            rationale: "classification unavailable".to_string(),
            risky_phrases: Vec::new(),
            confidence: Confidence::Low,
            severity: None,
            risk_types: Vec::new(),
        }
    }
}
