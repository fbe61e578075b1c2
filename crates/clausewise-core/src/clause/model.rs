//! Clause domain model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-level classification of a clause's harmfulness to the reviewing
/// party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskRating {
    Green,
    Yellow,
    Red,
}

impl RiskRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskRating::Green => "green",
            RiskRating::Yellow => "yellow",
            RiskRating::Red => "red",
        }
    }

    /// Parses a rating name, case-insensitively. Returns `None` for anything
    /// outside the three-level vocabulary; callers decide whether that means
    /// an error or a fallback.
    pub fn parse(s: &str) -> Option<RiskRating> {
        match s.trim().to_lowercase().as_str() {
            "green" => Some(RiskRating::Green),
            "yellow" => Some(RiskRating::Yellow),
            "red" => Some(RiskRating::Red),
            _ => None,
        }
    }
}

impl fmt::Display for RiskRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One segmented unit of contract text, addressed by a stable index within
/// its document.
///
/// `original_text` is immutable once stored; negotiation and classification
/// only ever update the `risk` annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    /// 0-based position within the document. Indices are contiguous and
    /// dense (0..N-1).
    pub index: usize,
    /// The clause text as extracted, never rewritten.
    pub original_text: String,
    /// Current risk annotation, absent until a classifier or negotiation
    /// outcome has been persisted against the clause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskRating>,
    /// Optional free-text category (e.g. "indemnity").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause_type: Option<String>,
}

/// Splits extracted document text into clause texts.
///
/// Policy: every non-empty line (after trimming) is one clause; blank lines
/// act as separators only and never become clauses. This is intentionally
/// naive line/paragraph segmentation — there is no semantic clause boundary
/// detection. Known limitation, kept by design.
pub fn segment_clauses(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_drops_blank_lines() {
        let clauses = segment_clauses("Clause A text\n\nClause B text\n");
        assert_eq!(clauses, vec!["Clause A text", "Clause B text"]);
    }

    #[test]
    fn test_segment_preserves_order_and_density() {
        let text = "first\nsecond\n\n\nthird\n";
        let clauses = segment_clauses(text);
        assert_eq!(clauses.len(), 3);
        assert_eq!(clauses[0], "first");
        assert_eq!(clauses[1], "second");
        assert_eq!(clauses[2], "third");
    }

    #[test]
    fn test_segment_trims_and_handles_crlf() {
        let clauses = segment_clauses("  padded  \r\n\r\nnext\r\n");
        assert_eq!(clauses, vec!["padded", "next"]);
    }

    #[test]
    fn test_segment_whitespace_only_is_empty() {
        assert!(segment_clauses("   \n \t \n").is_empty());
        assert!(segment_clauses("").is_empty());
    }

    #[test]
    fn test_rating_parse() {
        assert_eq!(RiskRating::parse("red"), Some(RiskRating::Red));
        assert_eq!(RiskRating::parse(" Yellow "), Some(RiskRating::Yellow));
        assert_eq!(RiskRating::parse("GREEN"), Some(RiskRating::Green));
        assert_eq!(RiskRating::parse("ghost"), None);
    }
}
