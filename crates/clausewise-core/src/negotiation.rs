//! Negotiation stance and result types.

use crate::clause::RiskRating;
use crate::error::{ClausewiseError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Negotiation aggressiveness selector, controlling how strongly a
/// counter-proposal favors the reviewing party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Friendly,
    Firm,
    Aggressive,
}

impl Stance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stance::Friendly => "friendly",
            Stance::Firm => "firm",
            Stance::Aggressive => "aggressive",
        }
    }

    /// Validates a caller-supplied stance name. This runs before any
    /// external call is made; anything outside the three valid values is
    /// rejected as `InvalidStance`.
    pub fn parse(s: &str) -> Result<Stance> {
        match s.trim().to_lowercase().as_str() {
            "friendly" => Ok(Stance::Friendly),
            "firm" => Ok(Stance::Firm),
            "aggressive" => Ok(Stance::Aggressive),
            _ => Err(ClausewiseError::invalid_stance(s)),
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suggested follow-up actions after a negotiation round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NextAction {
    Accept,
    Counter,
    #[serde(rename = "Ask-human-lawyer")]
    AskHumanLawyer,
}

impl NextAction {
    /// The full action set, in presentation order.
    pub fn all() -> Vec<NextAction> {
        vec![
            NextAction::Accept,
            NextAction::Counter,
            NextAction::AskHumanLawyer,
        ]
    }
}

/// The outcome of one negotiation round. Ephemeral: the engine returns it
/// to the caller, who decides whether to persist `risk_after` against the
/// clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationResult {
    pub rewritten_clause: String,
    pub explanation: String,
    pub risk_after: RiskRating,
    pub next_actions: Vec<NextAction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stance_parse_case_insensitive() {
        assert_eq!(Stance::parse("Friendly").unwrap(), Stance::Friendly);
        assert_eq!(Stance::parse("FIRM").unwrap(), Stance::Firm);
        assert_eq!(Stance::parse(" aggressive ").unwrap(), Stance::Aggressive);
    }

    #[test]
    fn test_stance_parse_rejects_unknown() {
        let err = Stance::parse("polite").unwrap_err();
        assert!(matches!(err, ClausewiseError::InvalidStance { .. }));
    }

    #[test]
    fn test_next_action_wire_names() {
        let json = serde_json::to_string(&NextAction::all()).unwrap();
        assert_eq!(json, r#"["Accept","Counter","Ask-human-lawyer"]"#);
    }
}
