//! Negotiation engine.
//!
//! Produces a counter-proposal, an explanation and a post-negotiation risk
//! value for one clause. Stance validation is the cheap check and runs
//! before any external call. The engine never mutates the clause store;
//! persisting an accepted outcome is the caller's explicit decision via
//! [`NegotiationService::apply_outcome`].

use crate::prompts;
use clausewise_core::clause::{ClauseRepository, RiskRating};
use clausewise_core::collaborator::TextGenerator;
use clausewise_core::error::Result;
use clausewise_core::extract;
use clausewise_core::negotiation::{NegotiationResult, NextAction, Stance};
use serde::Deserialize;
use std::sync::Arc;

const DEFAULT_REWRITE: &str = "No rewritten clause generated.";
const DEFAULT_EXPLANATION: &str = "No explanation generated.";

/// The JSON object the negotiation prompt solicits. Every field is
/// optional at the wire level; the service fills documented defaults.
#[derive(Debug, Deserialize)]
struct WireNegotiation {
    rewritten_clause: Option<String>,
    #[serde(alias = "ai_explanation")]
    explanation: Option<String>,
    risk_after: Option<String>,
}

pub struct NegotiationService {
    generator: Arc<dyn TextGenerator>,
    clauses: Arc<dyn ClauseRepository>,
}

impl NegotiationService {
    pub fn new(generator: Arc<dyn TextGenerator>, clauses: Arc<dyn ClauseRepository>) -> Self {
        Self { generator, clauses }
    }

    /// Negotiates one clause at the requested stance.
    ///
    /// A response without a usable JSON object degrades to the generic
    /// defaults with `risk_after` equal to `current_risk` — a failed
    /// negotiation never claims improvement. The same rule applies to a
    /// parsed object whose `risk_after` is missing or outside the
    /// three-level vocabulary.
    ///
    /// # Errors
    ///
    /// - `InvalidStance` before any upstream call for an unknown stance
    /// - `UpstreamGeneration` if the collaborator call itself fails; no
    ///   safe synthetic counter-text exists, so this is surfaced
    pub async fn negotiate(
        &self,
        clause_text: &str,
        current_risk: RiskRating,
        stance: &str,
    ) -> Result<NegotiationResult> {
        let stance = Stance::parse(stance)?;

        let prompt = prompts::negotiation_prompt(clause_text, current_risk, stance);
        let raw = self.generator.generate(&prompt).await?;

        let result = match extract::parse_embedded_object::<WireNegotiation>(&raw) {
            Ok(wire) => NegotiationResult {
                rewritten_clause: wire
                    .rewritten_clause
                    .filter(|text| !text.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_REWRITE.to_string()),
                explanation: wire
                    .explanation
                    .filter(|text| !text.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_EXPLANATION.to_string()),
                risk_after: wire
                    .risk_after
                    .as_deref()
                    .and_then(RiskRating::parse)
                    .unwrap_or(current_risk),
                next_actions: NextAction::all(),
            },
            Err(e) => {
                tracing::warn!("negotiation response unusable, returning defaults: {}", e);
                NegotiationResult {
                    rewritten_clause: DEFAULT_REWRITE.to_string(),
                    explanation: DEFAULT_EXPLANATION.to_string(),
                    risk_after: current_risk,
                    next_actions: NextAction::all(),
                }
            }
        };

        Ok(result)
    }

    /// Persists an accepted outcome's `risk_after` against the clause.
    ///
    /// # Errors
    ///
    /// - `DocumentNotFound` / `ClauseNotFound` from the store
    pub async fn apply_outcome(
        &self,
        uid: &str,
        index: usize,
        result: &NegotiationResult,
    ) -> Result<()> {
        self.clauses
            .set_clause_risk(uid, index, result.risk_after)
            .await
    }
}
