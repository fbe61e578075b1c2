//! Prompt builders for the generation collaborator.
//!
//! One authoritative template per operation. The collaborator returns free
//! text; each template states the expected JSON shape and the call site
//! parses it with the shared extraction utility.

use clausewise_core::clause::RiskRating;
use clausewise_core::negotiation::Stance;
use clausewise_core::session::{Turn, TurnRole};

/// Instruction intensity for each negotiation stance.
fn stance_directive(stance: Stance) -> &'static str {
    match stance {
        Stance::Friendly => "mild improvements protecting the reviewing party without being too strict",
        Stance::Firm => "balanced improvements protecting the reviewing party fairly",
        Stance::Aggressive => "strong changes maximizing protection for the reviewing party",
    }
}

/// Strict clause-analysis instruction. The classifier is told to escalate
/// on ambiguity and answer in machine-readable JSON only.
pub(crate) fn classification_prompt(clause_text: &str) -> String {
    format!(
        r#"You are a strict, conservative clause analyst and legal reviewer.
Treat the following text as a single clause extracted from a legal document and analyze it with high scrutiny.

Your job:
1. Classify the clause into one of three labels: "green", "yellow", or "red".
   - green: okay and poses no harm.
   - yellow: can cause limited harm or ambiguity; needs review and possible edits.
   - red: definitely poses significant harm or risk to the user; must be flagged.
2. Be conservative: whenever there is meaningful ambiguity, broad or blanket language, unconstrained unilateral power, or potential for material loss, escalate to the higher-risk rating. If uncertain, choose the worse rating.
3. Produce output in machine-readable JSON (no extra prose). Keep items concise.

Required JSON schema:
{{
  "rating": "red|yellow|green",
  "severity": 1,
  "rationale": "concise explanation pointing to specific risky language and how it creates harm",
  "risky_phrases": ["exact short quotes from the clause that trigger concern"],
  "risk_types": ["Financial", "Liability", "Privacy", "IP", "Operational", "Regulatory", "Other"],
  "confidence": "high|medium|low"
}}

Evaluation cues:
- Red flags: unlimited or uncapped indemnity, waiver of statutory rights, irrevocable IP assignment without compensation, unilateral amendment rights without notice, automatic renewal with penalty.
- Yellow cues: ambiguous terms ("reasonable", "as necessary"), open-ended obligations, one-sided obligations without remedies, vague timelines.
- Green cues: plain, narrow, reciprocal, time-bound, capped liability, clear termination and remedy paths.

Do not invent statutes or legal precedent. Do not give jurisdiction-specific legal advice.

CLAUSE:
{clause_text}
"#
    )
}

pub(crate) fn negotiation_prompt(
    clause_text: &str,
    current_risk: RiskRating,
    stance: Stance,
) -> String {
    format!(
        r#"You are a contract negotiation assistant.
The following clause is under review:

Original clause:
"""{clause_text}"""

Stance: {directive}
Current risk level: {risk}

Instructions:
1. Rewrite the clause to make it less harmful for the reviewing party while maintaining realism.
2. Explain how the rewritten clause improves the reviewing party's position.
3. Suggest a new risk level (red, yellow, green) after applying the rewritten clause.

Respond strictly in JSON with these keys:
{{
  "rewritten_clause": "...",
  "explanation": "...",
  "risk_after": "red|yellow|green"
}}
"#,
        directive = stance_directive(stance),
        risk = current_risk,
    )
}

/// Builds the chat prompt: the full ordered clause context with 1-based
/// citation labels, the bounded recent history oldest-first, then the new
/// question.
pub(crate) fn chat_prompt(clauses: &[String], recent_turns: &[Turn], question: &str) -> String {
    let mut prompt = String::from(
        "You are a helpful legal assistant that answers questions about contracts in plain English. \
         Keep answers short and cite clauses by their number.\n\nContract clauses:\n",
    );

    for (position, clause) in clauses.iter().enumerate() {
        prompt.push_str(&format!("[Clause {}] {}\n", position + 1, clause));
    }

    if !recent_turns.is_empty() {
        prompt.push_str("\nConversation so far:\n");
        for turn in recent_turns {
            let speaker = match turn.role {
                TurnRole::User => "User",
                TurnRole::Assistant => "Assistant",
            };
            prompt.push_str(&format!("{}: {}\n", speaker, turn.content));
        }
    }

    prompt.push_str(&format!("\nQuestion: {}\n", question));
    prompt
}

pub(crate) fn ghost_prompt(contract_text: &str) -> String {
    format!(
        r#"You are a legal contract analyzer. Analyze the following text and identify clauses that are missing but should be present in a standard contract which can help the user not fall into trouble.
Give at most 5 missing clauses. Make sure not to repeat any clause. Give only important clauses. When in doubt, leave it out.
Reply ONLY with a JSON array of objects in this format:
[
  {{
    "clause_name": "Name of the missing clause",
    "description": "Brief description of the clause",
    "reason": "Reason why this clause is important"
  }}
]
Do not include any text outside the JSON array.

Contract text:
{contract_text}
"#
    )
}
