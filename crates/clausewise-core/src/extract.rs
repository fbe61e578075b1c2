//! Structured-output extraction from free-form upstream text.
//!
//! The generation collaborator returns free text that is *expected* to
//! contain a single JSON object (or array), with no schema guarantee. The
//! rule, shared by every call site: take the greedy match from the first
//! opening delimiter to the last closing one, then attempt a structured
//! parse. Whether a failure becomes an error or a fallback is the caller's
//! policy, not this module's.

use crate::error::{ClausewiseError, Result};
use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::OnceLock;

fn object_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("hard-coded pattern compiles"))
}

fn array_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\[.*\]").expect("hard-coded pattern compiles"))
}

/// Returns the first `{...}` substring (greedy: first `{` to last `}`).
pub fn first_json_object(text: &str) -> Option<&str> {
    object_re().find(text).map(|m| m.as_str())
}

/// Returns the first `[...]` substring (greedy: first `[` to last `]`).
pub fn first_json_array(text: &str) -> Option<&str> {
    array_re().find(text).map(|m| m.as_str())
}

/// Extracts and deserializes the JSON object embedded in `text`.
///
/// # Errors
///
/// - `MalformedResponse` if no `{...}` substring exists or it does not
///   parse into `T`
pub fn parse_embedded_object<T: DeserializeOwned>(text: &str) -> Result<T> {
    let raw = first_json_object(text)
        .ok_or_else(|| ClausewiseError::malformed("no JSON object in response"))?;
    serde_json::from_str(raw)
        .map_err(|e| ClausewiseError::malformed(format!("JSON object did not parse: {}", e)))
}

/// Extracts and deserializes the JSON array embedded in `text`.
///
/// # Errors
///
/// - `MalformedResponse` if no `[...]` substring exists or it does not
///   parse into `T`
pub fn parse_embedded_array<T: DeserializeOwned>(text: &str) -> Result<T> {
    let raw = first_json_array(text)
        .ok_or_else(|| ClausewiseError::malformed("no JSON array in response"))?;
    serde_json::from_str(raw)
        .map_err(|e| ClausewiseError::malformed(format!("JSON array did not parse: {}", e)))
}
