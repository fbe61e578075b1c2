//! Collaborator traits for the external capabilities the engine depends on.
//!
//! Text extraction and generative-model calls are the only operations
//! expected to block for non-trivial wall-clock time. Both are modeled as
//! narrow async interfaces with a bounded timeout honored by the
//! implementation, and at most one attempt per logical request — the
//! capability is not guaranteed idempotent on the caller's billing or
//! rate-limit state, so retrying is the caller's explicit decision.

use crate::error::Result;
use async_trait::async_trait;

/// The declared type of an uploaded document, derived from its filename or
/// caller-supplied hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
    Image,
}

impl DocumentKind {
    /// Maps a declared filename or type hint to a kind. Anything not
    /// recognized is treated as plain text, matching the upload path's
    /// historical behavior.
    pub fn from_hint(hint: &str) -> DocumentKind {
        let lower = hint.trim().to_lowercase();
        if lower.ends_with(".pdf") || lower == "pdf" {
            DocumentKind::Pdf
        } else if lower.ends_with(".docx") || lower == "docx" {
            DocumentKind::Docx
        } else if lower.ends_with(".png")
            || lower.ends_with(".jpg")
            || lower.ends_with(".jpeg")
            || lower.ends_with(".webp")
            || lower == "image"
        {
            DocumentKind::Image
        } else {
            DocumentKind::PlainText
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
            DocumentKind::PlainText => "text",
            DocumentKind::Image => "image",
        }
    }
}

/// Extraction collaborator: raw document bytes in, plain text out.
///
/// Any failure means "no clauses ingested" — the ingestion pipeline never
/// persists partial output from a failed extraction.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, bytes: &[u8], kind: DocumentKind) -> Result<String>;
}

/// Generation collaborator: prompt text in, free-form response text out.
///
/// Classification, negotiation and chat all ride on this one interface.
/// The response carries no schema guarantee; callers defend against
/// malformed output with the shared extraction utility.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
