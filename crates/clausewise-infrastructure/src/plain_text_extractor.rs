//! Built-in extraction collaborator for plain-text input.
//!
//! PDF text-layer extraction, DOCX paragraph extraction and image OCR are
//! external collaborators; this in-tree implementation only decodes plain
//! text and reports a typed extraction failure for everything else, so the
//! ingestion pipeline's failure path is exercised end to end without any
//! external dependency.

use async_trait::async_trait;
use clausewise_core::collaborator::{DocumentKind, TextExtractor};
use clausewise_core::error::{ClausewiseError, Result};

pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, bytes: &[u8], kind: DocumentKind) -> Result<String> {
        match kind {
            DocumentKind::PlainText => Ok(String::from_utf8_lossy(bytes).into_owned()),
            other => Err(ClausewiseError::extraction(format!(
                "no built-in extractor for {} input; configure an external extraction collaborator",
                other.as_str()
            ))),
        }
    }
}
