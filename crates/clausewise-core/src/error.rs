//! Error types for the Clausewise engine.

use thiserror::Error;

/// A shared error type for the entire Clausewise engine.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Every error condition a
/// transport layer needs to distinguish (not-found vs. bad-request vs.
/// upstream-failure) maps to its own variant.
#[derive(Error, Debug, Clone)]
pub enum ClausewiseError {
    /// No document is stored under the given uid.
    #[error("document not found: '{uid}'")]
    DocumentNotFound { uid: String },

    /// The document exists but has no clause at the given index.
    #[error("clause {index} not found in document '{uid}'")]
    ClauseNotFound { uid: String, index: usize },

    /// No session is stored under the given id.
    #[error("session not found: '{id}'")]
    SessionNotFound { id: String },

    /// A document was already ingested under this uid with different content.
    #[error("document '{uid}' already ingested with conflicting content")]
    DocumentConflict { uid: String },

    /// The requested negotiation stance is not one of the valid values.
    #[error("invalid stance '{given}' (valid values: friendly, firm, aggressive)")]
    InvalidStance { given: String },

    /// Text extraction failed for the given input.
    #[error("text extraction failed: {reason}")]
    Extraction { reason: String },

    /// The external generation capability failed or timed out.
    #[error("upstream generation failed: {reason}")]
    UpstreamGeneration { reason: String },

    /// The external capability answered, but not in the expected shape.
    #[error("malformed upstream response: {reason}")]
    MalformedResponse { reason: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("internal error: {0}")]
    Internal(String),
}

impl ClausewiseError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn document_not_found(uid: impl Into<String>) -> Self {
        Self::DocumentNotFound { uid: uid.into() }
    }

    pub fn clause_not_found(uid: impl Into<String>, index: usize) -> Self {
        Self::ClauseNotFound {
            uid: uid.into(),
            index,
        }
    }

    pub fn session_not_found(id: impl Into<String>) -> Self {
        Self::SessionNotFound { id: id.into() }
    }

    pub fn invalid_stance(given: impl Into<String>) -> Self {
        Self::InvalidStance {
            given: given.into(),
        }
    }

    pub fn extraction(reason: impl Into<String>) -> Self {
        Self::Extraction {
            reason: reason.into(),
        }
    }

    pub fn upstream(reason: impl Into<String>) -> Self {
        Self::UpstreamGeneration {
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Classification for transport-level status mapping
    // ============================================================================

    /// True for conditions a transport layer should report as 404-equivalent.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DocumentNotFound { .. }
                | Self::ClauseNotFound { .. }
                | Self::SessionNotFound { .. }
        )
    }

    /// True for caller mistakes a transport layer should report as 400-equivalent.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidStance { .. } | Self::DocumentConflict { .. }
        )
    }

    /// True for failures of an external capability (502-equivalent).
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::UpstreamGeneration { .. }
                | Self::MalformedResponse { .. }
                | Self::Extraction { .. }
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ClausewiseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ClausewiseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ClausewiseError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ClausewiseError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ClausewiseError>`.
pub type Result<T> = std::result::Result<T, ClausewiseError>;
