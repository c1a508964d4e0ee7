//! Error types for the upload simulator.
//!
//! - [`Rejection`] - Why a single candidate file was refused
//! - [`UploadError`] - Why a submission did not start a session
//! - [`DocumentError`] - Associate document registry errors
//! - [`ConfigError`] - Invalid environment configuration
//!
//! None of these are fatal: every variant is reported to the user and the
//! uploader stays usable.

use thiserror::Error;

// =============================================================================
// Validation Rejections
// =============================================================================

/// A candidate file that failed the upload policy.
///
/// Rejections are local to one file; sibling files in the same submission
/// are still considered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// MIME type is not in the policy allow-list.
    #[error("File '{name}' has unsupported type '{mime_type}'")]
    UnsupportedType { name: String, mime_type: String },

    /// File exceeds the policy size ceiling.
    #[error("File '{name}' is too large ({size_bytes} bytes, max {max_size_bytes})")]
    TooLarge {
        name: String,
        size_bytes: u64,
        max_size_bytes: u64,
    },
}

impl Rejection {
    /// Name of the rejected file.
    pub fn file_name(&self) -> &str {
        match self {
            Rejection::UnsupportedType { name, .. } => name,
            Rejection::TooLarge { name, .. } => name,
        }
    }
}

// =============================================================================
// Submission Errors
// =============================================================================

/// Reasons a call to [`crate::Uploader::submit`] did not start a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// No file survived validation (or none were supplied).
    #[error("No file accepted ({} rejected)", rejected.len())]
    EmptySubmission { rejected: Vec<Rejection> },

    /// Another session is still running on this uploader.
    #[error("An upload session is already in progress")]
    SessionActive,
}

// =============================================================================
// Document Registry Errors
// =============================================================================

/// Errors from the associate document registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// Associate or document type was not chosen.
    #[error("An associate and a document type must be selected")]
    MissingSelection,

    /// No associate with this id.
    #[error("Unknown associate: {0}")]
    UnknownAssociate(String),

    /// No document with this id.
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Unrecognised document type slug.
    #[error("Unknown document type: {0}")]
    UnknownDocumentType(String),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable could not be parsed.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    /// The allow-list ended up empty.
    #[error("At least one MIME type must be allowed")]
    EmptyAllowList,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for submissions.
pub type UploadResult<T> = Result<T, UploadError>;

/// Result type for registry operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        let err = Rejection::TooLarge {
            name: "scan.png".into(),
            size_bytes: 6 * 1024 * 1024,
            max_size_bytes: 5 * 1024 * 1024,
        };
        let msg = err.to_string();
        assert!(msg.contains("scan.png"));
        assert!(msg.contains("5242880"));
        assert_eq!(err.file_name(), "scan.png");
    }

    #[test]
    fn test_empty_submission_counts_rejections() {
        let err = UploadError::EmptySubmission {
            rejected: vec![Rejection::UnsupportedType {
                name: "a.gif".into(),
                mime_type: "image/gif".into(),
            }],
        };
        assert!(err.to_string().contains("1 rejected"));
    }
}
