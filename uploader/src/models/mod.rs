//! Domain models for the upload simulator.
//!
//! # Types
//!
//! - [`CandidateFile`] - A file picked by the user, before validation
//! - [`UploadPolicy`] - Which files are acceptable
//! - [`Progress`] - Observable state of the progress indicator

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{DEFAULT_ALLOWED_TYPES, DEFAULT_MAX_SIZE_BYTES, MIB};

// =============================================================================
// Candidate File
// =============================================================================

/// A file selected for upload.
///
/// The payload itself is opaque: `H` is whatever handle the host uses to
/// reach the bytes (`web_sys::File` in the browser, a path in the CLI).
/// Metadata is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile<H = ()> {
    name: String,
    mime_type: String,
    size_bytes: u64,
    handle: H,
}

impl CandidateFile<()> {
    /// Candidate with no payload handle.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self::with_handle(name, mime_type, size_bytes, ())
    }
}

impl<H> CandidateFile<H> {
    /// Candidate carrying a host payload handle.
    pub fn with_handle(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: u64,
        handle: H,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
            handle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Give back the payload handle.
    pub fn into_handle(self) -> H {
        self.handle
    }
}

// =============================================================================
// Upload Policy
// =============================================================================

/// Rules a candidate must satisfy to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadPolicy {
    /// Accepted MIME types
    pub allowed_mime_types: Vec<String>,
    /// Per-file ceiling in bytes
    pub max_size_bytes: u64,
    /// Accept more than one file per submission
    pub allow_multiple: bool,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_mime_types: DEFAULT_ALLOWED_TYPES.iter().map(|t| t.to_string()).collect(),
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            allow_multiple: false,
        }
    }
}

impl UploadPolicy {
    /// Same policy, accepting several files per submission.
    pub fn multiple(mut self) -> Self {
        self.allow_multiple = true;
        self
    }

    /// Same policy with another size ceiling.
    pub fn with_max_size(mut self, max_size_bytes: u64) -> Self {
        self.max_size_bytes = max_size_bytes;
        self
    }

    /// Whether `mime_type` is in the allow-list (ASCII case-insensitive).
    pub fn allows_type(&self, mime_type: &str) -> bool {
        self.allowed_mime_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(mime_type))
    }

    /// Value for an `<input type="file" accept=...>` attribute.
    pub fn accept_attribute(&self) -> String {
        self.allowed_mime_types.join(",")
    }

    /// Ceiling in MB as shown to users ("5", "2.5").
    pub fn max_size_label(&self) -> String {
        if self.max_size_bytes % MIB == 0 {
            (self.max_size_bytes / MIB).to_string()
        } else {
            format!("{:.1}", self.max_size_bytes as f64 / MIB as f64)
        }
    }

    /// Hint line under the drop zone, e.g. `PDF, JPG ou PNG (max. 5MB)`.
    pub fn size_hint(&self) -> String {
        let labels: Vec<String> = self
            .allowed_mime_types
            .iter()
            .map(|t| type_label(t))
            .collect();

        let kinds = match labels.split_last() {
            None => String::new(),
            Some((last, [])) => last.clone(),
            Some((last, rest)) => format!("{} ou {}", rest.join(", "), last),
        };

        format!("{} (max. {}MB)", kinds, self.max_size_label())
    }
}

/// Short display label for a MIME type.
fn type_label(mime_type: &str) -> String {
    match mime_type.to_ascii_lowercase().as_str() {
        "application/pdf" => "PDF".to_string(),
        "image/jpeg" | "image/jpg" => "JPG".to_string(),
        "image/png" => "PNG".to_string(),
        other => other
            .rsplit('/')
            .next()
            .unwrap_or(other)
            .to_ascii_uppercase(),
    }
}

// =============================================================================
// Progress
// =============================================================================

/// State of the progress indicator exposed to the host view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "state", content = "percent")]
pub enum Progress {
    /// No session is running.
    #[default]
    Idle,
    /// A session is running at this percentage (0..=100).
    Running(u8),
}

impl Progress {
    pub fn is_running(&self) -> bool {
        matches!(self, Progress::Running(_))
    }

    /// Percentage, if running.
    pub fn percent(&self) -> Option<u8> {
        match self {
            Progress::Idle => None,
            Progress::Running(p) => Some(*p),
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Progress::Idle => write!(f, "idle"),
            Progress::Running(p) => write!(f, "{}%", p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = UploadPolicy::default();
        assert!(policy.allows_type("application/pdf"));
        assert!(policy.allows_type("IMAGE/PNG"));
        assert!(!policy.allows_type("image/gif"));
        assert_eq!(policy.max_size_bytes, 5 * 1024 * 1024);
        assert!(!policy.allow_multiple);
    }

    #[test]
    fn test_hint_and_accept() {
        let policy = UploadPolicy::default();
        assert_eq!(policy.size_hint(), "PDF, JPG ou PNG (max. 5MB)");
        assert_eq!(policy.accept_attribute(), "application/pdf,image/jpeg,image/png");

        let policy = UploadPolicy {
            allowed_mime_types: vec!["image/webp".into()],
            max_size_bytes: MIB * 5 / 2,
            allow_multiple: true,
        };
        assert_eq!(policy.size_hint(), "WEBP (max. 2.5MB)");
    }

    #[test]
    fn test_policy_deserialization_fills_defaults() {
        let policy: UploadPolicy = serde_json::from_str(r#"{"allowMultiple": true}"#).unwrap();
        assert!(policy.allow_multiple);
        assert_eq!(policy.allowed_mime_types.len(), 3);
    }

    #[test]
    fn test_progress_serialization() {
        let json = serde_json::to_string(&Progress::Running(40)).unwrap();
        assert_eq!(json, r#"{"state":"running","percent":40}"#);
        assert_eq!(Progress::Idle.percent(), None);
        assert_eq!(Progress::Running(7).to_string(), "7%");
    }
}
