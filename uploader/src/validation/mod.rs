//! Upload policy validation.
//!
//! Each candidate is checked on its own, in input order:
//!
//! 1. MIME type must be in the allow-list, else [`Rejection::UnsupportedType`]
//! 2. Size must not exceed the ceiling, else [`Rejection::TooLarge`]
//!
//! A file failing both checks is reported once, for its type. When the policy
//! does not allow multiple files, only the first candidate is looked at.
//!
//! # Example
//!
//! ```rust
//! use bpc_uploader::{screen, CandidateFile, UploadPolicy};
//!
//! let files = vec![
//!     CandidateFile::new("laudo.pdf", "application/pdf", 1024),
//!     CandidateFile::new("foto.gif", "image/gif", 1024),
//! ];
//! let screening = screen(files, &UploadPolicy::default().multiple());
//! assert_eq!(screening.accepted.len(), 1);
//! assert_eq!(screening.rejected.len(), 1);
//! ```

use crate::error::Rejection;
use crate::models::{CandidateFile, UploadPolicy};

/// Outcome of screening a submission.
#[derive(Debug, Clone)]
pub struct Screening<H> {
    /// Files that passed, in input order
    pub accepted: Vec<CandidateFile<H>>,
    /// Rejections, in input order
    pub rejected: Vec<Rejection>,
    /// Candidates skipped because the policy takes a single file
    pub ignored: usize,
}

/// Check one file against the policy.
pub fn validate_file<H>(file: &CandidateFile<H>, policy: &UploadPolicy) -> Result<(), Rejection> {
    if !policy.allows_type(file.mime_type()) {
        return Err(Rejection::UnsupportedType {
            name: file.name().to_string(),
            mime_type: file.mime_type().to_string(),
        });
    }

    if file.size_bytes() > policy.max_size_bytes {
        return Err(Rejection::TooLarge {
            name: file.name().to_string(),
            size_bytes: file.size_bytes(),
            max_size_bytes: policy.max_size_bytes,
        });
    }

    Ok(())
}

/// Split a submission into accepted files and rejections.
pub fn screen<H>(files: Vec<CandidateFile<H>>, policy: &UploadPolicy) -> Screening<H> {
    screen_with(files, policy, |_| {})
}

/// Like [`screen`], calling `on_reject` as soon as each rejection is found.
pub fn screen_with<H, F>(
    files: Vec<CandidateFile<H>>,
    policy: &UploadPolicy,
    mut on_reject: F,
) -> Screening<H>
where
    F: FnMut(&Rejection),
{
    let total = files.len();
    let considered = if policy.allow_multiple { total } else { total.min(1) };

    let mut accepted = Vec::with_capacity(considered);
    let mut rejected = Vec::new();

    for file in files.into_iter().take(considered) {
        match validate_file(&file, policy) {
            Ok(()) => accepted.push(file),
            Err(rejection) => {
                on_reject(&rejection);
                rejected.push(rejection);
            }
        }
    }

    Screening {
        accepted,
        rejected,
        ignored: total - considered,
    }
}
