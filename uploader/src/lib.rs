//! # BPC Uploader - Simulated document uploads
//!
//! Validates files picked by a user against an upload policy, simulates the
//! transfer with a progress bar that ticks towards 100%, then hands the
//! accepted files to the caller.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Candidates  │────▶│ Validation  │────▶│   Session   │────▶│ on_accepted │
//! │ (name/type/ │     │  (policy)   │     │ (ticks 0→100│     │  (registry) │
//! │    size)    │     │             │     │   + delay)  │     │             │
//! └─────────────┘     └──────┬──────┘     └──────┬──────┘     └─────────────┘
//!                            │ rejections        │ completion
//!                            ▼                   ▼
//!                     ┌─────────────────────────────────┐
//!                     │        Notifier (toasts)        │
//!                     └─────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bpc_uploader::{CandidateFile, LogNotifier, UploadPolicy, Uploader};
//!
//! #[tokio::main]
//! async fn main() {
//!     let uploader = Uploader::new(UploadPolicy::default(), LogNotifier);
//!     let files = vec![CandidateFile::new("laudo.pdf", "application/pdf", 2 * 1024 * 1024)];
//!     let outcome = uploader
//!         .upload(files, tokio::time::sleep, |p| println!("{}", p), |files| {
//!             println!("{} file(s) uploaded", files.len());
//!         })
//!         .await;
//!     println!("{:?}", outcome);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Rejections and submission errors
//! - [`config`] - Timing constants and environment configuration
//! - [`models`] - Candidate files, policy, progress state
//! - [`validation`] - Policy checks
//! - [`progress`] - Progress sources and meter
//! - [`notify`] - Notification port and implementations
//! - [`session`] - Uploader and upload sessions
//! - [`documents`] - Associate document registry

// Core modules
pub mod error;
pub mod config;
pub mod models;

// Upload pipeline
pub mod validation;
pub mod progress;
pub mod notify;
pub mod session;

// Host side
pub mod documents;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{
    Rejection,
    UploadError,
    UploadResult,
    DocumentError,
    DocumentResult,
    ConfigError,
    ConfigResult,
};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::{Timing, UploaderConfig};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{CandidateFile, UploadPolicy, Progress};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use validation::{validate_file, screen, screen_with, Screening};

pub use progress::{ProgressSource, RandomProgress, FixedProgress, ProgressMeter};

pub use notify::{
    Notification,
    NotificationLevel,
    Notifier,
    LogNotifier,
    MemoryNotifier,
};

pub use session::{
    Uploader,
    UploadSession,
    SessionHandle,
    SessionOutcome,
    CancelGuard,
};

// =============================================================================
// Re-exports - Documents
// =============================================================================

pub use documents::{
    Associate,
    AssociateDocument,
    DocumentRegistry,
    DocumentType,
    format_size,
};
