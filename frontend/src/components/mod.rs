//! UI Components for the Observatório BPC application.
//!
//! # Layout Components
//! - [`Header`] - Navigation bar
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`FileUploader`] - Drag & drop upload with simulated progress
//! - [`UploadProgress`] - Progress bar for a running session
//! - [`ToastPanel`] - Upload and document notifications
//! - [`DocumentUploadPage`] - Attach uploaded files to associates

mod header;
mod footer;
mod uploader;
mod progress;
mod toasts;
mod documents;

pub use header::*;
pub use footer::*;
pub use uploader::*;
pub use progress::*;
pub use toasts::*;
pub use documents::*;
