//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Toast Types** - Notifications rendered by the toast panel
//! - **Error Types** - Frontend error handling

use bpc_uploader::{DocumentError, Notification, NotificationLevel, UploadError};
use std::fmt;

// =============================================================================
// Toast Types
// =============================================================================

/// A notification as displayed on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct ToastEntry {
    /// Monotonic id, used as list key
    pub id: u64,
    /// The notification itself
    pub notification: Notification,
    /// Timestamp string (HH:MM:SS)
    pub timestamp: String,
}

impl ToastEntry {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self.notification.level {
            NotificationLevel::Success => "toast toast-success",
            NotificationLevel::Error => "toast toast-destructive",
        }
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
#[derive(Clone, Debug)]
pub enum AppError {
    /// Submission refused by the uploader.
    Upload(UploadError),
    /// Registry operation failed.
    Document(DocumentError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Upload(err) => write!(f, "Upload error: {}", err),
            AppError::Document(err) => write!(f, "Document error: {}", err),
        }
    }
}

impl std::error::Error for AppError {}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        AppError::Upload(err)
    }
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        AppError::Document(err)
    }
}

impl AppError {
    /// Toast for this error, when the user has not been told already.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            AppError::Upload(err) => err.notification(),
            AppError::Document(DocumentError::MissingSelection) => Some(Notification::error(
                "Erro",
                "Por favor, selecione um associado e o tipo de documento.",
            )),
            AppError::Document(err) => Some(Notification::error("Erro", err.to_string())),
        }
    }
}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;
