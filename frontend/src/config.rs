//! Application configuration.
//!
//! Centralized configuration for the Observatório BPC frontend. Upload
//! timing lives in [`bpc_uploader::config`]; only view-level settings are
//! kept here.

/// Application name shown in the navbar and page title.
pub const APP_NAME: &str = "Observatório BPC";

/// Maximum toasts kept on screen.
pub const MAX_TOAST_ENTRIES: usize = 5;

/// Locale used for toast timestamps.
pub const TIME_LOCALE: &str = "pt-BR";

/// Default id of the hidden file input.
pub const DEFAULT_INPUT_ID: &str = "file-upload";
