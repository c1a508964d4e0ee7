//! Browser-side services.
//!
//! # Services
//!
//! - [`files`] - Turn `FileList`s into upload candidates
//! - [`toasts`] - Notifier that feeds the toast panel

pub mod files;
pub mod toasts;

pub use files::*;
pub use toasts::*;
