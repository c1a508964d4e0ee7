//! Observatório BPC - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend where staff upload documents (PDF, JPEG, PNG)
//! and attach them to associates of the observatory.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (navigation)                                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── DocumentUploadPage                                     │
//! │  │   ├── associate / type / description form                │
//! │  │   ├── FileUploader (drop zone + UploadProgress)          │
//! │  │   └── document list of the selected associate            │
//! │  └── ToastPanel                                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (ToastEntry, AppError)
//! - [`components`] - UI components (Header, FileUploader, ToastPanel, etc.)
//! - [`services`] - Browser glue (file lists, toast notifier)

use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Toasts
    ToastEntry,
    // Errors
    AppError, AppResult,
};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Observatório BPC - Starting Leptos App");

    // Mount the application
    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                    <Route path="/documentos/upload" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    // Toasts shared by the uploader and the document list
    let (toasts, set_toasts) = create_signal(Vec::<ToastEntry>::new());
    let notifier = ToastNotifier::new(set_toasts);

    view! {
        <Header/>

        <DocumentUploadPage notifier=notifier/>

        <ToastPanel toasts=toasts notifier=notifier/>

        <Footer/>
    }
}
