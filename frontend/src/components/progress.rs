//! Upload progress indicator

use bpc_uploader::Progress;
use leptos::*;

/// Progress bar shown while a session runs; renders nothing when idle.
#[component]
pub fn UploadProgress(#[prop(into)] progress: Signal<Progress>) -> impl IntoView {
    view! {
        <Show
            when=move || progress.get().is_running()
            fallback=|| view! { }
        >
            {move || {
                let percent = progress.get().percent().unwrap_or(0);
                view! {
                    <div class="progress-section">
                        <div class="progress-labels">
                            <span>"Enviando..."</span>
                            <span>{format!("{}%", percent)}</span>
                        </div>
                        <div
                            class="progress-bar"
                            role="progressbar"
                            aria-valuemin="0"
                            aria-valuemax="100"
                            aria-valuenow=percent
                        >
                            <div class="progress-fill" style=format!("width: {}%;", percent)></div>
                        </div>
                    </div>
                }
            }}
        </Show>
    }
}
