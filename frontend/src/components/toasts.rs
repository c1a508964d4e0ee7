//! Toast panel for upload and document notifications.

use leptos::*;

use crate::services::ToastNotifier;
use crate::ToastEntry;

/// Stack of current toasts, newest last.
#[component]
pub fn ToastPanel(
    /// Signal for toasts data
    toasts: ReadSignal<Vec<ToastEntry>>,
    /// Notifier owning the list (for dismissing)
    notifier: ToastNotifier,
) -> impl IntoView {
    view! {
        <Show
            when=move || !toasts.get().is_empty()
            fallback=|| view! { }
        >
            <div class="toast-panel" role="status" aria-live="polite">
                <For
                    each=move || toasts.get()
                    key=|entry| entry.id
                    children=move |entry| {
                        let id = entry.id;
                        view! {
                            <div class=entry.css_class()>
                                <div class="toast-header">
                                    <span class="toast-title">{entry.notification.title.clone()}</span>
                                    <span class="toast-time">{entry.timestamp.clone()}</span>
                                    <button
                                        class="toast-close"
                                        aria-label="Fechar"
                                        on:click=move |_| notifier.dismiss(id)
                                    >
                                        "×"
                                    </button>
                                </div>
                                <div class="toast-description">{entry.notification.description.clone()}</div>
                            </div>
                        }
                    }
                />
                <button class="toast-clear" on:click=move |_| notifier.clear()>
                    "Limpar"
                </button>
            </div>
        </Show>
    }
}
