//! Toast notifier backed by a Leptos signal.

use bpc_uploader::{Notification, Notifier};
use leptos::*;

use crate::{ToastEntry, MAX_TOAST_ENTRIES, TIME_LOCALE};

/// Pushes notifications into the toast list signal.
///
/// `Copy`, so it can be handed to every component and uploader.
#[derive(Clone, Copy)]
pub struct ToastNotifier {
    set_toasts: WriteSignal<Vec<ToastEntry>>,
    next_id: StoredValue<u64>,
}

impl ToastNotifier {
    pub fn new(set_toasts: WriteSignal<Vec<ToastEntry>>) -> Self {
        Self {
            set_toasts,
            next_id: store_value(0),
        }
    }

    /// Remove one toast.
    pub fn dismiss(&self, id: u64) {
        self.set_toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    /// Remove every toast.
    pub fn clear(&self) {
        self.set_toasts.set(Vec::new());
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notification: Notification) {
        log::info!("🔔 {}: {}", notification.title, notification.description);

        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        let entry = ToastEntry {
            id,
            notification,
            timestamp: now_time(),
        };

        self.set_toasts.update(|toasts| {
            toasts.push(entry);
            // Keep max toasts on screen
            if toasts.len() > MAX_TOAST_ENTRIES {
                toasts.remove(0);
            }
        });
    }
}

fn now_time() -> String {
    js_sys::Date::new_0()
        .to_locale_time_string(TIME_LOCALE)
        .as_string()
        .unwrap_or_else(|| "00:00:00".to_string())
}
