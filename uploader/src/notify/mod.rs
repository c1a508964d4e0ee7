//! User-facing notifications (toasts).
//!
//! The uploader never talks to a global toast service; it is handed a
//! [`Notifier`] and reports every rejection and completion through it.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::config::MAX_NOTIFICATIONS;
use crate::error::{Rejection, UploadError};
use crate::models::UploadPolicy;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A single toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }

    /// Toast for a file refused by the policy.
    pub fn rejected(rejection: &Rejection, policy: &UploadPolicy) -> Self {
        let description = match rejection {
            Rejection::UnsupportedType { .. } => {
                "Tipo de arquivo não permitido. Por favor, envie um PDF ou imagem.".to_string()
            }
            Rejection::TooLarge { name, .. } if policy.allow_multiple => format!(
                "O arquivo {} é muito grande. O tamanho máximo permitido é {}MB.",
                name,
                policy.max_size_label()
            ),
            Rejection::TooLarge { .. } => format!(
                "O arquivo é muito grande. O tamanho máximo permitido é {}MB.",
                policy.max_size_label()
            ),
        };
        Self::error("Erro no upload", description)
    }

    /// Toast for a finished session.
    ///
    /// A multi-file uploader always reports a count, even for one file.
    pub fn completed<'a, I>(names: I, multiple: bool) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<&str> = names.into_iter().collect();
        let description = match names.as_slice() {
            [single] if !multiple => format!("O arquivo {} foi enviado com sucesso.", single),
            many => format!("{} arquivo(s) foram enviados com sucesso.", many.len()),
        };
        Self::success("Upload concluído", description)
    }

    /// Toast for a submission refused because a session is running.
    pub fn busy() -> Self {
        Self::error(
            "Upload em andamento",
            "Aguarde o envio atual terminar antes de enviar novos arquivos.",
        )
    }
}

impl UploadError {
    /// Toast to show for this error, if it was not already reported.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            UploadError::SessionActive => Some(Notification::busy()),
            // Rejections were already reported one by one
            UploadError::EmptySubmission { .. } => None,
        }
    }
}

/// Receives notifications from the uploader.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

impl<F> Notifier for F
where
    F: Fn(Notification),
{
    fn notify(&self, notification: Notification) {
        self(notification)
    }
}

/// Forwards notifications to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => {
                log::info!("✅ {}: {}", notification.title, notification.description)
            }
            NotificationLevel::Error => {
                log::warn!("❌ {}: {}", notification.title, notification.description)
            }
        }
    }
}

/// Keeps the latest notifications in memory.
///
/// Clones share the same list.
#[derive(Debug, Clone)]
pub struct MemoryNotifier {
    entries: Arc<Mutex<VecDeque<Notification>>>,
    capacity: usize,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::with_capacity(MAX_NOTIFICATIONS)
    }

    /// Keep at most `capacity` entries, dropping the oldest.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }

    /// Snapshot, oldest first.
    pub fn entries(&self) -> Vec<Notification> {
        match self.entries.lock() {
            Ok(entries) => entries.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    pub fn errors(&self) -> Vec<Notification> {
        self.entries().into_iter().filter(|n| n.is_error()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        match self.entries.lock() {
            Ok(mut entries) => entries.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl Default for MemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.push_back(notification);
        while entries.len() > self.capacity {
            entries.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIB;

    #[test]
    fn test_rejection_wording() {
        let policy = UploadPolicy::default().multiple();
        let n = Notification::rejected(
            &Rejection::TooLarge {
                name: "foto.png".into(),
                size_bytes: 6 * MIB,
                max_size_bytes: 5 * MIB,
            },
            &policy,
        );
        assert!(n.is_error());
        assert_eq!(n.title, "Erro no upload");
        assert_eq!(
            n.description,
            "O arquivo foto.png é muito grande. O tamanho máximo permitido é 5MB."
        );

        let n = Notification::rejected(
            &Rejection::UnsupportedType {
                name: "a.gif".into(),
                mime_type: "image/gif".into(),
            },
            &policy,
        );
        assert!(n.description.starts_with("Tipo de arquivo não permitido"));
    }

    #[test]
    fn test_single_file_size_rejection_omits_name() {
        let n = Notification::rejected(
            &Rejection::TooLarge {
                name: "foto.png".into(),
                size_bytes: 6 * MIB,
                max_size_bytes: 5 * MIB,
            },
            &UploadPolicy::default(),
        );
        assert_eq!(
            n.description,
            "O arquivo é muito grande. O tamanho máximo permitido é 5MB."
        );
    }

    #[test]
    fn test_completed_wording() {
        let one = Notification::completed(["laudo.pdf"], false);
        assert_eq!(one.description, "O arquivo laudo.pdf foi enviado com sucesso.");
        assert_eq!(one.level, NotificationLevel::Success);

        let many = Notification::completed(["a.pdf", "b.png"], true);
        assert_eq!(many.description, "2 arquivo(s) foram enviados com sucesso.");

        let one_of_many = Notification::completed(["laudo.pdf"], true);
        assert_eq!(one_of_many.description, "1 arquivo(s) foram enviados com sucesso.");
    }

    #[test]
    fn test_memory_notifier_is_bounded_and_shared() {
        let notifier = MemoryNotifier::with_capacity(2);
        let clone = notifier.clone();
        clone.notify(Notification::success("1", ""));
        clone.notify(Notification::error("2", ""));
        clone.notify(Notification::success("3", ""));

        let titles: Vec<_> = notifier.entries().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["2", "3"]);
        assert_eq!(notifier.errors().len(), 1);

        notifier.clear();
        assert!(clone.is_empty());
    }

    #[test]
    fn test_memory_notifier_recovers_from_poisoned_lock() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Notification::success("antes", ""));

        let entries = Arc::clone(&notifier.entries);
        let _ = std::thread::spawn(move || {
            let _guard = entries.lock().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(notifier.entries.is_poisoned());

        notifier.clear();
        assert!(notifier.is_empty());
        notifier.notify(Notification::success("depois", ""));
        assert_eq!(notifier.len(), 1);
    }

    #[test]
    fn test_closure_notifier() {
        let seen = std::cell::RefCell::new(Vec::new());
        let notifier = |n: Notification| seen.borrow_mut().push(n.title);
        notifier.notify(Notification::busy());
        assert_eq!(seen.into_inner(), vec!["Upload em andamento".to_string()]);
    }

    #[test]
    fn test_error_to_notification() {
        assert_eq!(
            UploadError::SessionActive.notification(),
            Some(Notification::busy())
        );
        assert!(UploadError::EmptySubmission { rejected: vec![] }
            .notification()
            .is_none());
    }
}
