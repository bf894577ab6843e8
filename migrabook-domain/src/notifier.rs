//! User-facing notification side channel.
//!
//! Verifier operations never fail; when something needs the customer's
//! attention (a crashed verification, the auto-connect stub) a [`Notification`]
//! goes out through the [`Notifier`] the platform layer injected. In the web
//! app this becomes a toast; the CLI turns it into a tracing event.

use serde::Serialize;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(
        level: NotificationLevel,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Delivers notifications to whoever is watching the verification.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the `log` facade. Used when no UI is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        let Notification {
            level,
            title,
            description,
        } = notification;
        match level {
            NotificationLevel::Info => log::info!("{title}: {description}"),
            NotificationLevel::Warning => log::warn!("{title}: {description}"),
            NotificationLevel::Error => log::error!("{title}: {description}"),
        }
    }
}
