//! Platform adapters for the verifier.

use migrabook_domain::{Notification, NotificationLevel, Notifier};

/// Turns verifier notifications into tracing events on stderr.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let Notification {
            level,
            title,
            description,
        } = notification;
        match level {
            NotificationLevel::Info => tracing::info!(%title, "{description}"),
            NotificationLevel::Warning => tracing::warn!(%title, "{description}"),
            NotificationLevel::Error => tracing::error!(%title, "{description}"),
        }
    }
}
