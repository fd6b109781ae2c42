//! User-facing notification channel.

use serde::Serialize;

/// Receives exactly one notification per simulation attempt.
pub trait Notifier {
    /// Report a rejected simulation.
    fn notify_error(&mut self, message: &str);
    /// Report a recorded simulation.
    fn notify_success(&mut self, message: &str);
}

/// Which channel a notification went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Success channel.
    Success,
    /// Error channel.
    Error,
}

/// A captured notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Channel.
    pub kind: NotificationKind,
    /// Message text.
    pub message: String,
}

/// Notifier that keeps every message in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    /// Captured notifications, oldest first.
    pub notifications: Vec<Notification>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent notification.
    pub fn last(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    /// Drain all captured notifications.
    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn push(&mut self, kind: NotificationKind, message: &str) {
        self.notifications.push(Notification {
            kind,
            message: message.to_string(),
        });
    }
}

impl Notifier for RecordingNotifier {
    fn notify_error(&mut self, message: &str) {
        self.push(NotificationKind::Error, message);
    }

    fn notify_success(&mut self, message: &str) {
        self.push(NotificationKind::Success, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut n = RecordingNotifier::new();
        n.notify_error("bad");
        n.notify_success("good");
        assert_eq!(n.notifications.len(), 2);
        assert_eq!(n.notifications[0].kind, NotificationKind::Error);
        assert_eq!(n.last().unwrap().message, "good");
        assert_eq!(n.take().len(), 2);
        assert!(n.notifications.is_empty());
    }
}
