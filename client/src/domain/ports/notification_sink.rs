//! Port for presenting transient operation notifications.

use crate::domain::Notification;

/// Fire-and-forget sink for user-visible notifications.
///
/// Notifications are independent: sinks impose no ordering or deduplication
/// beyond emission order.
pub trait NotificationSink: Send + Sync {
    /// Present one notification.
    fn notify(&self, notification: Notification);
}

/// Sink that drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardNotifications;

impl NotificationSink for DiscardNotifications {
    fn notify(&self, _notification: Notification) {}
}
