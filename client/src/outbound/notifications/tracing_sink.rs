//! Sink that records notifications as structured log events.

use tracing::{info, warn};

use crate::domain::ports::NotificationSink;
use crate::domain::{Notification, Severity};

/// Emits each notification as a tracing event.
///
/// Successes log at `info`, failures at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Success => info!(message = %notification.message, "roster notification"),
            Severity::Failure => warn!(message = %notification.message, "roster notification"),
        }
    }
}
