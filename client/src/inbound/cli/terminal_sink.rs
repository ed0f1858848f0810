//! Notification sink for terminal sessions.

use std::io::{self, Write};
use std::sync::Arc;

use crate::domain::Notification;
use crate::domain::ports::NotificationSink;
use crate::outbound::notifications::{ToastBoard, TracingNotificationSink};

/// Forwards notifications to tracing and the toast board, optionally echoing
/// them to stderr as they arrive.
///
/// One-shot commands echo; live screens read the board instead.
pub struct TerminalNotificationSink {
    board: Arc<ToastBoard>,
    echo: bool,
}

impl TerminalNotificationSink {
    /// Build a sink feeding `board`.
    pub fn new(board: Arc<ToastBoard>, echo: bool) -> Self {
        Self { board, echo }
    }
}

impl NotificationSink for TerminalNotificationSink {
    fn notify(&self, notification: Notification) {
        TracingNotificationSink.notify(notification.clone());
        if self.echo {
            let _ = writeln!(
                io::stderr().lock(),
                "{}: {}",
                notification.severity,
                notification.message
            );
        }
        self.board.notify(notification);
    }
}
