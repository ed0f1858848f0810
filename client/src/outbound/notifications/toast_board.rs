//! Auto-dismissing notification board.
//!
//! Mirrors the transient toast strip a roster screen shows: every notification
//! is displayed for a fixed lifetime, then disappears. Time is read from an
//! injected [`Clock`] so expiry is testable without sleeping.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::Notification;
use crate::domain::ports::NotificationSink;

/// Lifetime of a toast unless configured otherwise.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(1500);

/// A notification pinned to the moment it was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Monotonic identifier, unique per board.
    pub id: u64,
    /// The displayed notification.
    pub notification: Notification,
    /// When the notification was raised.
    pub raised_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Shelf {
    toasts: Vec<Toast>,
    next_id: u64,
}

/// Holds notifications until their lifetime elapses.
pub struct ToastBoard {
    clock: Arc<dyn Clock + Send + Sync>,
    lifetime: TimeDelta,
    shelf: Mutex<Shelf>,
}

impl ToastBoard {
    /// Board whose toasts live for `lifetime`.
    pub fn new(clock: Arc<dyn Clock + Send + Sync>, lifetime: Duration) -> Self {
        Self {
            clock,
            lifetime: TimeDelta::from_std(lifetime).unwrap_or(TimeDelta::MAX),
            shelf: Mutex::new(Shelf::default()),
        }
    }

    /// Board using [`DEFAULT_TOAST_DURATION`].
    pub fn with_default_lifetime(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self::new(clock, DEFAULT_TOAST_DURATION)
    }

    /// Toasts still visible now, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        let now = self.clock.utc();
        self.lock()
            .toasts
            .iter()
            .filter(|toast| self.is_live(toast, now))
            .cloned()
            .collect()
    }

    /// Drop expired toasts, returning how many were removed.
    pub fn prune(&self) -> usize {
        let now = self.clock.utc();
        let mut shelf = self.lock();
        let before = shelf.toasts.len();
        shelf.toasts.retain(|toast| self.is_live(toast, now));
        before - shelf.toasts.len()
    }

    fn is_live(&self, toast: &Toast, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(toast.raised_at) < self.lifetime
    }

    fn lock(&self) -> MutexGuard<'_, Shelf> {
        self.shelf.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationSink for ToastBoard {
    fn notify(&self, notification: Notification) {
        let raised_at = self.clock.utc();
        let mut shelf = self.lock();
        let id = shelf.next_id;
        shelf.next_id += 1;
        shelf.toasts.push(Toast {
            id,
            notification,
            raised_at,
        });
    }
}
