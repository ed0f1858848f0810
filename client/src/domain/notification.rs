//! User-facing notifications emitted by the controller.

use std::fmt;

/// Severity tier of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The operation completed.
    Success,
    /// The operation failed.
    Failure,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Failure => f.write_str("failure"),
        }
    }
}

/// A short-lived message describing an operation outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity tier.
    pub severity: Severity,
    /// Human-readable text.
    pub message: String,
}

impl Notification {
    /// Build a success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    /// Build a failure notification.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Failure,
            message: message.into(),
        }
    }
}
