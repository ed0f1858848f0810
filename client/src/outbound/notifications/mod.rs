//! Notification sink adapters.

mod toast_board;
mod tracing_sink;

pub use toast_board::{DEFAULT_TOAST_DURATION, Toast, ToastBoard};
pub use tracing_sink::TracingNotificationSink;
