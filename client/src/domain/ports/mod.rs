//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Ports describe how the controller expects to interact with driven
//! adapters (the roster service, the token store, notification surfaces and
//! the user's confirmation). Each remote operation exposes a strongly typed
//! error so adapters map their failures into predictable variants.

mod anti_forgery_token;
mod confirmation_prompt;
mod notification_sink;
mod student_gateway;

pub use anti_forgery_token::{AntiForgeryToken, AntiForgeryTokenSource, NoAntiForgeryToken};
pub use confirmation_prompt::{ConfirmationPrompt, FixedConfirmation};
#[cfg(test)]
pub use confirmation_prompt::MockConfirmationPrompt;
pub use notification_sink::{DiscardNotifications, NotificationSink};
pub use student_gateway::{
    FailureKind, FixtureStudentGateway, OperationOutcome, StudentGateway, StudentGatewayError,
};
#[cfg(test)]
pub use student_gateway::MockStudentGateway;
