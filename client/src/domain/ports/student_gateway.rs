//! Driven port for the remote student collection.
//!
//! The domain owns the operation contract and the failure taxonomy so the
//! controller stays transport-agnostic. Adapters map every failure into one of
//! the [`StudentGatewayError`] variants.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{NewStudent, StudentId, StudentRecord};

/// Coarse failure classification shared by every remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The call never produced a response (network, DNS, timeout).
    Transport,
    /// A response arrived with a non-success status.
    Protocol,
    /// A success status arrived with an unexpected body.
    PayloadShape,
}

/// Errors surfaced by student gateway adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudentGatewayError {
    /// Network transport failed before a response was received.
    #[error("roster transport failed: {message}")]
    Transport { message: String },
    /// The HTTP client gave up waiting for a response.
    #[error("roster request timed out: {message}")]
    Timeout { message: String },
    /// The roster service answered with an unacceptable status.
    #[error("roster service returned status {status}: {message}")]
    Protocol { status: u16, message: String },
    /// The response body did not have the expected shape.
    #[error("roster response had unexpected shape: {message}")]
    PayloadShape { message: String },
}

impl StudentGatewayError {
    /// Helper for transport failures.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Helper for client-side timeouts.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Helper for unacceptable status codes.
    pub fn protocol(status: u16, message: impl Into<String>) -> Self {
        Self::Protocol {
            status,
            message: message.into(),
        }
    }

    /// Helper for payload-shape failures.
    pub fn payload_shape(message: impl Into<String>) -> Self {
        Self::PayloadShape {
            message: message.into(),
        }
    }

    /// Classify the failure. Timeouts count as transport failures.
    ///
    /// # Examples
    /// ```
    /// use roster_client::domain::ports::{FailureKind, StudentGatewayError};
    ///
    /// assert_eq!(StudentGatewayError::timeout("slow").kind(), FailureKind::Transport);
    /// assert_eq!(StudentGatewayError::protocol(500, "boom").kind(), FailureKind::Protocol);
    /// ```
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transport { .. } | Self::Timeout { .. } => FailureKind::Transport,
            Self::Protocol { .. } => FailureKind::Protocol,
            Self::PayloadShape { .. } => FailureKind::PayloadShape,
        }
    }

    /// HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Typed result of any remote roster call.
pub type OperationOutcome<T> = Result<T, StudentGatewayError>;

/// Port for the remote student collection and its authorization endpoint.
///
/// Every call is expected to attach a freshly read anti-forgery token and the
/// session credentials. Adapters must not retry on their own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentGateway: Send + Sync {
    /// Fetch the whole collection in server order.
    ///
    /// A success status with a body that is not a sequence of records is a
    /// [`StudentGatewayError::PayloadShape`] failure, never an empty list.
    async fn list_all(&self) -> OperationOutcome<Vec<StudentRecord>>;

    /// Create a student. Any 2xx status is a success; the body is ignored.
    async fn create(&self, student: &NewStudent) -> OperationOutcome<()>;

    /// Delete the student with `id`. Any 2xx status is a success.
    async fn remove(&self, id: &StudentId) -> OperationOutcome<()>;

    /// Ask whether the caller holds administrative rights.
    ///
    /// Succeeds only when the service answers exactly HTTP 200; every other
    /// status is a [`StudentGatewayError::Protocol`] failure.
    async fn check_authorization(&self) -> OperationOutcome<()>;
}

/// Fixture gateway with an empty collection that never grants authorization.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureStudentGateway;

#[async_trait]
impl StudentGateway for FixtureStudentGateway {
    async fn list_all(&self) -> OperationOutcome<Vec<StudentRecord>> {
        Ok(Vec::new())
    }

    async fn create(&self, _student: &NewStudent) -> OperationOutcome<()> {
        Ok(())
    }

    async fn remove(&self, _id: &StudentId) -> OperationOutcome<()> {
        Ok(())
    }

    async fn check_authorization(&self) -> OperationOutcome<()> {
        Err(StudentGatewayError::protocol(403, "fixture gateway grants no rights"))
    }
}
