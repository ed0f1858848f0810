//! Domain controller that keeps the student snapshot in sync with the
//! roster service.
//!
//! The controller owns the collection snapshot and the authorization state,
//! drives the gateway, and reports outcomes through the notification sink.
//! List, mutation and authorization calls are independent: none of them
//! waits for or cancels another, so overlapping refreshes resolve in
//! completion order and the last one to finish wins. Mutations never patch
//! the snapshot locally; a successful write is followed by a full refresh.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::domain::ports::{
    ConfirmationPrompt, FailureKind, NotificationSink, OperationOutcome, StudentGateway,
    StudentGatewayError,
};
use crate::domain::{AuthorizationState, NewStudent, Notification, StudentId, StudentRecord};

mod state;
mod view;

use state::{InFlight, ListState, lock};
pub use view::{RowActions, StudentListView, StudentRow};

/// Failure text for list fetches and failed authorization transports.
pub const FETCH_FAILED_MESSAGE: &str = "Fetch failed.";
/// Success text after creating a student.
pub const CREATE_SUCCEEDED_MESSAGE: &str = "Student successfully added";
/// Failure text after creating a student.
pub const CREATE_FAILED_MESSAGE: &str = "Error when adding";
/// Success text after deleting a student.
pub const DELETE_SUCCEEDED_MESSAGE: &str = "Student successfully deleted";
/// Failure text after deleting a student.
pub const DELETE_FAILED_MESSAGE: &str = "Student delete failed";
/// Question put to the user before any delete request is issued.
pub const DELETE_CONFIRMATION_QUESTION: &str = "Are you sure you want to delete the student?";

/// Which notification, if any, a failed authorization check raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthFailureNotice {
    /// Notify only when the check never reached the service.
    #[default]
    TransportOnly,
    /// Notify on every failed check, including plain refusals.
    Always,
    /// Resolve to unauthorized without notifying.
    Silent,
}

impl AuthFailureNotice {
    fn should_notify(self, kind: FailureKind) -> bool {
        match self {
            Self::TransportOnly => kind == FailureKind::Transport,
            Self::Always => true,
            Self::Silent => false,
        }
    }
}

/// Controller tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StudentListConfig {
    /// Notification policy for failed authorization checks.
    pub auth_failure_notice: AuthFailureNotice,
}

/// Port bundle required by the controller.
pub struct StudentListPorts {
    /// Remote roster collection.
    pub gateway: Arc<dyn StudentGateway>,
    /// Transient user notifications.
    pub notifications: Arc<dyn NotificationSink>,
    /// Yes/no prompt guarding deletes.
    pub confirmation: Arc<dyn ConfirmationPrompt>,
}

impl StudentListPorts {
    /// Build a strongly-typed port bundle.
    pub fn new(
        gateway: Arc<dyn StudentGateway>,
        notifications: Arc<dyn NotificationSink>,
        confirmation: Arc<dyn ConfirmationPrompt>,
    ) -> Self {
        Self {
            gateway,
            notifications,
            confirmation,
        }
    }
}

/// Phase of the list sub-machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    /// No list fetch is in flight.
    Idle,
    /// At least one list fetch is in flight.
    Loading,
}

/// Kind of a mutating call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// Student creation.
    Create,
    /// Student deletion.
    Delete,
}

/// Phase of the mutation sub-machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationPhase {
    /// No mutating call is in flight.
    Idle,
    /// The most recently issued mutation still in flight.
    Mutating(MutationKind),
}

/// What a confirmed or declined delete request amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The service accepted the delete.
    Removed,
    /// The user declined; no request was issued.
    Declined,
}

/// Outcome of the start-up pair of calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Initialization {
    /// Result of the initial list fetch, carrying the row count.
    pub refresh: OperationOutcome<usize>,
    /// Authorization state after the initial check.
    pub authorization: AuthorizationState,
}

/// Controller for the student roster screen.
pub struct StudentListController {
    gateway: Arc<dyn StudentGateway>,
    notifications: Arc<dyn NotificationSink>,
    confirmation: Arc<dyn ConfirmationPrompt>,
    config: StudentListConfig,
    state: Mutex<ListState>,
}

impl StudentListController {
    /// Build a controller with an empty snapshot and an unchecked
    /// authorization state.
    ///
    /// ```rust,ignore
    /// let controller = StudentListController::new(ports, StudentListConfig::default());
    /// assert!(controller.snapshot().is_empty());
    /// ```
    pub fn new(ports: StudentListPorts, config: StudentListConfig) -> Self {
        Self {
            gateway: ports.gateway,
            notifications: ports.notifications,
            confirmation: ports.confirmation,
            config,
            state: Mutex::new(ListState::default()),
        }
    }

    /// Fetch the list and check authorization concurrently.
    ///
    /// Neither call waits for the other; both run to completion.
    pub async fn initialize(&self) -> Initialization {
        let (refresh, authorization) =
            futures_util::join!(self.refresh(), self.check_authorization());
        Initialization {
            refresh,
            authorization,
        }
    }

    /// Re-fetch the whole collection.
    ///
    /// On success the snapshot is replaced wholesale and the row count is
    /// returned. On any failure the snapshot is left untouched and one
    /// failure notification is raised. Nothing is retried.
    pub async fn refresh(&self) -> OperationOutcome<usize> {
        let in_flight = InFlight::refresh(&self.state);
        debug!("fetching student list");
        let outcome = self.gateway.list_all().await;
        let result = match outcome {
            Ok(records) => {
                let count = records.len();
                lock(&self.state).snapshot = records;
                debug!(count, "student snapshot replaced");
                Ok(count)
            }
            Err(error) => {
                log_failure("list", &error);
                self.notifications
                    .notify(Notification::failure(FETCH_FAILED_MESSAGE));
                Err(error)
            }
        };
        drop(in_flight);
        result
    }

    /// Create a student, then re-fetch the list on success.
    ///
    /// The snapshot is never patched locally. A failure notification names
    /// the HTTP status when one was received.
    pub async fn create(&self, student: &NewStudent) -> OperationOutcome<()> {
        let outcome = {
            let _in_flight = InFlight::mutation(&self.state, MutationKind::Create);
            debug!(name = student.name(), "creating student");
            self.gateway.create(student).await
        };

        match outcome {
            Ok(()) => {
                debug!(name = student.name(), "student created");
                self.notifications
                    .notify(Notification::success(CREATE_SUCCEEDED_MESSAGE));
                self.refresh_after_write().await;
                Ok(())
            }
            Err(error) => {
                log_failure("create", &error);
                self.notifications
                    .notify(Notification::failure(with_status(CREATE_FAILED_MESSAGE, &error)));
                Err(error)
            }
        }
    }

    /// Delete a student after the user confirms, then re-fetch the list.
    ///
    /// Declining issues no request and changes nothing.
    pub async fn remove(&self, id: &StudentId) -> OperationOutcome<RemovalOutcome> {
        if !self.confirmation.confirm(DELETE_CONFIRMATION_QUESTION) {
            debug!(student_id = %id, "student deletion declined");
            return Ok(RemovalOutcome::Declined);
        }

        let outcome = {
            let _in_flight = InFlight::mutation(&self.state, MutationKind::Delete);
            debug!(student_id = %id, "deleting student");
            self.gateway.remove(id).await
        };

        match outcome {
            Ok(()) => {
                debug!(student_id = %id, "student deleted");
                self.notifications
                    .notify(Notification::success(DELETE_SUCCEEDED_MESSAGE));
                self.refresh_after_write().await;
                Ok(RemovalOutcome::Removed)
            }
            Err(error) => {
                log_failure("delete", &error);
                self.notifications
                    .notify(Notification::failure(with_status(DELETE_FAILED_MESSAGE, &error)));
                Err(error)
            }
        }
    }

    /// Ask the service whether the caller is an administrator.
    ///
    /// Fail-closed: only an explicit success yields
    /// [`AuthorizationState::Authorized`].
    pub async fn check_authorization(&self) -> AuthorizationState {
        let in_flight = InFlight::auth_check(&self.state);
        let outcome = self.gateway.check_authorization().await;
        let resolved = match outcome {
            Ok(()) => {
                debug!("authorization check granted");
                AuthorizationState::Authorized
            }
            Err(error) => {
                let kind = error.kind();
                if kind == FailureKind::Transport {
                    log_failure("authorization check", &error);
                } else {
                    debug!(?kind, status = ?error.status(), %error, "authorization check refused");
                }
                if self.config.auth_failure_notice.should_notify(kind) {
                    self.notifications
                        .notify(Notification::failure(FETCH_FAILED_MESSAGE));
                }
                AuthorizationState::Unauthorized
            }
        };
        lock(&self.state).authorization = resolved;
        drop(in_flight);
        resolved
    }

    /// Current snapshot in server order.
    pub fn snapshot(&self) -> Vec<StudentRecord> {
        lock(&self.state).snapshot.clone()
    }

    /// Current authorization state.
    pub fn authorization(&self) -> AuthorizationState {
        lock(&self.state).authorization
    }

    /// Rows with per-row actions gated by the authorization state.
    pub fn rows(&self) -> Vec<StudentRow> {
        self.view().rows
    }

    /// Complete view model for presentation.
    pub fn view(&self) -> StudentListView {
        let state = lock(&self.state);
        StudentListView::project(&state.snapshot, state.authorization)
    }

    /// Phase of the list sub-machine.
    pub fn list_phase(&self) -> ListPhase {
        if lock(&self.state).refreshes_in_flight > 0 {
            ListPhase::Loading
        } else {
            ListPhase::Idle
        }
    }

    /// Phase of the mutation sub-machine.
    pub fn mutation_phase(&self) -> MutationPhase {
        lock(&self.state)
            .mutations_in_flight
            .last()
            .map_or(MutationPhase::Idle, |(_, kind)| MutationPhase::Mutating(*kind))
    }

    /// Whether an authorization check is in flight.
    pub fn is_checking_authorization(&self) -> bool {
        lock(&self.state).auth_checks_in_flight > 0
    }

    async fn refresh_after_write(&self) {
        if let Err(error) = self.refresh().await {
            debug!(%error, "follow-up refresh failed after write");
        }
    }
}

fn log_failure(operation: &'static str, error: &StudentGatewayError) {
    warn!(
        operation,
        kind = ?error.kind(),
        status = ?error.status(),
        %error,
        "roster operation failed"
    );
}

fn with_status(message: &str, error: &StudentGatewayError) -> String {
    match error.status() {
        Some(status) => format!("{message} (status {status})"),
        None => message.to_owned(),
    }
}
