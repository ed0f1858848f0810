//! Domain primitives, ports and the roster list controller.
//!
//! Purpose: own the roster semantics independently of transport. Adapters
//! under `outbound` and `inbound` plug into the traits in [`ports`].
//!
//! Public surface:
//! - `StudentId`, `StudentRecord`, `NewStudent`: roster data model.
//! - `AuthorizationState`: fail-closed, three-valued admin flag.
//! - `Notification`, `Severity`: user-facing outcome messages.
//! - `StudentListController`: the synchronisation controller and its view
//!   projections.

pub mod authorization;
pub mod list_controller;
pub mod notification;
pub mod ports;
pub mod student;

pub use self::authorization::AuthorizationState;
pub use self::list_controller::{
    AuthFailureNotice, Initialization, ListPhase, MutationKind, MutationPhase, RemovalOutcome,
    RowActions, StudentListConfig, StudentListController, StudentListPorts, StudentListView,
    StudentRow,
};
pub use self::notification::{Notification, Severity};
pub use self::student::{NewStudent, StudentId, StudentRecord, StudentValidationError};
