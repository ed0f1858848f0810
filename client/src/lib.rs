//! Student roster client library.
//!
//! Keeps a local snapshot of the roster service's student collection, gates
//! mutation affordances on a fail-closed authorization check and reports every
//! outcome as a transient notification.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use config::{ClientSettings, ClientSettingsError};
