//! Outbound adapters implementing domain ports for external collaborators.
//!
//! - **http**: reqwest-backed roster service gateway
//! - **token**: anti-forgery token sources (cookie jar, in-memory store)
//! - **notifications**: tracing sink and an auto-dismissing toast board
//!
//! Adapters are thin translators between domain types and transport
//! representations. They contain no roster logic.

pub mod http;
pub mod notifications;
pub mod token;
