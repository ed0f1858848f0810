//! Inbound adapters that drive the roster controller.
//!
//! - **cli**: the `roster` command-line surface, its terminal prompt and the
//!   terminal notification sink.

pub mod cli;
