//! Command-line surface for the roster client.
//!
//! Commands mirror the affordances of a roster screen: list the students,
//! add one, delete one after confirmation, report the caller's rights, or
//! keep the list on screen with auto-dismissing notifications.

mod commands;
mod prompt;
mod render;
mod terminal_sink;

use clap::{Args, Parser, Subcommand};

pub use commands::{CliError, execute};
pub use prompt::LineConfirmation;
pub use render::{render_affordances, render_toasts, render_view};
pub use terminal_sink::TerminalNotificationSink;

/// Student roster client.
#[derive(Debug, Parser)]
#[command(name = "roster", version, about = "Keep a student roster in sync with the roster service")]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Roster commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the current roster.
    List,
    /// Add a student (administrators only).
    Add(AddArgs),
    /// Delete a student after confirmation (administrators only).
    Delete(DeleteArgs),
    /// Report whether the session holds administrative rights.
    Whoami,
    /// Re-fetch and redraw the roster periodically.
    Watch(WatchArgs),
}

impl Command {
    /// Whether this command keeps a live screen rather than printing once.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Watch(_))
    }

    /// Whether deletion was pre-confirmed on the command line.
    pub fn assumes_yes(&self) -> bool {
        matches!(self, Self::Delete(DeleteArgs { yes: true, .. }))
    }
}

/// Arguments for `roster add`.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct AddArgs {
    /// Student name.
    #[arg(long)]
    pub name: String,
    /// Student email.
    #[arg(long)]
    pub email: String,
    /// Human-readable status, e.g. `Active`.
    #[arg(long)]
    pub status: Option<String>,
    /// Machine code paired with the status.
    #[arg(long)]
    pub status_code: Option<String>,
}

/// Arguments for `roster delete`.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct DeleteArgs {
    /// Identifier of the student to delete.
    pub id: String,
    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Arguments for `roster watch`.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct WatchArgs {
    /// Delay between refreshes in milliseconds.
    #[arg(long, default_value_t = 2000)]
    pub interval_ms: u64,
    /// Stop after this many redraws; runs until interrupted when absent.
    #[arg(long)]
    pub rounds: Option<u32>,
}
