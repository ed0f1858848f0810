//! Command execution against the roster controller.

use std::io::{self, Write};
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use super::render::{render_affordances, render_toasts, render_view};
use super::{AddArgs, Command, DeleteArgs, WatchArgs};
use crate::domain::ports::StudentGatewayError;
use crate::domain::{
    NewStudent, RemovalOutcome, StudentId, StudentListController, StudentValidationError,
};
use crate::outbound::notifications::ToastBoard;

/// Errors that end a command unsuccessfully.
#[derive(Debug, Error)]
pub enum CliError {
    /// Command-line input did not form a valid student or identifier.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] StudentValidationError),
    /// The affordance is not offered to this session.
    #[error("{action} requires administrative rights")]
    NotAuthorized { action: &'static str },
    /// A roster call failed.
    #[error(transparent)]
    Gateway(#[from] StudentGatewayError),
    /// Writing to the terminal failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Run `command`, writing its rendering to `out`.
///
/// The controller is initialized first so every command sees the list and the
/// authorization state the way a freshly opened screen would.
///
/// # Errors
///
/// Returns [`CliError`] when input is invalid, the session lacks the rights an
/// affordance needs, a roster call fails, or output cannot be written.
pub async fn execute<W: Write>(
    command: &Command,
    controller: &StudentListController,
    board: &ToastBoard,
    out: &mut W,
) -> Result<(), CliError> {
    match command {
        Command::List => list(controller, out).await,
        Command::Add(args) => add(args, controller, out).await,
        Command::Delete(args) => delete(args, controller, out).await,
        Command::Whoami => whoami(controller, out).await,
        Command::Watch(args) => watch(args, controller, board, out).await,
    }
}

async fn list<W: Write>(controller: &StudentListController, out: &mut W) -> Result<(), CliError> {
    controller.initialize().await.refresh?;
    out.write_all(render_view(&controller.view()).as_bytes())?;
    Ok(())
}

async fn add<W: Write>(
    args: &AddArgs,
    controller: &StudentListController,
    out: &mut W,
) -> Result<(), CliError> {
    let student = NewStudent::new(&args.name, &args.email)?
        .with_status(args.status.clone(), args.status_code.clone());
    controller.initialize().await;
    if !controller.view().can_add {
        return Err(CliError::NotAuthorized {
            action: "adding a student",
        });
    }
    controller.create(&student).await?;
    out.write_all(render_view(&controller.view()).as_bytes())?;
    Ok(())
}

async fn delete<W: Write>(
    args: &DeleteArgs,
    controller: &StudentListController,
    out: &mut W,
) -> Result<(), CliError> {
    let id = StudentId::new(args.id.as_str())?;
    controller.initialize().await;
    if !controller.authorization().is_authorized() {
        return Err(CliError::NotAuthorized {
            action: "deleting a student",
        });
    }
    match controller.remove(&id).await? {
        RemovalOutcome::Declined => writeln!(out, "Deletion cancelled.")?,
        RemovalOutcome::Removed => out.write_all(render_view(&controller.view()).as_bytes())?,
    }
    Ok(())
}

async fn whoami<W: Write>(controller: &StudentListController, out: &mut W) -> Result<(), CliError> {
    let state = controller.check_authorization().await;
    debug!(?state, "authorization resolved");
    writeln!(out, "{}", render_affordances(&controller.view()))?;
    Ok(())
}

async fn watch<W: Write>(
    args: &WatchArgs,
    controller: &StudentListController,
    board: &ToastBoard,
    out: &mut W,
) -> Result<(), CliError> {
    controller.initialize().await;
    let interval = Duration::from_millis(args.interval_ms);
    let mut drawn: u32 = 0;
    loop {
        board.prune();
        let view = controller.view();
        writeln!(out, "{}", render_affordances(&view))?;
        out.write_all(render_view(&view).as_bytes())?;
        out.write_all(render_toasts(&board.active()).as_bytes())?;
        writeln!(out)?;
        out.flush()?;

        drawn = drawn.saturating_add(1);
        if rounds_exhausted(drawn, args.rounds) {
            return Ok(());
        }
        tokio::time::sleep(interval).await;
        // Failures are already surfaced as toasts.
        let _ = controller.refresh().await;
    }
}

/// Whether `drawn` redraws satisfy the requested limit. Without a limit the
/// loop runs until interrupted.
fn rounds_exhausted(drawn: u32, limit: Option<u32>) -> bool {
    limit.is_some_and(|limit| drawn >= limit)
}
