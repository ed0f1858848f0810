//! Plain-text rendering of roster views.

use std::fmt::Write as _;

use crate::domain::{AuthorizationState, Severity, StudentListView};
use crate::outbound::notifications::Toast;

const HEADERS: [&str; 5] = ["ID", "NAME", "EMAIL", "STATUS", "CODE"];
const DELETE_MARKER: &str = "[x]";

/// Render the view as an aligned table.
///
/// A trailing action column marks deletable rows; it only appears when the
/// view offers deletion. An empty roster renders as a single line.
pub fn render_view(view: &StudentListView) -> String {
    let mut out = String::new();
    if view.rows.is_empty() {
        out.push_str("No students.\n");
        return out;
    }

    let cells: Vec<[&str; 5]> = view
        .rows
        .iter()
        .map(|row| {
            [
                row.row_id.as_str(),
                row.record.name.as_str(),
                row.record.email.as_str(),
                row.record.status.as_str(),
                row.record.status_code.as_str(),
            ]
        })
        .collect();
    let mut widths = HEADERS.map(str::len);
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let show_actions = view.rows.iter().any(|row| row.actions.can_delete);
    push_line(&mut out, &HEADERS, &widths, show_actions.then_some("DEL"));
    for (line, row) in cells.iter().zip(&view.rows) {
        let marker = row.actions.can_delete.then_some(DELETE_MARKER);
        push_line(&mut out, line, &widths, if show_actions { marker.or(Some("")) } else { None });
    }
    out
}

/// Footer describing the authorization-gated affordances.
pub fn render_affordances(view: &StudentListView) -> &'static str {
    match view.authorization {
        AuthorizationState::Authorized => "Administrator: add and delete are available.",
        AuthorizationState::Unauthorized => "Read-only: add and delete are unavailable.",
        AuthorizationState::Unchecked => "Checking permissions...",
    }
}

/// Render active toasts, one per line.
pub fn render_toasts(toasts: &[Toast]) -> String {
    toasts.iter().fold(String::new(), |mut out, toast| {
        let badge = match toast.notification.severity {
            Severity::Success => "ok",
            Severity::Failure => "!!",
        };
        let _ = writeln!(out, "[{badge}] {}", toast.notification.message);
        out
    })
}

fn push_line(out: &mut String, cells: &[&str; 5], widths: &[usize; 5], action: Option<&str>) {
    let mut line = String::new();
    for (cell, width) in cells.iter().zip(widths) {
        let _ = write!(line, "{cell:<width$}  ");
    }
    if let Some(action) = action {
        line.push_str(action);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
