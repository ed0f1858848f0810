//! Read-only projections consumed by presentation layers.

use crate::domain::{AuthorizationState, StudentId, StudentRecord};

/// Per-row affordances, gated by the authorization state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowActions {
    /// Whether the delete action is offered for this row.
    pub can_delete: bool,
}

/// One presentation row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRow {
    /// Row identifier; always equal to `record.student_id`.
    pub row_id: StudentId,
    /// The record as last fetched.
    pub record: StudentRecord,
    /// Actions available on this row.
    pub actions: RowActions,
}

/// Complete view model for a roster screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentListView {
    /// Rows in server response order.
    pub rows: Vec<StudentRow>,
    /// Whether the add-student affordance is offered.
    pub can_add: bool,
    /// Authorization state the affordances were derived from.
    pub authorization: AuthorizationState,
}

impl StudentListView {
    pub(super) fn project(records: &[StudentRecord], authorization: AuthorizationState) -> Self {
        let actions = RowActions {
            can_delete: authorization.is_authorized(),
        };
        Self {
            rows: records
                .iter()
                .map(|record| StudentRow {
                    row_id: record.student_id.clone(),
                    record: record.clone(),
                    actions,
                })
                .collect(),
            can_add: authorization.is_authorized(),
            authorization,
        }
    }
}
