//! Owned controller state and in-flight bookkeeping for the three
//! independent sub-machines (list, mutation, authorization).

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::{AuthorizationState, StudentRecord};

use super::MutationKind;

/// Snapshot, authorization flag and in-flight counters.
///
/// Written only from completion continuations; the lock is never held across
/// an await point.
#[derive(Debug, Default)]
pub(super) struct ListState {
    pub(super) snapshot: Vec<StudentRecord>,
    pub(super) authorization: AuthorizationState,
    pub(super) refreshes_in_flight: usize,
    pub(super) auth_checks_in_flight: usize,
    pub(super) mutations_in_flight: Vec<(u64, MutationKind)>,
    next_ticket: u64,
}

impl ListState {
    fn issue_ticket(&mut self) -> u64 {
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.next_ticket
    }
}

/// Lock the state. Every critical section leaves the state whole, so a
/// poisoned lock still guards consistent data.
pub(super) fn lock(state: &Mutex<ListState>) -> MutexGuard<'_, ListState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Refresh,
    AuthCheck,
    Mutation(u64),
}

/// Marks one sub-machine as busy until dropped.
///
/// Dropping the guard also covers futures abandoned by their caller, so the
/// observable phase never sticks in a busy state.
pub(super) struct InFlight<'a> {
    state: &'a Mutex<ListState>,
    slot: Slot,
}

impl<'a> InFlight<'a> {
    pub(super) fn refresh(state: &'a Mutex<ListState>) -> Self {
        lock(state).refreshes_in_flight += 1;
        Self {
            state,
            slot: Slot::Refresh,
        }
    }

    pub(super) fn auth_check(state: &'a Mutex<ListState>) -> Self {
        lock(state).auth_checks_in_flight += 1;
        Self {
            state,
            slot: Slot::AuthCheck,
        }
    }

    pub(super) fn mutation(state: &'a Mutex<ListState>, kind: MutationKind) -> Self {
        let mut guard = lock(state);
        let ticket = guard.issue_ticket();
        guard.mutations_in_flight.push((ticket, kind));
        drop(guard);
        Self {
            state,
            slot: Slot::Mutation(ticket),
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut guard = lock(self.state);
        match self.slot {
            Slot::Refresh => {
                guard.refreshes_in_flight = guard.refreshes_in_flight.saturating_sub(1);
            }
            Slot::AuthCheck => {
                guard.auth_checks_in_flight = guard.auth_checks_in_flight.saturating_sub(1);
            }
            Slot::Mutation(ticket) => {
                guard
                    .mutations_in_flight
                    .retain(|(pending, _)| *pending != ticket);
            }
        }
    }
}
