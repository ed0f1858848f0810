//! Client-side view of the caller's administrative authorization.

/// Result of the most recent authorization check.
///
/// The state gates mutation affordances only. The roster service stays
/// authoritative for every mutating call regardless of this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorizationState {
    /// No check has completed yet.
    #[default]
    Unchecked,
    /// The last check returned HTTP 200.
    Authorized,
    /// The last check failed for any reason.
    Unauthorized,
}

impl AuthorizationState {
    /// Return whether mutation affordances should be offered.
    ///
    /// Fail-closed: only [`AuthorizationState::Authorized`] grants them.
    ///
    /// # Examples
    /// ```
    /// use roster_client::domain::AuthorizationState;
    ///
    /// assert!(!AuthorizationState::Unchecked.is_authorized());
    /// assert!(AuthorizationState::Authorized.is_authorized());
    /// ```
    pub fn is_authorized(self) -> bool {
        matches!(self, Self::Authorized)
    }

    /// Return whether at least one check has completed.
    pub fn is_resolved(self) -> bool {
        !matches!(self, Self::Unchecked)
    }
}
