//! Port for blocking yes/no confirmation before destructive operations.

/// Blocking yes/no prompt shown to the user.
#[cfg_attr(test, mockall::automock)]
pub trait ConfirmationPrompt: Send + Sync {
    /// Ask `question` and return `true` only when the user agrees.
    fn confirm(&self, question: &str) -> bool;
}

/// Prompt that always gives the same answer, for unattended use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedConfirmation(pub bool);

impl ConfirmationPrompt for FixedConfirmation {
    fn confirm(&self, _question: &str) -> bool {
        self.0
    }
}
