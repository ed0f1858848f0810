//! Process-local token store keyed by name.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::domain::ports::{AntiForgeryToken, AntiForgeryTokenSource};

/// Key/value store that also acts as a token source for one configured key.
///
/// Values are read afresh on every [`AntiForgeryTokenSource::current_token`]
/// call, so a [`set`](Self::set) is visible to the next request.
#[derive(Debug)]
pub struct InMemoryTokenStore {
    token_key: String,
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryTokenStore {
    /// Create an empty store whose token lives under `token_key`.
    pub fn new(token_key: impl Into<String>) -> Self {
        Self {
            token_key: token_key.into(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
    }

    /// Remove `key`, returning whether it was present.
    pub fn remove(&self, key: &str) -> bool {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .is_some()
    }

    /// Read the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl AntiForgeryTokenSource for InMemoryTokenStore {
    fn current_token(&self) -> Option<AntiForgeryToken> {
        self.get(&self.token_key).and_then(AntiForgeryToken::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn token_follows_the_configured_key() {
        let store = InMemoryTokenStore::new("token");
        assert!(store.current_token().is_none());

        store.set("other", "ignored");
        assert!(store.current_token().is_none());

        store.set("token", "abc");
        assert_eq!(store.current_token().expect("token").expose(), "abc");

        store.set("token", "def");
        assert_eq!(store.current_token().expect("token").expose(), "def");
    }

    #[rstest]
    fn removal_clears_the_token() {
        let store = InMemoryTokenStore::new("token");
        store.set("token", "abc");
        assert!(store.remove("token"));
        assert!(!store.remove("token"));
        assert!(store.current_token().is_none());
        assert_eq!(store.get("token"), None);
    }

    #[rstest]
    fn blank_values_are_not_tokens() {
        let store = InMemoryTokenStore::new("token");
        store.set("token", "  ");
        assert_eq!(store.get("token").as_deref(), Some("  "));
        assert!(store.current_token().is_none());
    }
}
