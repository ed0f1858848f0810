//! Port for reading the anti-forgery token echoed on every request.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// Length of the token fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 6;

/// Per-session secret echoed back to the roster service in a request header.
///
/// The value is wiped on drop and never printed; logs use
/// [`AntiForgeryToken::fingerprint`].
#[derive(Clone, PartialEq, Eq)]
pub struct AntiForgeryToken(String);

impl AntiForgeryToken {
    /// Wrap a raw token value. Blank values yield `None`.
    ///
    /// # Examples
    /// ```
    /// use roster_client::domain::ports::AntiForgeryToken;
    ///
    /// assert!(AntiForgeryToken::new("").is_none());
    /// let token = AntiForgeryToken::new("abc").expect("token");
    /// assert_eq!(token.expose(), "abc");
    /// ```
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return None;
        }
        Some(Self(value))
    }

    /// Borrow the secret value for transmission.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Truncated SHA-256 digest of the token, safe to log.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        hex::encode(digest.iter().take(FINGERPRINT_BYTES).copied().collect::<Vec<u8>>())
    }
}

impl fmt::Debug for AntiForgeryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AntiForgeryToken")
            .field(&self.fingerprint())
            .finish()
    }
}

impl Drop for AntiForgeryToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Synchronous source of the current anti-forgery token.
///
/// Implementations read the backing store on every call so rotated tokens are
/// picked up. Reads never fail: an unreadable or missing entry is `None`.
pub trait AntiForgeryTokenSource: Send + Sync {
    /// Return the token to attach to the next request, if any.
    fn current_token(&self) -> Option<AntiForgeryToken>;
}

/// Token source for sessions that carry no anti-forgery token.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAntiForgeryToken;

impl AntiForgeryTokenSource for NoAntiForgeryToken {
    fn current_token(&self) -> Option<AntiForgeryToken> {
        None
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for token redaction.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn debug_output_never_contains_the_secret() {
        let token = AntiForgeryToken::new("super-secret-value").expect("token");
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("super-secret-value"));
        assert!(rendered.contains(&token.fingerprint()));
    }

    #[rstest]
    fn fingerprint_is_short_stable_hex() {
        let first = AntiForgeryToken::new("abc").expect("token");
        let second = AntiForgeryToken::new("abc").expect("token");
        assert_eq!(first.fingerprint(), second.fingerprint());
        assert_eq!(first.fingerprint().len(), FINGERPRINT_BYTES * 2);
        assert!(first.fingerprint().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_tokens_are_absent(#[case] raw: &str) {
        assert!(AntiForgeryToken::new(raw).is_none());
    }
}
