//! Anti-forgery token sources.
//!
//! The cookie-jar source reads the token the service sets as a cookie; the
//! in-memory store serves callers that receive the token out of band.

mod cookie_jar;
mod memory;

pub use cookie_jar::{CookieJarTokenSource, DEFAULT_TOKEN_COOKIE};
pub use memory::InMemoryTokenStore;
