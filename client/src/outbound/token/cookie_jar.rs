//! Token source backed by the shared reqwest cookie jar.

use std::sync::Arc;

use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};
use tracing::debug;

use crate::domain::ports::{AntiForgeryToken, AntiForgeryTokenSource};

/// Cookie the roster service uses to hand out the anti-forgery token.
pub const DEFAULT_TOKEN_COOKIE: &str = "XSRF-TOKEN";

/// Reads the anti-forgery token from the cookie jar on every call.
///
/// The jar is the one the HTTP client stores `Set-Cookie` responses in, so a
/// token rotated by the service is picked up on the next request.
pub struct CookieJarTokenSource {
    jar: Arc<Jar>,
    url: Url,
    cookie_name: String,
}

impl CookieJarTokenSource {
    /// Read `cookie_name` from the cookies `jar` would send to `url`.
    pub fn new(jar: Arc<Jar>, url: Url, cookie_name: impl Into<String>) -> Self {
        Self {
            jar,
            url,
            cookie_name: cookie_name.into(),
        }
    }
}

impl AntiForgeryTokenSource for CookieJarTokenSource {
    fn current_token(&self) -> Option<AntiForgeryToken> {
        let header = self.jar.cookies(&self.url)?;
        let Ok(cookies) = header.to_str() else {
            debug!("cookie header is not valid UTF-8");
            return None;
        };
        cookie_value(cookies, &self.cookie_name).and_then(AntiForgeryToken::new)
    }
}

fn cookie_value<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn origin() -> Url {
        Url::parse("http://roster.test/").expect("fixture url")
    }

    fn source_with(cookies: &[&str], origin: &Url) -> CookieJarTokenSource {
        let jar = Arc::new(Jar::default());
        for cookie in cookies {
            jar.add_cookie_str(cookie, origin);
        }
        CookieJarTokenSource::new(jar, origin.clone(), DEFAULT_TOKEN_COOKIE)
    }

    #[rstest]
    fn reads_token_among_other_cookies(origin: Url) {
        let source = source_with(&["SESSION=s1; Path=/", "XSRF-TOKEN=tok-1; Path=/"], &origin);
        let token = source.current_token().expect("token present");
        assert_eq!(token.expose(), "tok-1");
    }

    #[rstest]
    fn missing_cookie_yields_no_token(origin: Url) {
        let source = source_with(&["SESSION=s1; Path=/"], &origin);
        assert!(source.current_token().is_none());
    }

    #[rstest]
    fn empty_jar_yields_no_token(origin: Url) {
        assert!(source_with(&[], &origin).current_token().is_none());
    }

    #[rstest]
    fn rotated_token_is_read_on_next_call(origin: Url) {
        let jar = Arc::new(Jar::default());
        jar.add_cookie_str("XSRF-TOKEN=first; Path=/", &origin);
        let source = CookieJarTokenSource::new(Arc::clone(&jar), origin.clone(), "XSRF-TOKEN");
        assert_eq!(source.current_token().expect("first").expose(), "first");

        jar.add_cookie_str("XSRF-TOKEN=second; Path=/", &origin);
        assert_eq!(source.current_token().expect("second").expose(), "second");
    }

    #[rstest]
    #[case("a=1; XSRF-TOKEN=x", Some("x"))]
    #[case("XSRF-TOKEN=\"quoted\"", Some("quoted"))]
    #[case("NOT-XSRF-TOKEN=x", None)]
    #[case("XSRF-TOKEN", None)]
    fn cookie_value_matches_exact_names(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(cookie_value(header, "XSRF-TOKEN"), expected);
    }
}
