//! Client configuration loaded via OrthoConfig.
//!
//! Values come from `ROSTER_*` environment variables, an optional config file
//! and command-line overrides, merged by `ortho_config`.

use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::header::HeaderName;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::outbound::http::DEFAULT_TOKEN_HEADER;
use crate::outbound::notifications::DEFAULT_TOAST_DURATION;
use crate::outbound::token::DEFAULT_TOKEN_COOKIE;

const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Errors raised when configured values cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientSettingsError {
    /// The server URL does not parse or cannot carry paths.
    #[error("invalid server URL `{value}`: {reason}")]
    InvalidServerUrl { value: String, reason: String },
    /// The anti-forgery header name is not a valid HTTP header name.
    #[error("invalid token header name `{value}`")]
    InvalidTokenHeader { value: String },
    /// The seeded session cookie is not of the form `name=value`.
    #[error("session cookie must look like `name=value`, got `{value}`")]
    InvalidSessionCookie { value: String },
}

/// Settings for the roster client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROSTER")]
pub struct ClientSettings {
    /// Base URL of the roster service.
    pub server_url: Option<String>,
    /// Cookie carrying the anti-forgery token.
    pub token_cookie: Option<String>,
    /// Header echoing the anti-forgery token.
    pub token_header: Option<String>,
    /// Session cookie (`name=value`) seeded into the jar before the first call.
    pub session_cookie: Option<String>,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: Option<u64>,
    /// Toast lifetime in milliseconds.
    pub toast_duration_ms: Option<u64>,
}

impl ClientSettings {
    /// Parsed server URL, falling back to the local default.
    ///
    /// # Errors
    ///
    /// Returns [`ClientSettingsError::InvalidServerUrl`] when the value does
    /// not parse or cannot carry path segments.
    pub fn server_url(&self) -> Result<Url, ClientSettingsError> {
        let raw = self.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL);
        let url = Url::parse(raw).map_err(|err| ClientSettingsError::InvalidServerUrl {
            value: raw.to_owned(),
            reason: err.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ClientSettingsError::InvalidServerUrl {
                value: raw.to_owned(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }
        Ok(url)
    }

    /// Name of the anti-forgery cookie.
    pub fn token_cookie(&self) -> &str {
        self.token_cookie.as_deref().unwrap_or(DEFAULT_TOKEN_COOKIE)
    }

    /// Parsed anti-forgery header name.
    ///
    /// # Errors
    ///
    /// Returns [`ClientSettingsError::InvalidTokenHeader`] for names that are
    /// not valid HTTP header names.
    pub fn token_header(&self) -> Result<HeaderName, ClientSettingsError> {
        let raw = self.token_header.as_deref().unwrap_or(DEFAULT_TOKEN_HEADER);
        HeaderName::from_bytes(raw.as_bytes()).map_err(|_| {
            ClientSettingsError::InvalidTokenHeader {
                value: raw.to_owned(),
            }
        })
    }

    /// Session cookie to seed, validated as `name=value`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientSettingsError::InvalidSessionCookie`] when the value
    /// has no name or no `=`.
    pub fn session_cookie(&self) -> Result<Option<&str>, ClientSettingsError> {
        let Some(raw) = self.session_cookie.as_deref() else {
            return Ok(None);
        };
        match raw.split_once('=') {
            Some((name, _)) if !name.trim().is_empty() => Ok(Some(raw)),
            _ => Err(ClientSettingsError::InvalidSessionCookie {
                value: raw.to_owned(),
            }),
        }
    }

    /// Per-request timeout, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// Toast lifetime, falling back to the default.
    pub fn toast_duration(&self) -> Duration {
        self.toast_duration_ms
            .map_or(DEFAULT_TOAST_DURATION, Duration::from_millis)
    }
}
