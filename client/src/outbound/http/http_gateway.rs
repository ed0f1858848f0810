//! Reqwest-backed roster service adapter.
//!
//! This adapter owns transport details only: URL construction, credential and
//! anti-forgery header attachment, status classification, and JSON decoding
//! into domain records.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use thiserror::Error;
use tracing::{debug, warn};

use super::dto::decode_student_list;
use crate::domain::ports::{
    AntiForgeryTokenSource, OperationOutcome, StudentGateway, StudentGatewayError,
};
use crate::domain::{NewStudent, StudentId, StudentRecord};

/// Header that echoes the anti-forgery token back to the service.
pub const DEFAULT_TOKEN_HEADER: &str = "X-XSRF-TOKEN";

const STUDENTS_SEGMENT: &str = "student";
const ADMIN_SEGMENT: &str = "admin";
const JSON_MEDIA_TYPE: &str = "application/json";
/// Bytes of a refused response read for the diagnostic preview.
const BODY_PREVIEW_BYTE_LIMIT: usize = 4096;

/// Transport settings for [`ReqwestStudentGateway`].
#[derive(Debug, Clone)]
pub struct HttpGatewayOptions {
    /// Header carrying the anti-forgery token.
    pub token_header: HeaderName,
    /// Per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for HttpGatewayOptions {
    fn default() -> Self {
        Self {
            token_header: HeaderName::from_static("x-xsrf-token"),
            timeout: None,
        }
    }
}

/// Errors raised while constructing the gateway.
#[derive(Debug, Error)]
pub enum HttpGatewayBuildError {
    /// The base URL cannot carry path segments (e.g. `mailto:`).
    #[error("base URL {url} cannot be used as a roster endpoint")]
    UnusableBaseUrl { url: Url },
    /// The reqwest client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Roster gateway performing HTTP calls against one base URL.
///
/// Session cookies live in the shared [`Jar`], which is attached to every
/// request. The anti-forgery token is read from the token source right before
/// each call.
pub struct ReqwestStudentGateway {
    client: Client,
    students_url: Url,
    admin_url: Url,
    token_header: HeaderName,
    tokens: Arc<dyn AntiForgeryTokenSource>,
}

impl ReqwestStudentGateway {
    /// Build a gateway for `base_url` sharing `cookies` with the token source.
    ///
    /// Redirects are not followed, so a redirect status is reported as is.
    /// ```rust,ignore
    /// let gateway = ReqwestStudentGateway::new(&base_url, jar, tokens, HttpGatewayOptions::default())?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the base URL cannot carry path segments or the
    /// reqwest client cannot be constructed.
    pub fn new(
        base_url: &Url,
        cookies: Arc<Jar>,
        tokens: Arc<dyn AntiForgeryTokenSource>,
        options: HttpGatewayOptions,
    ) -> Result<Self, HttpGatewayBuildError> {
        let students_url = endpoint(base_url, STUDENTS_SEGMENT)?;
        let admin_url = endpoint(base_url, ADMIN_SEGMENT)?;

        let mut builder = Client::builder()
            .cookie_provider(cookies)
            .redirect(reqwest::redirect::Policy::none());
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            students_url,
            admin_url,
            token_header: options.token_header,
            tokens,
        })
    }

    fn student_url(&self, id: &StudentId) -> Result<Url, StudentGatewayError> {
        let mut url = self.students_url.clone();
        url.path_segments_mut()
            .map_err(|()| StudentGatewayError::transport("students URL cannot carry an id"))?
            .push(id.as_str());
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        let Some(token) = self.tokens.current_token() else {
            debug!("no anti-forgery token available");
            return builder;
        };
        match HeaderValue::from_str(token.expose()) {
            Ok(mut value) => {
                value.set_sensitive(true);
                debug!(fingerprint = %token.fingerprint(), "attaching anti-forgery token");
                builder.header(self.token_header.clone(), value)
            }
            Err(_) => {
                warn!(
                    fingerprint = %token.fingerprint(),
                    "anti-forgery token is not a valid header value; sending none"
                );
                builder
            }
        }
    }

    async fn send(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
    ) -> Result<Response, StudentGatewayError> {
        let response = builder.send().await.map_err(map_transport_error)?;
        debug!(operation, status = response.status().as_u16(), "roster response");
        Ok(response)
    }
}

#[async_trait]
impl StudentGateway for ReqwestStudentGateway {
    async fn list_all(&self) -> OperationOutcome<Vec<StudentRecord>> {
        let builder = self
            .request(Method::GET, self.students_url.clone())
            .header(ACCEPT, JSON_MEDIA_TYPE);
        let response = self.send("list", builder).await?;
        if !response.status().is_success() {
            return Err(reject(response).await);
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        decode_student_list(&body).map_err(StudentGatewayError::payload_shape)
    }

    async fn create(&self, student: &NewStudent) -> OperationOutcome<()> {
        let builder = self
            .request(Method::POST, self.students_url.clone())
            .json(student);
        let response = self.send("create", builder).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(reject(response).await)
        }
    }

    async fn remove(&self, id: &StudentId) -> OperationOutcome<()> {
        let url = self.student_url(id)?;
        let builder = self.request(Method::DELETE, url);
        let response = self.send("delete", builder).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(reject(response).await)
        }
    }

    async fn check_authorization(&self) -> OperationOutcome<()> {
        let builder = self
            .request(Method::GET, self.admin_url.clone())
            .header(CONTENT_TYPE, JSON_MEDIA_TYPE);
        let response = self.send("authorization check", builder).await?;
        if response.status() == StatusCode::OK {
            Ok(())
        } else {
            Err(reject(response).await)
        }
    }
}

/// Build the protocol failure for a refused call from its status and the
/// head of its body. Body read errors only shorten the preview.
async fn reject(response: Response) -> StudentGatewayError {
    let status = response.status();
    let body = read_body_head(response, BODY_PREVIEW_BYTE_LIMIT).await;
    map_status_error(status, &body)
}

async fn read_body_head(mut response: Response, limit: usize) -> Vec<u8> {
    let mut head = Vec::new();
    while head.len() < limit {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                let take = chunk.len().min(limit - head.len());
                head.extend_from_slice(chunk.get(..take).unwrap_or_default());
            }
            Ok(None) => break,
            Err(error) => {
                debug!(%error, "failed to read refused response body");
                break;
            }
        }
    }
    head
}

fn endpoint(base_url: &Url, segment: &str) -> Result<Url, HttpGatewayBuildError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| HttpGatewayBuildError::UnusableBaseUrl {
            url: base_url.clone(),
        })?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}

fn map_transport_error(error: reqwest::Error) -> StudentGatewayError {
    if error.is_timeout() {
        StudentGatewayError::timeout(error.to_string())
    } else {
        StudentGatewayError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> StudentGatewayError {
    let preview = body_preview(body);
    if preview.is_empty() {
        StudentGatewayError::protocol(status.as_u16(), status.to_string())
    } else {
        StudentGatewayError::protocol(status.as_u16(), preview)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() <= PREVIEW_CHAR_LIMIT {
        return compact;
    }
    let mut preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    preview.push_str("...");
    preview
}
