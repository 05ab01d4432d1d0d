//! REST client for the webmail server
//!
//! The four endpoints the client relies on:
//! - `GET  /emails/{mailbox}` - list a mailbox
//! - `GET  /emails/{id}`      - fetch one email
//! - `POST /emails`           - send a new email
//! - `PUT  /emails/{id}`      - update read/archived flags

use std::future::Future;

use reqwest::header::{ACCEPT, COOKIE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url, redirect};
use serde::Deserialize;

use super::types::{Email, EmailUpdate, Mailbox, NewEmail};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid server URL: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Status {
        status: StatusCode,
        /// The `error` field of the JSON response body, when present
        message: Option<String>,
    },
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Human-readable message supplied by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Remote email store as seen by the client.
///
/// Implemented by [`ApiClient`] for the real server; tests substitute an
/// in-memory store.
pub trait MailStore: Send + Sync + 'static {
    fn list_mailbox(
        &self,
        mailbox: Mailbox,
    ) -> impl Future<Output = Result<Vec<Email>, ApiError>> + Send;

    fn get_email(&self, id: u64) -> impl Future<Output = Result<Email, ApiError>> + Send;

    fn send_email(&self, email: &NewEmail) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn update_email(
        &self,
        id: u64,
        update: EmailUpdate,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP implementation of [`MailStore`]
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
    /// Raw `Cookie` header value forwarded with every request
    session: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Option<String>) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url.trim())
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        // Url::join replaces the last segment unless the path ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        // A 3xx, such as a login redirect for an expired session, is a failure
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            base,
            session: session.filter(|s| !s.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        match self.session {
            Some(ref cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    /// Turn non-2xx responses into `ApiError::Status`, keeping the server's message
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .map(|body| body.error);
        Err(ApiError::Status { status, message })
    }
}

impl MailStore for ApiClient {
    async fn list_mailbox(&self, mailbox: Mailbox) -> Result<Vec<Email>, ApiError> {
        let url = self.endpoint(&format!("emails/{}", mailbox.as_str()))?;
        tracing::debug!("GET {}", url);

        let response = Self::check(self.request(Method::GET, url).send().await?).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_email(&self, id: u64) -> Result<Email, ApiError> {
        let url = self.endpoint(&format!("emails/{}", id))?;
        tracing::debug!("GET {}", url);

        let response = Self::check(self.request(Method::GET, url).send().await?).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_email(&self, email: &NewEmail) -> Result<(), ApiError> {
        let url = self.endpoint("emails")?;
        tracing::debug!("POST {}", url);

        // The success body is informational, but it must be JSON
        let response = self.request(Method::POST, url).json(email).send().await?;
        let response = Self::check(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice::<serde_json::Value>(&bytes)?;
        Ok(())
    }

    async fn update_email(&self, id: u64, update: EmailUpdate) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("emails/{}", id))?;
        tracing::debug!("PUT {} {:?}", url, update);

        Self::check(self.request(Method::PUT, url).json(&update).send().await?).await?;
        Ok(())
    }
}
