//! Shared HTTP client with per-request bearer authorization.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every backend call, login included, goes through one `ApiClient` that
//! owns the base address and default headers. The caller passes the current
//! `Session` into each call; the client never keeps auth state of its own,
//! so a request always reflects the session it was built from.
//!
//! Client-side (`csr`): requests are dispatched with `gloo-net`.
//! Native builds and tests: dispatch goes through whatever `Transport` the
//! client was built with; the default one reports `ApiError::Unavailable`.
//!
//! ERROR HANDLING
//! ==============
//! Failures are returned as `ApiError` exactly once. Nothing is retried and
//! non-2xx statuses are not classified beyond their code and body.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::future::Future;

use http::header::{AUTHORIZATION, AsHeaderName, CONTENT_TYPE, HeaderMap, HeaderValue};
pub use http::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::AppConfig;
use crate::state::session::Session;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A fully-resolved request ready for a `Transport`.
#[derive(Clone, Debug)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl PreparedRequest {
    /// Header value as text, if present and visible ASCII.
    pub fn header<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Status code and body text returned by a `Transport`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("failed to encode request body: {0}")]
    Encode(String),
    #[error("invalid header value: {0}")]
    InvalidHeader(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("request failed with status {status}")]
    Status { status: StatusCode, body: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("HTTP client is only available in the browser")]
    Unavailable,
}

/// Sends a prepared request and returns the raw response.
///
/// Transport errors mean the request never produced a response; any
/// response, successful or not, is returned as `Ok`.
pub trait Transport {
    fn send(&self, request: PreparedRequest) -> impl Future<Output = Result<RawResponse, ApiError>>;
}

/// Browser `fetch` transport backed by `gloo-net`.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[cfg(feature = "csr")]
impl Transport for BrowserTransport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, ApiError> {
        use gloo_net::http::Request;

        let url = request.url.as_str();
        let mut builder = if request.method == Method::GET {
            Request::get(url)
        } else if request.method == Method::POST {
            Request::post(url)
        } else if request.method == Method::PUT {
            Request::put(url)
        } else if request.method == Method::DELETE {
            Request::delete(url)
        } else {
            return Err(ApiError::Transport(format!("unsupported method {}", request.method)));
        };
        for (name, value) in &request.headers {
            let value = value.to_str().map_err(|e| ApiError::InvalidHeader(e.to_string()))?;
            builder = builder.header(name.as_str(), value);
        }
        let built = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Transport(e.to_string()))?;

        let resp = built.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = StatusCode::from_u16(resp.status()).map_err(|e| ApiError::Transport(e.to_string()))?;
        let body = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(RawResponse { status, body })
    }
}

/// Transport for native builds, where there is no browser to send from.
#[cfg(not(feature = "csr"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineTransport;

#[cfg(not(feature = "csr"))]
impl Transport for OfflineTransport {
    async fn send(&self, _request: PreparedRequest) -> Result<RawResponse, ApiError> {
        Err(ApiError::Unavailable)
    }
}

#[cfg(feature = "csr")]
pub type DefaultTransport = BrowserTransport;
#[cfg(not(feature = "csr"))]
pub type DefaultTransport = OfflineTransport;

/// The application's single request-dispatch object.
#[derive(Clone, Debug)]
pub struct ApiClient<T = DefaultTransport> {
    base_url: String,
    default_headers: HeaderMap,
    transport: T,
}

impl ApiClient<DefaultTransport> {
    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_transport(config, DefaultTransport::default())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(config: &AppConfig, transport: T) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        Self { base_url: config.api_base_url.trim_end_matches('/').to_owned(), default_headers, transport }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Build a request with default headers and the session's bearer token.
    ///
    /// An anonymous session leaves the headers untouched.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidHeader` if the token is not a valid header value.
    pub fn prepare(
        &self,
        method: Method,
        path: &str,
        session: &Session,
        body: Option<String>,
    ) -> Result<PreparedRequest, ApiError> {
        let mut headers = self.default_headers.clone();
        if let Some(token) = session.token() {
            let mut value =
                HeaderValue::from_str(&bearer(token)).map_err(|e| ApiError::InvalidHeader(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(PreparedRequest { method, url: self.url(path), headers, body })
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns the header, transport, status, or decode failure unchanged.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str, session: &Session) -> Result<R, ApiError> {
        let request = self.prepare(Method::GET, path, session, None)?;
        let resp = self.dispatch(request).await?;
        decode(&resp)
    }

    /// Send a JSON body and decode a JSON response.
    ///
    /// # Errors
    ///
    /// Returns the encode, header, transport, status, or decode failure unchanged.
    pub async fn send_json<B, R>(&self, method: Method, path: &str, session: &Session, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let payload = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        let request = self.prepare(method, path, session, Some(payload))?;
        let resp = self.dispatch(request).await?;
        decode(&resp)
    }

    /// Send a body-less request whose response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns the header, transport, or status failure unchanged.
    pub async fn send_empty(&self, method: Method, path: &str, session: &Session) -> Result<(), ApiError> {
        let request = self.prepare(method, path, session, None)?;
        self.dispatch(request).await.map(|_| ())
    }

    async fn dispatch(&self, request: PreparedRequest) -> Result<RawResponse, ApiError> {
        log::debug!("{} {}", request.method, request.url);
        let resp = self.transport.send(request).await?;
        if !resp.status.is_success() {
            return Err(ApiError::Status { status: resp.status, body: resp.body });
        }
        Ok(resp)
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

fn decode<R: DeserializeOwned>(resp: &RawResponse) -> Result<R, ApiError> {
    serde_json::from_str(&resp.body).map_err(|e| ApiError::Decode(e.to_string()))
}
