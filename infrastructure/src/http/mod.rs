//! HTTP transport boundary
//!
//! Adapters never hold a concrete HTTP client; they go through the
//! [`HttpTransport`] trait so the same authenticate/call/normalize sequence
//! runs against the real network in production and against a call-recording
//! stub in tests.

mod reqwest_transport;

#[cfg(test)]
pub(crate) mod stub;

pub use reqwest_transport::ReqwestTransport;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors below the HTTP status level: the request never produced a response.
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// HTTP method subset the adapters use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// One upstream HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    /// URL-encoded form body (token endpoint)
    pub form: Option<Vec<(String, String)>>,
    /// JSON body
    pub json: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            form: None,
            json: None,
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            ..Self::get(url)
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_form(mut self, fields: Vec<(String, String)>) -> Self {
        self.form = Some(fields);
        self
    }

    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.json = Some(body);
        self
    }

    /// Value of a query parameter, if set
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// One upstream HTTP response: status plus full body
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether a token refresh-and-retry is warranted
    pub fn is_auth_failure(&self) -> bool {
        self.status == 401 || self.status == 403
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    pub fn json_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Transport abstraction every upstream call goes through
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue one request with a bounded timeout and return the response,
    /// whatever its status code
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}
