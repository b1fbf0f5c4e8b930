//! HTTP request/response descriptors and the response envelope.
//!
//! # Design
//! Requests and responses are plain data. Endpoints build `HttpRequest`
//! values and parse `HttpResponse` values without touching the network; the
//! transports in `transport` are the only code that does I/O. Every field
//! is owned so a request can be built on one thread and sent from another.

use std::time::Duration;

use serde::Serialize;
use url::Url;

use crate::error::ApiError;
use crate::query::QueryParams;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` holds base URL and interpolated path; the query string lives in
/// `query` and is only encoded by `to_url`, so tests can inspect exactly
/// which parameters will be transmitted.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub cookies: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Duration,
    pub verify_ssl: bool,
}

impl HttpRequest {
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query.into_pairs();
        self
    }

    /// Attach `body` as a JSON payload and set the matching content type.
    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_string(body)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        self.headers
            .push(("content-type".to_string(), "application/json".to_string()));
        self.body = Some(body);
        Ok(self)
    }

    /// Full URL with the percent-encoded query string.
    pub fn to_url(&self) -> Result<Url, ApiError> {
        let mut url =
            Url::parse(&self.url).map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.url)))?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        Ok(url)
    }

    /// Headers to put on the wire, with cookies folded into one `cookie` header.
    pub fn header_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.headers.clone();
        if !self.cookies.is_empty() {
            let cookie = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            pairs.push(("cookie".to_string(), cookie));
        }
        pairs
    }
}

/// An HTTP response described as plain data, as returned by a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Full response envelope returned by the `*_detailed` entry points.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    pub status_code: u16,
    pub headers: Vec<(String, String)>,
    pub content: Vec<u8>,
    /// Decoded body; `None` for any status other than the endpoint's success status.
    pub parsed: Option<T>,
}

impl<T> Response<T> {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Response<U> {
        Response {
            status_code: self.status_code,
            headers: self.headers,
            content: self.content,
            parsed: self.parsed.map(f),
        }
    }

    /// Turn a response without a parsed value into `ApiError::UnexpectedStatus`.
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.parsed.is_some() {
            return Ok(self);
        }
        Err(ApiError::UnexpectedStatus {
            status: self.status_code,
            body: String::from_utf8_lossy(&self.content).into_owned(),
        })
    }
}
