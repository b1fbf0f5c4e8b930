//! Client settings and the four call entry points.
//!
//! # Design
//! `Client` holds only configuration: base URL, headers, cookies, timeout
//! and the TLS-verify flag. It carries no mutable state between calls and
//! is cheap to clone. Each endpoint type builds an `HttpRequest` from the
//! client and parses the `HttpResponse`; `Client` only wires those two
//! halves to a transport:
//!
//! | entry point               | transport | returns                |
//! |---------------------------|-----------|------------------------|
//! | `send_blocking_detailed`  | ureq      | `Response<T>`          |
//! | `send_blocking`           | ureq      | `Option<T>`            |
//! | `send_detailed`           | reqwest   | `Response<T>`          |
//! | `send`                    | reqwest   | `Option<T>`            |

use std::time::Duration;

use crate::api::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, Response};
use crate::transport;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for the remote jobflow API.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    headers: Vec<(String, String)>,
    cookies: Vec<(String, String)>,
    timeout: Duration,
    verify_ssl: bool,
}

impl Client {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: Vec::new(),
            cookies: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            verify_ssl: true,
        }
    }

    /// Set a header, replacing any existing header with the same name.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        headers
            .into_iter()
            .fold(self, |client, (k, v)| client.with_header(k.as_ref(), v.as_ref()))
    }

    /// Set a cookie, replacing any existing cookie with the same name.
    pub fn with_cookie(mut self, name: &str, value: &str) -> Self {
        self.cookies.retain(|(key, _)| key != name);
        self.cookies.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_cookies<I, K, V>(self, cookies: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        cookies
            .into_iter()
            .fold(self, |client, (k, v)| client.with_cookie(k.as_ref(), v.as_ref()))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.verify_ssl = verify_ssl;
        self
    }

    /// Authenticate every request with `Authorization: Bearer <token>`.
    pub fn with_token(self, token: &str) -> Self {
        self.with_header("Authorization", &format!("Bearer {token}"))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn cookies(&self) -> &[(String, String)] {
        &self.cookies
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    /// Start a request for `path` (already interpolated) carrying this
    /// client's headers, cookies, timeout and TLS setting.
    pub fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            query: Vec::new(),
            headers: self.headers.clone(),
            cookies: self.cookies.clone(),
            body: None,
            timeout: self.timeout,
            verify_ssl: self.verify_ssl,
        }
    }

    pub fn send_blocking_detailed<E: Endpoint>(
        &self,
        endpoint: &E,
    ) -> Result<Response<E::Output>, ApiError> {
        let request = endpoint.build_request(self)?;
        let response = transport::blocking::execute(&request)?;
        E::parse_response(response)
    }

    pub fn send_blocking<E: Endpoint>(&self, endpoint: &E) -> Result<Option<E::Output>, ApiError> {
        Ok(self.send_blocking_detailed(endpoint)?.parsed)
    }

    pub async fn send_detailed<E: Endpoint>(
        &self,
        endpoint: &E,
    ) -> Result<Response<E::Output>, ApiError> {
        let request = endpoint.build_request(self)?;
        let response = transport::nonblocking::execute(&request).await?;
        E::parse_response(response)
    }

    pub async fn send<E: Endpoint>(&self, endpoint: &E) -> Result<Option<E::Output>, ApiError> {
        Ok(self.send_detailed(endpoint).await?.parsed)
    }
}
