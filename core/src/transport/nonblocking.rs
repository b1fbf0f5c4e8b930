//! Non-blocking transport on top of `reqwest`.
//!
//! Each call builds its own `reqwest::Client`, uses it for exactly one
//! exchange and drops it, so concurrent calls share no connection state.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Execute `request`, suspending the calling task for the exchange.
pub async fn execute(request: &HttpRequest) -> Result<HttpResponse, ApiError> {
    let url = request.to_url()?;
    let http = reqwest::Client::builder()
        .timeout(request.timeout)
        .danger_accept_invalid_certs(!request.verify_ssl)
        .build()?;

    tracing::debug!(method = request.method.as_str(), %url, "sending request");

    let method = match request.method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    };
    let mut builder = http.request(method, url.as_str());
    for (name, value) in request.header_pairs() {
        builder = builder.header(name, value);
    }
    if let Some(body) = &request.body {
        builder = builder.body(body.clone());
    }

    let response = builder.send().await?;
    let status = response.status().as_u16();
    let headers = super::header_pairs(
        response
            .headers()
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_bytes())),
    );
    let body = response.bytes().await?.to_vec();

    tracing::debug!(status, bytes = body.len(), "received response");

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}
