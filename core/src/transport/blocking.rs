//! Blocking transport on top of `ureq`; runs on the caller's thread.

use ureq::tls::TlsConfig;
use ureq::RequestBuilder;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Execute `request` to completion on the current thread.
///
/// ureq's status-as-error behavior is disabled so 4xx/5xx responses are
/// returned as data and left to the endpoint to interpret.
pub fn execute(request: &HttpRequest) -> Result<HttpResponse, ApiError> {
    let url = request.to_url()?;
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(Some(request.timeout))
        .tls_config(
            TlsConfig::builder()
                .disable_verification(!request.verify_ssl)
                .build(),
        )
        .build()
        .new_agent();

    tracing::debug!(method = request.method.as_str(), %url, "sending blocking request");

    let headers = request.header_pairs();
    let mut response = match (request.method, request.body.as_deref()) {
        (HttpMethod::Get, _) => with_headers(agent.get(url.as_str()), &headers).call(),
        (HttpMethod::Delete, _) => with_headers(agent.delete(url.as_str()), &headers).call(),
        (HttpMethod::Post, Some(body)) => {
            with_headers(agent.post(url.as_str()), &headers).send(body.as_bytes())
        }
        (HttpMethod::Post, None) => with_headers(agent.post(url.as_str()), &headers).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            with_headers(agent.put(url.as_str()), &headers).send(body.as_bytes())
        }
        (HttpMethod::Put, None) => with_headers(agent.put(url.as_str()), &headers).send_empty(),
    }?;

    let status = response.status().as_u16();
    let headers = super::header_pairs(
        response
            .headers()
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_bytes())),
    );
    // same as reqwest: no cap on body size
    let body = response
        .body_mut()
        .with_config()
        .limit(u64::MAX)
        .read_to_vec()?;

    tracing::debug!(status, bytes = body.len(), "received blocking response");

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
