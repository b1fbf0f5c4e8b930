//! Endpoint definitions.
//!
//! # Design
//! Each endpoint is a plain struct holding its path parameters and its
//! optional query parameters (as `Maybe<T>`) or body. `Endpoint` splits a
//! call into `build_request` (produces an `HttpRequest`) and
//! `parse_response` (consumes an `HttpResponse`), so every endpoint can be
//! tested without a network and the four `Client::send*` entry points share
//! exactly the same building and parsing code.
//!
//! Only the endpoint's success status yields a parsed value. Any other
//! status produces a `Response` with `parsed: None`, never an error.

pub mod flow;
pub mod job;
pub mod script;
pub mod user;

use serde::de::DeserializeOwned;

use crate::client::Client;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Response};

pub use flow::{GetFlowByPath, GetHubFlowById, ListFlows, UpdateFlow};
pub use job::{
    DeleteCompletedJob, GetCompletedJob, JobFilter, ListCompletedJobs, ListJobs, ListQueue,
    RunFlowPreview,
};
pub use script::GetScriptByPath;
pub use user::{CreateToken, ListTokens};

/// One REST endpoint of the remote API.
pub trait Endpoint {
    /// Decoded body of a success response.
    type Output;

    fn build_request(&self, client: &Client) -> Result<HttpRequest, ApiError>;

    fn parse_body(body: &[u8]) -> Result<Self::Output, ApiError>;

    /// Status that carries a body worth decoding.
    fn success_status() -> u16 {
        200
    }

    fn parse_response(response: HttpResponse) -> Result<Response<Self::Output>, ApiError> {
        let parsed = if response.status == Self::success_status() {
            Some(Self::parse_body(&response.body)?)
        } else {
            tracing::debug!(
                status = response.status,
                expected = Self::success_status(),
                "response carries no parsed value"
            );
            None
        };
        Ok(Response {
            status_code: response.status,
            headers: response.headers,
            content: response.body,
            parsed,
        })
    }
}

pub(crate) fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

pub(crate) fn decode_text(body: &[u8]) -> Result<String, ApiError> {
    String::from_utf8(body.to_vec()).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
