//! Token endpoints for the authenticated user.

use crate::client::Client;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::models::{NewToken, TruncatedToken};

use super::{decode_json, decode_text, Endpoint};

/// `GET /users/tokens/list`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ListTokens;

impl Endpoint for ListTokens {
    type Output = Vec<TruncatedToken>;

    fn build_request(&self, client: &Client) -> Result<HttpRequest, ApiError> {
        Ok(client.request(HttpMethod::Get, "/users/tokens/list"))
    }

    fn parse_body(body: &[u8]) -> Result<Vec<TruncatedToken>, ApiError> {
        decode_json(body)
    }
}

/// `POST /users/tokens/create`; answers 201 with the full token as plain text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateToken {
    pub body: NewToken,
}

impl CreateToken {
    pub fn new(body: NewToken) -> Self {
        Self { body }
    }
}

impl Endpoint for CreateToken {
    type Output = String;

    fn build_request(&self, client: &Client) -> Result<HttpRequest, ApiError> {
        client
            .request(HttpMethod::Post, "/users/tokens/create")
            .with_json(&self.body)
    }

    fn parse_body(body: &[u8]) -> Result<String, ApiError> {
        decode_text(body)
    }

    fn success_status() -> u16 {
        201
    }
}
