//! Flow endpoints.

use crate::client::Client;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::maybe::Maybe;
use crate::models::{Flow, HubFlow, OpenFlowWPath};
use crate::query::QueryParams;

use super::{decode_json, decode_text, Endpoint};

/// `GET /w/{workspace}/flows/get/{path}`
#[derive(Debug, Clone, PartialEq)]
pub struct GetFlowByPath {
    pub workspace: String,
    pub path: String,
}

impl GetFlowByPath {
    pub fn new(workspace: &str, path: &str) -> Self {
        Self {
            workspace: workspace.to_string(),
            path: path.to_string(),
        }
    }
}

impl Endpoint for GetFlowByPath {
    type Output = Flow;

    fn build_request(&self, client: &Client) -> Result<HttpRequest, ApiError> {
        Ok(client.request(
            HttpMethod::Get,
            &format!("/w/{}/flows/get/{}", self.workspace, self.path),
        ))
    }

    fn parse_body(body: &[u8]) -> Result<Flow, ApiError> {
        decode_json(body)
    }
}

/// `GET /w/{workspace}/flows/list`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFlows {
    pub workspace: String,
    pub page: Maybe<i32>,
    pub per_page: Maybe<i32>,
    pub order_desc: Maybe<bool>,
    pub created_by: Maybe<String>,
    pub path_start: Maybe<String>,
    pub path_exact: Maybe<String>,
    pub show_archived: Maybe<bool>,
}

impl ListFlows {
    pub fn new(workspace: &str) -> Self {
        Self {
            workspace: workspace.to_string(),
            ..Self::default()
        }
    }
}

impl Endpoint for ListFlows {
    type Output = Vec<Flow>;

    fn build_request(&self, client: &Client) -> Result<HttpRequest, ApiError> {
        let mut query = QueryParams::new();
        query
            .push("page", &self.page)
            .push("per_page", &self.per_page)
            .push("order_desc", &self.order_desc)
            .push("created_by", &self.created_by)
            .push("path_start", &self.path_start)
            .push("path_exact", &self.path_exact)
            .push("show_archived", &self.show_archived);
        Ok(client
            .request(HttpMethod::Get, &format!("/w/{}/flows/list", self.workspace))
            .with_query(query))
    }

    fn parse_body(body: &[u8]) -> Result<Vec<Flow>, ApiError> {
        decode_json(body)
    }
}

/// `POST /w/{workspace}/flows/update/{path}`; the server answers with a
/// plain-text confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateFlow {
    pub workspace: String,
    pub path: String,
    pub body: OpenFlowWPath,
}

impl UpdateFlow {
    pub fn new(workspace: &str, path: &str, body: OpenFlowWPath) -> Self {
        Self {
            workspace: workspace.to_string(),
            path: path.to_string(),
            body,
        }
    }
}

impl Endpoint for UpdateFlow {
    type Output = String;

    fn build_request(&self, client: &Client) -> Result<HttpRequest, ApiError> {
        client
            .request(
                HttpMethod::Post,
                &format!("/w/{}/flows/update/{}", self.workspace, self.path),
            )
            .with_json(&self.body)
    }

    fn parse_body(body: &[u8]) -> Result<String, ApiError> {
        decode_text(body)
    }
}

/// `GET /hub/flows/get/{id}`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GetHubFlowById {
    pub id: i64,
}

impl GetHubFlowById {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Endpoint for GetHubFlowById {
    type Output = HubFlow;

    fn build_request(&self, client: &Client) -> Result<HttpRequest, ApiError> {
        Ok(client.request(HttpMethod::Get, &format!("/hub/flows/get/{}", self.id)))
    }

    fn parse_body(body: &[u8]) -> Result<HubFlow, ApiError> {
        decode_json(body)
    }
}
