//! Typed client for a job/workflow-orchestration REST API.
//!
//! # Overview
//! Every endpoint is a struct implementing [`Endpoint`]: it builds an
//! [`HttpRequest`] from a [`Client`] and parses an [`HttpResponse`] into a
//! [`Response`] envelope. The `Client` sends an endpoint four ways:
//!
//! ```no_run
//! use jobflow_client::{Client, GetFlowByPath};
//!
//! # async fn demo() -> Result<(), jobflow_client::ApiError> {
//! let client = Client::new("http://localhost:8000/api").with_token("secret");
//! let endpoint = GetFlowByPath::new("demo", "u/admin/etl");
//!
//! let envelope = client.send_blocking_detailed(&endpoint)?; // status, headers, bytes, parsed
//! let flow = client.send_blocking(&endpoint)?;              // parsed only
//! let envelope = client.send_detailed(&endpoint).await?;
//! let flow = client.send(&endpoint).await?;
//! # let _ = (envelope, flow);
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - `Client` is stateless configuration; nothing is cached between calls.
//! - Only the endpoint's success status is decoded. Other statuses give
//!   `parsed: None`, not an error.
//! - Optional fields and query parameters are [`Maybe`]: absent, null or set.
//!   Absent and null query parameters are never transmitted.
//! - Unknown JSON keys are preserved on every model for round trips.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod maybe;
pub mod models;
pub mod query;
pub mod transport;

pub use api::{
    CreateToken, DeleteCompletedJob, Endpoint, GetCompletedJob, GetFlowByPath, GetHubFlowById,
    GetScriptByPath, JobFilter, ListCompletedJobs, ListFlows, ListJobs, ListQueue, ListTokens,
    RunFlowPreview, UpdateFlow,
};
pub use client::Client;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Response};
pub use maybe::Maybe;
pub use query::QueryParams;
