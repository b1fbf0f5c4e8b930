//! Job endpoints: listing, completed-job lookup and deletion, flow previews.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::client::Client;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::maybe::Maybe;
use crate::models::{CompletedJob, FlowPreview, Job, QueuedJob};
use crate::query::QueryParams;

use super::{decode_json, decode_text, Endpoint};

/// Filters shared by the three job listing endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    pub created_by: Maybe<String>,
    pub parent_job: Maybe<Uuid>,
    pub script_path_exact: Maybe<String>,
    pub script_path_start: Maybe<String>,
    pub script_hash: Maybe<String>,
    pub created_before: Maybe<DateTime<Utc>>,
    pub created_after: Maybe<DateTime<Utc>>,
    /// Comma-separated job kinds, e.g. `"script,flow"`.
    pub job_kinds: Maybe<String>,
    pub success: Maybe<bool>,
}

impl JobFilter {
    fn push_to(&self, query: &mut QueryParams) {
        query
            .push("created_by", &self.created_by)
            .push("parent_job", &self.parent_job)
            .push("script_path_exact", &self.script_path_exact)
            .push("script_path_start", &self.script_path_start)
            .push("script_hash", &self.script_hash)
            .push("created_before", &self.created_before)
            .push("created_after", &self.created_after)
            .push("job_kinds", &self.job_kinds)
            .push("success", &self.success);
    }
}

/// `GET /w/{workspace}/jobs/list`: queued and completed jobs together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListJobs {
    pub workspace: String,
    pub filter: JobFilter,
    pub is_skipped: Maybe<bool>,
    pub is_flow_step: Maybe<bool>,
}

impl ListJobs {
    pub fn new(workspace: &str) -> Self {
        Self {
            workspace: workspace.to_string(),
            ..Self::default()
        }
    }
}

impl Endpoint for ListJobs {
    type Output = Vec<Job>;

    fn build_request(&self, client: &Client) -> Result<HttpRequest, ApiError> {
        let mut query = QueryParams::new();
        self.filter.push_to(&mut query);
        query
            .push("is_skipped", &self.is_skipped)
            .push("is_flow_step", &self.is_flow_step);
        Ok(client
            .request(HttpMethod::Get, &format!("/w/{}/jobs/list", self.workspace))
            .with_query(query))
    }

    fn parse_body(body: &[u8]) -> Result<Vec<Job>, ApiError> {
        decode_json(body)
    }
}

/// `GET /w/{workspace}/jobs/queue/list`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQueue {
    pub workspace: String,
    pub order_desc: Maybe<bool>,
    pub filter: JobFilter,
    pub suspended: Maybe<bool>,
    pub running: Maybe<bool>,
}

impl ListQueue {
    pub fn new(workspace: &str) -> Self {
        Self {
            workspace: workspace.to_string(),
            ..Self::default()
        }
    }
}

impl Endpoint for ListQueue {
    type Output = Vec<QueuedJob>;

    fn build_request(&self, client: &Client) -> Result<HttpRequest, ApiError> {
        let mut query = QueryParams::new();
        query.push("order_desc", &self.order_desc);
        self.filter.push_to(&mut query);
        query
            .push("suspended", &self.suspended)
            .push("running", &self.running);
        Ok(client
            .request(HttpMethod::Get, &format!("/w/{}/jobs/queue/list", self.workspace))
            .with_query(query))
    }

    fn parse_body(body: &[u8]) -> Result<Vec<QueuedJob>, ApiError> {
        decode_json(body)
    }
}

/// `GET /w/{workspace}/jobs/completed/list`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListCompletedJobs {
    pub workspace: String,
    pub order_desc: Maybe<bool>,
    pub filter: JobFilter,
    pub is_skipped: Maybe<bool>,
    pub is_flow_step: Maybe<bool>,
}

impl ListCompletedJobs {
    pub fn new(workspace: &str) -> Self {
        Self {
            workspace: workspace.to_string(),
            ..Self::default()
        }
    }
}

impl Endpoint for ListCompletedJobs {
    type Output = Vec<CompletedJob>;

    fn build_request(&self, client: &Client) -> Result<HttpRequest, ApiError> {
        let mut query = QueryParams::new();
        query.push("order_desc", &self.order_desc);
        self.filter.push_to(&mut query);
        query
            .push("is_skipped", &self.is_skipped)
            .push("is_flow_step", &self.is_flow_step);
        Ok(client
            .request(
                HttpMethod::Get,
                &format!("/w/{}/jobs/completed/list", self.workspace),
            )
            .with_query(query))
    }

    fn parse_body(body: &[u8]) -> Result<Vec<CompletedJob>, ApiError> {
        decode_json(body)
    }
}

/// `GET /w/{workspace}/jobs/completed/get/{id}`
#[derive(Debug, Clone, PartialEq)]
pub struct GetCompletedJob {
    pub workspace: String,
    pub id: Uuid,
}

impl GetCompletedJob {
    pub fn new(workspace: &str, id: Uuid) -> Self {
        Self {
            workspace: workspace.to_string(),
            id,
        }
    }
}

impl Endpoint for GetCompletedJob {
    type Output = CompletedJob;

    fn build_request(&self, client: &Client) -> Result<HttpRequest, ApiError> {
        Ok(client.request(
            HttpMethod::Get,
            &format!("/w/{}/jobs/completed/get/{}", self.workspace, self.id),
        ))
    }

    fn parse_body(body: &[u8]) -> Result<CompletedJob, ApiError> {
        decode_json(body)
    }
}

/// `POST /w/{workspace}/jobs/completed/delete/{id}`: scrubs the job's
/// arguments, logs and result and returns the updated record.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteCompletedJob {
    pub workspace: String,
    pub id: Uuid,
}

impl DeleteCompletedJob {
    pub fn new(workspace: &str, id: Uuid) -> Self {
        Self {
            workspace: workspace.to_string(),
            id,
        }
    }
}

impl Endpoint for DeleteCompletedJob {
    type Output = CompletedJob;

    fn build_request(&self, client: &Client) -> Result<HttpRequest, ApiError> {
        Ok(client.request(
            HttpMethod::Post,
            &format!("/w/{}/jobs/completed/delete/{}", self.workspace, self.id),
        ))
    }

    fn parse_body(body: &[u8]) -> Result<CompletedJob, ApiError> {
        decode_json(body)
    }
}

/// `POST /w/{workspace}/jobs/run/preview_flow`; answers 201 with the new
/// job id as plain text.
#[derive(Debug, Clone, PartialEq)]
pub struct RunFlowPreview {
    pub workspace: String,
    pub body: FlowPreview,
}

impl RunFlowPreview {
    pub fn new(workspace: &str, body: FlowPreview) -> Self {
        Self {
            workspace: workspace.to_string(),
            body,
        }
    }
}

impl Endpoint for RunFlowPreview {
    type Output = Uuid;

    fn build_request(&self, client: &Client) -> Result<HttpRequest, ApiError> {
        client
            .request(
                HttpMethod::Post,
                &format!("/w/{}/jobs/run/preview_flow", self.workspace),
            )
            .with_json(&self.body)
    }

    fn parse_body(body: &[u8]) -> Result<Uuid, ApiError> {
        let text = decode_text(body)?;
        Uuid::parse_str(text.trim()).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    fn success_status() -> u16 {
        201
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use crate::models::FlowValue;
    use chrono::TimeZone;

    fn client() -> Client {
        Client::new("http://localhost:8000/api")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn list_jobs_without_filters_sends_no_query() {
        let req = ListJobs::new("demo").build_request(&client()).unwrap();
        assert_eq!(req.url, "http://localhost:8000/api/w/demo/jobs/list");
        assert!(req.query.is_empty());
    }

    #[test]
    fn list_jobs_drops_null_and_unset_filters() {
        let endpoint = ListJobs {
            filter: JobFilter {
                created_by: Maybe::Null,
                script_path_start: Maybe::Set("f/etl".to_string()),
                created_after: Maybe::Set(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()),
                success: Maybe::Set(true),
                ..JobFilter::default()
            },
            is_flow_step: Maybe::Set(false),
            ..ListJobs::new("demo")
        };
        let req = endpoint.build_request(&client()).unwrap();
        assert_eq!(
            req.query,
            vec![
                ("script_path_start".to_string(), "f/etl".to_string()),
                ("created_after".to_string(), "2023-01-01T00:00:00+00:00".to_string()),
                ("success".to_string(), "true".to_string()),
                ("is_flow_step".to_string(), "false".to_string()),
            ]
        );
        let url = req.to_url().unwrap();
        assert!(!url.as_str().contains("created_by"));
        assert!(!url.as_str().contains("is_skipped"));
    }

    #[test]
    fn list_queue_and_completed_paths() {
        let queue = ListQueue {
            running: Maybe::Set(true),
            ..ListQueue::new("demo")
        }
        .build_request(&client())
        .unwrap();
        assert_eq!(queue.url, "http://localhost:8000/api/w/demo/jobs/queue/list");
        assert_eq!(queue.query, vec![("running".to_string(), "true".to_string())]);

        let completed = ListCompletedJobs {
            order_desc: Maybe::Set(true),
            ..ListCompletedJobs::new("demo")
        }
        .build_request(&client())
        .unwrap();
        assert_eq!(
            completed.url,
            "http://localhost:8000/api/w/demo/jobs/completed/list"
        );
        assert_eq!(completed.query, vec![("order_desc".to_string(), "true".to_string())]);
    }

    #[test]
    fn completed_job_get_and_delete() {
        let get = GetCompletedJob::new("demo", Uuid::nil())
            .build_request(&client())
            .unwrap();
        assert_eq!(get.method, HttpMethod::Get);
        assert_eq!(
            get.url,
            "http://localhost:8000/api/w/demo/jobs/completed/get/00000000-0000-0000-0000-000000000000"
        );

        let delete = DeleteCompletedJob::new("demo", Uuid::nil())
            .build_request(&client())
            .unwrap();
        assert_eq!(delete.method, HttpMethod::Post);
        assert!(delete.body.is_none());
    }

    #[test]
    fn list_jobs_parses_mixed_job_types() {
        let body = r#"[
            {"type":"QueuedJob","id":"00000000-0000-0000-0000-000000000001","running":false,
             "canceled":false,"job_kind":"script","permissioned_as":"u/bob","is_flow_step":false},
            {"type":"CompletedJob","id":"00000000-0000-0000-0000-000000000002","created_by":"bob",
             "created_at":"2023-01-11T02:00:00Z","started_at":"2023-01-11T02:00:01Z","duration_ms":3,
             "success":false,"canceled":false,"job_kind":"flow","permissioned_as":"u/bob",
             "is_flow_step":false,"is_skipped":false}
        ]"#;
        let jobs = ListJobs::parse_response(response(200, body))
            .unwrap()
            .parsed
            .unwrap();
        assert_eq!(jobs.len(), 2);
        assert!(jobs[0].as_queued().is_some());
        assert!(!jobs[1].as_completed().unwrap().success);
    }

    #[test]
    fn run_flow_preview_expects_201_with_uuid_text() {
        let req = RunFlowPreview::new(
            "demo",
            FlowPreview {
                value: FlowValue::default(),
                path: Maybe::Unset,
                args: serde_json::Map::new(),
                additional_properties: Default::default(),
            },
        )
        .build_request(&client())
        .unwrap();
        assert_eq!(req.url, "http://localhost:8000/api/w/demo/jobs/run/preview_flow");
        assert_eq!(req.body.as_deref(), Some(r#"{"value":{"modules":[]},"args":{}}"#));

        let created = RunFlowPreview::parse_response(response(
            201,
            "7c9e6679-7425-40de-944b-e07fc1f90ae7",
        ))
        .unwrap();
        assert_eq!(
            created.parsed,
            Some(Uuid::parse_str("7c9e6679-7425-40de-944b-e07fc1f90ae7").unwrap())
        );

        let ok_but_not_created = RunFlowPreview::parse_response(response(200, "whatever")).unwrap();
        assert!(ok_but_not_created.parsed.is_none());

        let bad = RunFlowPreview::parse_response(response(201, "not-a-uuid")).unwrap_err();
        assert!(matches!(bad, ApiError::DeserializationError(_)));
    }
}
