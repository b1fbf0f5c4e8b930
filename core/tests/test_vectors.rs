//! Verify request building and response parsing against the JSON test
//! vectors stored in `test-vectors/`.
//!
//! Each vector file describes endpoint inputs, the expected request, a
//! simulated response and the expected parse result (`null` when the status
//! is not the endpoint's success status). Bodies are compared as parsed JSON
//! so key order does not matter.

use chrono::{DateTime, Utc};
use jobflow_client::models::{Flow, FlowPreview, Job, NewToken};
use jobflow_client::{
    Client, CreateToken, Endpoint, GetFlowByPath, HttpMethod, HttpRequest, HttpResponse, JobFilter,
    ListJobs, Maybe, RunFlowPreview,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:8000/api";

fn client() -> Client {
    Client::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (
                arr[0].as_str().unwrap().to_string(),
                arr[1].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(
        req.method,
        parse_method(expected["method"].as_str().unwrap()),
        "{name}: method"
    );
    assert_eq!(
        req.url,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: path"
    );
    assert_eq!(req.query, pairs(&expected["query"]), "{name}: query");
    assert_eq!(req.headers, pairs(&expected["headers"]), "{name}: headers");
    if let Some(url) = expected["url"].as_str() {
        assert_eq!(req.to_url().unwrap().as_str(), url, "{name}: encoded url");
    }
    match &expected["body"] {
        Value::Null => assert!(req.body.is_none(), "{name}: unexpected body"),
        body => {
            let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&sent, body, "{name}: body");
        }
    }
}

/// Text bodies are stored as strings, JSON bodies as JSON.
fn simulated(sim: &Value) -> HttpResponse {
    let body = match &sim["body"] {
        Value::String(text) => text.clone().into_bytes(),
        json => serde_json::to_vec(json).unwrap(),
    };
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body,
    }
}

/// Build, check and parse every case in `raw`, handing each parse result to
/// `check` together with the case's `expected_result`.
fn run_vectors<E, F>(raw: &str, endpoint: F, check: impl Fn(&str, Option<E::Output>, &Value))
where
    E: Endpoint,
    F: Fn(&Value) -> E,
{
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let endpoint = endpoint(&case["input"]);

        let req = endpoint.build_request(&c).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let response = E::parse_response(simulated(&case["simulated_response"])).unwrap();
        assert_eq!(
            response.status_code as u64,
            case["simulated_response"]["status"].as_u64().unwrap(),
            "{name}: status"
        );
        check(name, response.parsed, &case["expected_result"]);
    }
}

// ---------------------------------------------------------------------------
// ListJobs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ListJobsInput {
    workspace: String,
    #[serde(default)]
    created_by: Maybe<String>,
    #[serde(default)]
    parent_job: Maybe<Uuid>,
    #[serde(default)]
    script_hash: Maybe<String>,
    #[serde(default)]
    created_after: Maybe<DateTime<Utc>>,
    #[serde(default)]
    job_kinds: Maybe<String>,
    #[serde(default)]
    success: Maybe<bool>,
    #[serde(default)]
    is_skipped: Maybe<bool>,
    #[serde(default)]
    is_flow_step: Maybe<bool>,
}

#[test]
fn list_jobs_vectors() {
    run_vectors(
        include_str!("../../test-vectors/list_jobs.json"),
        |input| {
            let input: ListJobsInput = serde_json::from_value(input.clone()).unwrap();
            ListJobs {
                workspace: input.workspace,
                filter: JobFilter {
                    created_by: input.created_by,
                    parent_job: input.parent_job,
                    script_hash: input.script_hash,
                    created_after: input.created_after,
                    job_kinds: input.job_kinds,
                    success: input.success,
                    ..JobFilter::default()
                },
                is_skipped: input.is_skipped,
                is_flow_step: input.is_flow_step,
            }
        },
        |name, parsed: Option<Vec<Job>>, expected| {
            let expected: Option<Vec<Job>> = serde_json::from_value(expected.clone()).unwrap();
            assert_eq!(parsed, expected, "{name}: parsed result");
        },
    );
}

// ---------------------------------------------------------------------------
// GetFlowByPath
// ---------------------------------------------------------------------------

#[test]
fn get_flow_by_path_vectors() {
    run_vectors(
        include_str!("../../test-vectors/get_flow_by_path.json"),
        |input| {
            GetFlowByPath::new(
                input["workspace"].as_str().unwrap(),
                input["path"].as_str().unwrap(),
            )
        },
        |name, parsed: Option<Flow>, expected| {
            let expected: Option<Flow> = serde_json::from_value(expected.clone()).unwrap();
            assert_eq!(parsed, expected, "{name}: parsed result");
            // unknown keys and explicit nulls survive a round trip
            if let Some(flow) = parsed {
                let reencoded = serde_json::to_value(&flow).unwrap();
                assert_eq!(reencoded["visible_to_runner_only"], true, "{name}: extra key");
                assert_eq!(reencoded["description"], Value::Null, "{name}: null kept");
                assert!(reencoded.get("schema").is_none(), "{name}: absent stays absent");
            }
        },
    );
}

// ---------------------------------------------------------------------------
// CreateToken
// ---------------------------------------------------------------------------

#[test]
fn create_token_vectors() {
    run_vectors(
        include_str!("../../test-vectors/create_token.json"),
        |input| {
            let body: NewToken = serde_json::from_value(input.clone()).unwrap();
            CreateToken::new(body)
        },
        |name, parsed: Option<String>, expected| {
            assert_eq!(parsed.as_deref(), expected.as_str(), "{name}: token text");
        },
    );
}

// ---------------------------------------------------------------------------
// RunFlowPreview
// ---------------------------------------------------------------------------

#[test]
fn run_flow_preview_vectors() {
    run_vectors(
        include_str!("../../test-vectors/run_flow_preview.json"),
        |input| {
            let body: FlowPreview = serde_json::from_value(input["body"].clone()).unwrap();
            RunFlowPreview::new(input["workspace"].as_str().unwrap(), body)
        },
        |name, parsed: Option<Uuid>, expected| {
            let expected: Option<Uuid> = serde_json::from_value(expected.clone()).unwrap();
            assert_eq!(parsed, expected, "{name}: job id");
        },
    );
}
