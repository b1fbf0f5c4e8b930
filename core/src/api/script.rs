//! Script endpoints.

use crate::client::Client;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::models::Script;

use super::{decode_json, Endpoint};

/// `GET /w/{workspace}/scripts/get/p/{path}`: latest version at `path`.
#[derive(Debug, Clone, PartialEq)]
pub struct GetScriptByPath {
    pub workspace: String,
    pub path: String,
}

impl GetScriptByPath {
    pub fn new(workspace: &str, path: &str) -> Self {
        Self {
            workspace: workspace.to_string(),
            path: path.to_string(),
        }
    }
}

impl Endpoint for GetScriptByPath {
    type Output = Script;

    fn build_request(&self, client: &Client) -> Result<HttpRequest, ApiError> {
        Ok(client.request(
            HttpMethod::Get,
            &format!("/w/{}/scripts/get/p/{}", self.workspace, self.path),
        ))
    }

    fn parse_body(body: &[u8]) -> Result<Script, ApiError> {
        decode_json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use crate::models::{ScriptKind, ScriptLanguage};

    #[test]
    fn get_script_by_path_round_trip() {
        let client = Client::new("http://localhost:8000/api");
        let req = GetScriptByPath::new("demo", "u/bob/report")
            .build_request(&client)
            .unwrap();
        assert_eq!(
            req.url,
            "http://localhost:8000/api/w/demo/scripts/get/p/u/bob/report"
        );

        let body = r#"{
            "hash": "abc123", "path": "u/bob/report", "summary": "", "description": "",
            "content": "echo hi", "created_by": "bob", "created_at": "2023-01-05T10:00:00Z",
            "archived": false, "deleted": false, "is_template": false, "extra_perms": {},
            "language": "bash", "kind": "command", "lock": null
        }"#;
        let parsed = GetScriptByPath::parse_response(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        })
        .unwrap()
        .parsed
        .unwrap();
        assert_eq!(parsed.language, ScriptLanguage::Bash);
        assert_eq!(parsed.kind, ScriptKind::Command);
        assert!(parsed.lock.is_null());
        assert!(parsed.lock_error_logs.is_unset());
    }
}
