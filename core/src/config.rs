//! Client configuration from environment variables.
//!
//! | variable               | effect                                   |
//! |------------------------|------------------------------------------|
//! | `JOBFLOW_BASE_URL`     | base URL, required                       |
//! | `JOBFLOW_TOKEN`        | bearer token                             |
//! | `JOBFLOW_TIMEOUT_SECS` | request timeout in seconds (default 5)   |
//! | `JOBFLOW_VERIFY_SSL`   | `true`/`false`/`1`/`0` (default `true`)  |

use std::time::Duration;

use crate::client::Client;
use crate::error::ApiError;

pub const BASE_URL_VAR: &str = "JOBFLOW_BASE_URL";
pub const TOKEN_VAR: &str = "JOBFLOW_TOKEN";
pub const TIMEOUT_VAR: &str = "JOBFLOW_TIMEOUT_SECS";
pub const VERIFY_SSL_VAR: &str = "JOBFLOW_VERIFY_SSL";

impl Client {
    /// Build a client from the process environment.
    pub fn from_env() -> Result<Self, ApiError> {
        client_from_vars(|name| std::env::var(name).ok())
    }
}

pub(crate) fn client_from_vars<F>(var: F) -> Result<Client, ApiError>
where
    F: Fn(&str) -> Option<String>,
{
    let base_url = var(BASE_URL_VAR)
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| ApiError::Config(format!("{BASE_URL_VAR} is not set")))?;
    let mut client = Client::new(base_url.trim());

    if let Some(token) = var(TOKEN_VAR).filter(|token| !token.is_empty()) {
        client = client.with_token(&token);
    }

    if let Some(raw) = var(TIMEOUT_VAR) {
        let secs: u64 = raw
            .trim()
            .parse()
            .map_err(|_| ApiError::Config(format!("{TIMEOUT_VAR}: not a number of seconds: {raw}")))?;
        client = client.with_timeout(Duration::from_secs(secs));
    }

    if let Some(raw) = var(VERIFY_SSL_VAR) {
        let verify = match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => true,
            "false" | "0" => false,
            _ => return Err(ApiError::Config(format!("{VERIFY_SSL_VAR}: expected a boolean, got {raw}"))),
        };
        client = client.with_verify_ssl(verify);
    }

    tracing::debug!(base_url = client.base_url(), "client configured from environment");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn base_url_is_required() {
        let err = client_from_vars(vars(&[])).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn all_settings_are_read() {
        let client = client_from_vars(vars(&[
            (BASE_URL_VAR, "https://jobs.example.com/api/"),
            (TOKEN_VAR, "secret"),
            (TIMEOUT_VAR, "30"),
            (VERIFY_SSL_VAR, "0"),
        ]))
        .unwrap();
        assert_eq!(client.base_url(), "https://jobs.example.com/api");
        assert_eq!(
            client.headers(),
            &[("Authorization".to_string(), "Bearer secret".to_string())]
        );
        assert_eq!(client.timeout(), Duration::from_secs(30));
        assert!(!client.verify_ssl());
    }

    #[test]
    fn bad_values_are_rejected() {
        let timeout = client_from_vars(vars(&[(BASE_URL_VAR, "http://h"), (TIMEOUT_VAR, "soon")]));
        assert!(matches!(timeout, Err(ApiError::Config(_))));

        let verify = client_from_vars(vars(&[(BASE_URL_VAR, "http://h"), (VERIFY_SSL_VAR, "maybe")]));
        assert!(matches!(verify, Err(ApiError::Config(_))));
    }
}
