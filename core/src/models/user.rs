//! API tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AdditionalProperties;
use crate::maybe::Maybe;

/// A token as listed by the server; only a prefix of the secret is returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruncatedToken {
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub label: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub expiration: Maybe<DateTime<Utc>>,
    pub token_prefix: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Body of `CreateToken`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewToken {
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub label: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub expiration: Maybe<DateTime<Utc>>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl NewToken {
    pub fn labelled(label: &str) -> Self {
        Self {
            label: Maybe::Set(label.to_string()),
            ..Self::default()
        }
    }
}
