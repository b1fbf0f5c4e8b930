//! Stored scripts and the enums shared with inline flow scripts.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::AdditionalProperties;
use crate::maybe::Maybe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptLanguage {
    Python3,
    Deno,
    Go,
    Bash,
}

impl ScriptLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptLanguage::Python3 => "python3",
            ScriptLanguage::Deno => "deno",
            ScriptLanguage::Go => "go",
            ScriptLanguage::Bash => "bash",
        }
    }
}

impl fmt::Display for ScriptLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of a script within the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
    Script,
    Failure,
    Trigger,
    Command,
}

/// A stored script version, as returned by `GetScriptByPath`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub workspace_id: Maybe<String>,
    pub hash: String,
    pub path: String,
    /// Previous versions, most recent first.
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub parent_hashes: Maybe<Vec<String>>,
    pub summary: String,
    pub description: String,
    pub content: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub archived: bool,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub schema: Maybe<Value>,
    pub deleted: bool,
    pub is_template: bool,
    #[serde(default)]
    pub extra_perms: BTreeMap<String, bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub lock: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub lock_error_logs: Maybe<String>,
    pub language: ScriptLanguage,
    pub kind: ScriptKind,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn language_display_matches_wire_value() {
        for language in [
            ScriptLanguage::Python3,
            ScriptLanguage::Deno,
            ScriptLanguage::Go,
            ScriptLanguage::Bash,
        ] {
            assert_eq!(serde_json::to_value(language).unwrap(), json!(language.to_string()));
        }
    }

    #[test]
    fn unknown_language_is_rejected() {
        assert!(serde_json::from_value::<ScriptLanguage>(json!("cobol")).is_err());
    }
}
