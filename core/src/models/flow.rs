//! Flow definitions: modules, input transforms, retries and the flow records
//! returned by the flow and hub endpoints.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::script::ScriptLanguage;
use super::AdditionalProperties;
use crate::maybe::Maybe;

/// A stored flow, as returned by `GetFlowByPath` and `ListFlows`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub workspace_id: Maybe<String>,
    pub path: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub description: Maybe<String>,
    pub value: FlowValue,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub schema: Maybe<Value>,
    pub edited_by: String,
    pub edited_at: DateTime<Utc>,
    pub archived: bool,
    #[serde(default)]
    pub extra_perms: BTreeMap<String, bool>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// A flow definition without storage metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenFlow {
    pub summary: String,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub description: Maybe<String>,
    pub value: FlowValue,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub schema: Maybe<Value>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Body of `UpdateFlow`: an `OpenFlow` plus the path it is stored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenFlowWPath {
    pub summary: String,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub description: Maybe<String>,
    pub value: FlowValue,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub schema: Maybe<Value>,
    pub path: String,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl OpenFlowWPath {
    pub fn new(path: &str, flow: OpenFlow) -> Self {
        Self {
            summary: flow.summary,
            description: flow.description,
            value: flow.value,
            schema: flow.schema,
            path: path.to_string(),
            additional_properties: flow.additional_properties,
        }
    }
}

/// Response of `GetHubFlowById`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubFlow {
    pub flow: OpenFlow,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Body of `RunFlowPreview`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowPreview {
    pub value: FlowValue,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub path: Maybe<String>,
    #[serde(default)]
    pub args: Map<String, Value>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// The executable part of a flow.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowValue {
    pub modules: Vec<FlowModule>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub failure_module: Maybe<FlowModule>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub same_worker: Maybe<bool>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// One step of a flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowModule {
    pub input_transforms: BTreeMap<String, InputTransform>,
    pub value: FlowModuleValue,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub stop_after_if: Maybe<StopAfterIf>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub sleep: Maybe<InputTransform>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub summary: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub suspend: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub retry: Maybe<Retry>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl FlowModule {
    /// A module with no inputs and no optional settings.
    pub fn new(value: FlowModuleValue) -> Self {
        Self {
            input_transforms: BTreeMap::new(),
            value,
            stop_after_if: Maybe::Unset,
            sleep: Maybe::Unset,
            summary: Maybe::Unset,
            suspend: Maybe::Unset,
            retry: Maybe::Unset,
            additional_properties: AdditionalProperties::new(),
        }
    }

    pub fn with_input(mut self, name: &str, transform: InputTransform) -> Self {
        self.input_transforms.insert(name.to_string(), transform);
        self
    }
}

/// What a flow module runs, selected by its `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FlowModuleValue {
    RawScript(RawScript),
    Script(RunnablePath),
    ForLoopFlow(ForLoopFlow),
    Flow(FlowRef),
}

impl FlowModuleValue {
    pub fn raw_script(language: ScriptLanguage, content: &str) -> Self {
        FlowModuleValue::RawScript(RawScript {
            content: content.to_string(),
            language,
            path: Maybe::Unset,
            additional_properties: AdditionalProperties::new(),
        })
    }

    pub fn script(path: &str) -> Self {
        FlowModuleValue::Script(RunnablePath::new(path))
    }

    pub fn flow(path: &str) -> Self {
        FlowModuleValue::Flow(FlowRef {
            path: Maybe::Set(path.to_string()),
            additional_properties: AdditionalProperties::new(),
        })
    }
}

/// Inline script source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawScript {
    pub content: String,
    pub language: ScriptLanguage,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub path: Maybe<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Reference to a stored script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnablePath {
    pub path: String,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl RunnablePath {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            additional_properties: AdditionalProperties::new(),
        }
    }
}

/// Reference to a stored flow; the server may omit the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRef {
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub path: Maybe<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Runs `modules` once per element produced by `iterator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForLoopFlow {
    pub modules: Vec<FlowModule>,
    pub iterator: InputTransform,
    pub skip_failures: bool,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// How a module input (or sleep duration, or loop iterator) is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputTransform {
    Static(StaticTransform),
    Javascript(JavascriptTransform),
}

impl InputTransform {
    pub fn static_value(value: Value) -> Self {
        InputTransform::Static(StaticTransform {
            value: Maybe::Set(value),
            additional_properties: AdditionalProperties::new(),
        })
    }

    pub fn javascript(expr: &str) -> Self {
        InputTransform::Javascript(JavascriptTransform {
            expr: expr.to_string(),
            additional_properties: AdditionalProperties::new(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticTransform {
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub value: Maybe<Value>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JavascriptTransform {
    pub expr: String,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Early-exit condition evaluated after a module runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopAfterIf {
    pub skip_if_stopped: bool,
    pub expr: String,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Retry policy of a module. Constant delays are tried before exponential ones.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Retry {
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub constant: Maybe<ConstantDelay>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub exponential: Maybe<ExponentialDelay>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConstantDelay {
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub attempts: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub seconds: Maybe<i64>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExponentialDelay {
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub attempts: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub multiplier: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub seconds: Maybe<i64>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}
