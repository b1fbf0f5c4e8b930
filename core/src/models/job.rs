//! Job records: queued, completed, and the tagged union returned by `ListJobs`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::flow::FlowValue;
use super::script::ScriptLanguage;
use super::AdditionalProperties;
use crate::maybe::Maybe;

/// What produced a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    Script,
    Preview,
    Dependencies,
    Flow,
    FlowPreview,
    #[serde(rename = "script_hub")]
    ScriptHub,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::Script => "script",
            JobKind::Preview => "preview",
            JobKind::Dependencies => "dependencies",
            JobKind::Flow => "flow",
            JobKind::FlowPreview => "flowpreview",
            JobKind::ScriptHub => "script_hub",
        }
    }
}

/// A job waiting for or currently held by a worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedJob {
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub workspace_id: Maybe<String>,
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub parent_job: Maybe<Uuid>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub created_by: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub created_at: Maybe<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub started_at: Maybe<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub scheduled_for: Maybe<DateTime<Utc>>,
    pub running: bool,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub script_path: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub script_hash: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub args: Maybe<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub logs: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub raw_code: Maybe<String>,
    pub canceled: bool,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub canceled_by: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub canceled_reason: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub last_ping: Maybe<DateTime<Utc>>,
    pub job_kind: JobKind,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub schedule_path: Maybe<String>,
    pub permissioned_as: String,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub flow_status: Maybe<FlowStatus>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub raw_flow: Maybe<FlowValue>,
    pub is_flow_step: bool,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub language: Maybe<ScriptLanguage>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// A finished job with its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedJob {
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub workspace_id: Maybe<String>,
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub parent_job: Maybe<Uuid>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub started_at: DateTime<Utc>,
    pub duration_ms: i64,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub script_path: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub script_hash: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub args: Maybe<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub result: Maybe<Value>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub logs: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub deleted: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub raw_code: Maybe<String>,
    pub canceled: bool,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub canceled_by: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub canceled_reason: Maybe<String>,
    pub job_kind: JobKind,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub schedule_path: Maybe<String>,
    pub permissioned_as: String,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub flow_status: Maybe<FlowStatus>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub raw_flow: Maybe<FlowValue>,
    pub is_flow_step: bool,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub language: Maybe<ScriptLanguage>,
    pub is_skipped: bool,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Either kind of job, discriminated by the `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Job {
    QueuedJob(QueuedJob),
    CompletedJob(CompletedJob),
}

impl Job {
    pub fn id(&self) -> Uuid {
        match self {
            Job::QueuedJob(job) => job.id,
            Job::CompletedJob(job) => job.id,
        }
    }

    pub fn job_kind(&self) -> JobKind {
        match self {
            Job::QueuedJob(job) => job.job_kind,
            Job::CompletedJob(job) => job.job_kind,
        }
    }

    pub fn as_queued(&self) -> Option<&QueuedJob> {
        match self {
            Job::QueuedJob(job) => Some(job),
            Job::CompletedJob(_) => None,
        }
    }

    pub fn as_completed(&self) -> Option<&CompletedJob> {
        match self {
            Job::CompletedJob(job) => Some(job),
            Job::QueuedJob(_) => None,
        }
    }
}

/// Progress of a flow job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowStatus {
    pub step: i64,
    pub modules: Vec<FlowStatusModule>,
    pub failure_module: FlowStatusModule,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub retry: Maybe<FlowStatusRetry>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowStatusRetry {
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub fail_count: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub failed_jobs: Maybe<Vec<Uuid>>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// State of one flow step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowStatusModule {
    #[serde(rename = "type")]
    pub kind: FlowStatusModuleType,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub job: Maybe<Uuid>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub count: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub iterator: Maybe<ModuleIterator>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub forloop_jobs: Maybe<Vec<Uuid>>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowStatusModuleType {
    WaitingForPriorSteps,
    WaitingForEvents,
    WaitingForExecutor,
    InProgress,
    Success,
    Failure,
}

/// Position of a for-loop step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleIterator {
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub index: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub itered: Maybe<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub args: Maybe<Value>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}
