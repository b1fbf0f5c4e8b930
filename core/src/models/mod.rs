//! Request and response models.
//!
//! # Design
//! Every record keeps the keys it does not model in
//! `additional_properties` (`#[serde(flatten)]`), so a value decoded from
//! the server and encoded again carries the same keys. Optional fields are
//! `Maybe<T>` to keep "absent" and "null" apart.
//!
//! Polymorphic values (`FlowModuleValue`, `InputTransform`, `Job`) are
//! internally tagged enums keyed on their `type` field. An unknown tag is a
//! decode error, never a fallback to another variant.

pub mod flow;
pub mod job;
pub mod script;
pub mod user;

use serde_json::{Map, Value};

/// Keys present on the wire that the model has no field for.
pub type AdditionalProperties = Map<String, Value>;

pub use flow::{
    ConstantDelay, ExponentialDelay, Flow, FlowModule, FlowModuleValue, FlowPreview, FlowRef,
    FlowValue, ForLoopFlow, HubFlow, InputTransform, JavascriptTransform, OpenFlow, OpenFlowWPath,
    RawScript, Retry, RunnablePath, StaticTransform, StopAfterIf,
};
pub use job::{
    CompletedJob, FlowStatus, FlowStatusModule, FlowStatusModuleType, FlowStatusRetry, Job,
    JobKind, ModuleIterator, QueuedJob,
};
pub use script::{Script, ScriptKind, ScriptLanguage};
pub use user::{NewToken, TruncatedToken};
