//! Pipeline run domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::common::{DefinitionReference, Href, PipelineReference};
use crate::domain::property::Property;
use crate::domain::trigger::Trigger;

/// Pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRun {
    pub id: Uuid,
    pub href: Option<String>,
    pub user_info: Option<UserInfo>,
    pub status: RunStatus,
    pub definition_id: Option<Uuid>,
    /// Only present when requested with `includes=definitions`
    pub definition: Option<DefinitionReference>,
    pub description: Option<String>,
    pub worker: RunWorker,
    pub pipeline_id: Uuid,
    pub pipeline: Option<PipelineReference>,
    /// Event listener that handled the trigger
    pub listener_name: String,
    /// Trigger as it was when the run started
    pub trigger: Trigger,
    /// Raw event payload that started the run
    #[serde(default)]
    pub event_params_blob: String,
    pub trigger_headers: Option<String>,
    #[serde(default)]
    pub properties: Vec<Property>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Dashboard URL of the run
    pub run_url: String,
    pub error_message: Option<String>,
}

/// User that started the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub iam_id: String,
    pub sub: String,
}

/// Worker a run was scheduled on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunWorker {
    pub id: String,
    pub name: Option<String>,
    pub agent_id: Option<String>,
    pub service_id: Option<String>,
}

/// Run status as reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pending,
    Waiting,
    Queued,
    Running,
    Cancelled,
    Cancelling,
    Failed,
    Error,
    Succeeded,
    /// A status this client does not know about yet
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Pending => "pending",
            RunStatus::Waiting => "waiting",
            RunStatus::Queued => "queued",
            RunStatus::Running => "running",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Failed => "failed",
            RunStatus::Error => "error",
            RunStatus::Succeeded => "succeeded",
            RunStatus::Unknown => "unknown",
        }
    }

    /// Whether the run has stopped and will not change status again
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            RunStatus::Cancelled | RunStatus::Failed | RunStatus::Error | RunStatus::Succeeded
        )
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page of pipeline runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRunsCollection {
    #[serde(default)]
    pub pipeline_runs: Vec<PipelineRun>,
    pub limit: i64,
    pub first: Href,
    /// Absent on the last page
    pub next: Option<Href>,
    pub last: Option<Href>,
}

/// Log of a single step of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    pub href: Option<String>,
    pub id: String,
    /// `<task>/<step>` name of the log
    pub name: String,
}

/// Logs available for a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsCollection {
    #[serde(default)]
    pub logs: Vec<Log>,
}

/// Content of a step log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepLog {
    pub id: String,
    pub data: String,
}
