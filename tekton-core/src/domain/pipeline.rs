//! Pipeline domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{ResourceGroupReference, ToolchainReference, Worker};
use crate::domain::definition::Definition;
use crate::domain::property::Property;
use crate::domain::trigger::Trigger;

/// Tekton pipeline
///
/// The pipeline ID is the ID of the pipeline tool inside its toolchain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TektonPipeline {
    pub id: Uuid,
    pub name: String,
    pub status: PipelineStatus,
    #[serde(default)]
    pub resource_group: ResourceGroupReference,
    pub toolchain: ToolchainReference,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    pub worker: Worker,
    /// Dashboard URL listing the pipeline's runs
    pub runs_url: String,
    pub href: Option<String>,
    /// Latest build number used by a run
    #[serde(default)]
    pub build_number: i64,
    /// Build number the next run will use, when overridden
    pub next_build_number: Option<i64>,
    #[serde(default)]
    pub enable_notifications: bool,
    #[serde(default)]
    pub enable_partial_cloning: bool,
    #[serde(default)]
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Pipeline provisioning status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Configured,
    Configuring,
}
