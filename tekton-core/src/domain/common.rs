//! References and small value types shared by several resources

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Link to another page or resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Href {
    pub href: String,
}

/// Resource group the pipeline's toolchain belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroupReference {
    pub id: Option<String>,
}

/// Toolchain that owns the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainReference {
    pub id: Uuid,
    pub crn: String,
}

/// Worker that executes pipeline runs
///
/// The ID is free-form: private workers have a UUID while the shared
/// worker is identified as `public`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub worker_type: Option<String>,
}

/// Worker selection sent when creating or updating a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerIdentity {
    pub id: String,
}

impl WorkerIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// The shared public worker
    pub fn public() -> Self {
        Self::new("public")
    }
}

/// Integration tool a repository URL is bound to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
}

/// Reference to a pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineReference {
    pub id: Uuid,
}

/// Reference to a definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionReference {
    pub id: Uuid,
}
