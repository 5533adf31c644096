//! Pipeline DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::WorkerIdentity;
use crate::dto::Headers;
use crate::validation::{Validate, ValidationError};

/// Request to create a Tekton pipeline for an existing pipeline tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePipeline {
    /// ID of the pipeline tool in the toolchain
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_build_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_partial_cloning: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<WorkerIdentity>,
}

/// JSON merge patch for a pipeline; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelinePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_build_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_partial_cloning: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<WorkerIdentity>,
}

impl PipelinePatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Options for `POST /tekton_pipelines`
#[derive(Debug, Clone)]
pub struct CreateTektonPipelineOptions {
    pub pipeline: CreatePipeline,
    pub headers: Headers,
}

impl CreateTektonPipelineOptions {
    pub fn new(id: Uuid) -> Self {
        Self {
            pipeline: CreatePipeline {
                id,
                next_build_number: None,
                enable_notifications: None,
                enable_partial_cloning: None,
                worker: None,
            },
            headers: Headers::new(),
        }
    }

    pub fn with_next_build_number(mut self, build_number: i64) -> Self {
        self.pipeline.next_build_number = Some(build_number);
        self
    }

    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.pipeline.enable_notifications = Some(enabled);
        self
    }

    pub fn with_partial_cloning(mut self, enabled: bool) -> Self {
        self.pipeline.enable_partial_cloning = Some(enabled);
        self
    }

    pub fn with_worker(mut self, worker: WorkerIdentity) -> Self {
        self.pipeline.worker = Some(worker);
        self
    }
}

impl Validate for CreateTektonPipelineOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(worker) = &self.pipeline.worker {
            crate::validation::require_non_empty("worker.id", &worker.id)?;
        }
        Ok(())
    }
}

/// Options for `GET /tekton_pipelines/{id}`
#[derive(Debug, Clone)]
pub struct GetTektonPipelineOptions {
    pub id: Uuid,
    pub headers: Headers,
}

impl GetTektonPipelineOptions {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            headers: Headers::new(),
        }
    }
}

/// Options for `PATCH /tekton_pipelines/{id}`
#[derive(Debug, Clone)]
pub struct UpdateTektonPipelineOptions {
    pub id: Uuid,
    pub patch: PipelinePatch,
    pub headers: Headers,
}

impl UpdateTektonPipelineOptions {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            patch: PipelinePatch::default(),
            headers: Headers::new(),
        }
    }

    pub fn with_patch(mut self, patch: PipelinePatch) -> Self {
        self.patch = patch;
        self
    }
}

impl Validate for UpdateTektonPipelineOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.patch.is_empty() {
            return Err(ValidationError::new(
                "patch",
                "at least one field must be changed",
            ));
        }
        if let Some(worker) = &self.patch.worker {
            crate::validation::require_non_empty("worker.id", &worker.id)?;
        }
        Ok(())
    }
}

/// Options for `DELETE /tekton_pipelines/{id}`
#[derive(Debug, Clone)]
pub struct DeleteTektonPipelineOptions {
    pub id: Uuid,
    pub headers: Headers,
}

impl DeleteTektonPipelineOptions {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            headers: Headers::new(),
        }
    }
}

impl_request_options!(
    CreateTektonPipelineOptions,
    GetTektonPipelineOptions,
    UpdateTektonPipelineOptions,
    DeleteTektonPipelineOptions,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_body_omits_unset_fields() {
        let id = Uuid::new_v4();
        let options = CreateTektonPipelineOptions::new(id).with_worker(WorkerIdentity::public());

        let body = serde_json::to_value(&options.pipeline).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "id": id.to_string(), "worker": { "id": "public" } })
        );
    }

    #[test]
    fn test_empty_patch_is_rejected() {
        let options = UpdateTektonPipelineOptions::new(Uuid::new_v4());
        assert!(options.validate().is_err());

        let options = options.with_patch(PipelinePatch {
            enable_notifications: Some(true),
            ..Default::default()
        });
        assert!(options.validate().is_ok());
    }
}
