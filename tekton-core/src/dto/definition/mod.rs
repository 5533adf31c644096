//! Definition DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::definition::DefinitionSource;
use crate::dto::Headers;
use crate::validation::{Validate, ValidationError, require_exactly_one, require_non_empty};

impl Validate for DefinitionSource {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("source.type", &self.source_type)?;
        let properties = &self.properties;
        require_non_empty("source.properties.url", &properties.url)?;
        require_non_empty("source.properties.path", &properties.path)?;
        require_exactly_one(
            "source.properties",
            &properties.branch,
            &properties.tag,
            ("branch", "tag"),
        )
    }
}

/// Request to add a definition to a pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDefinition {
    pub source: DefinitionSource,
}

/// Request to replace an existing definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaceDefinition {
    pub source: DefinitionSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}

/// Options for `GET /tekton_pipelines/{pipeline_id}/definitions`
#[derive(Debug, Clone)]
pub struct ListTektonPipelineDefinitionsOptions {
    pub pipeline_id: Uuid,
    pub headers: Headers,
}

impl ListTektonPipelineDefinitionsOptions {
    pub fn new(pipeline_id: Uuid) -> Self {
        Self {
            pipeline_id,
            headers: Headers::new(),
        }
    }
}

/// Options for `POST /tekton_pipelines/{pipeline_id}/definitions`
#[derive(Debug, Clone)]
pub struct CreateTektonPipelineDefinitionOptions {
    pub pipeline_id: Uuid,
    pub definition: CreateDefinition,
    pub headers: Headers,
}

impl CreateTektonPipelineDefinitionOptions {
    pub fn new(pipeline_id: Uuid, source: DefinitionSource) -> Self {
        Self {
            pipeline_id,
            definition: CreateDefinition { source },
            headers: Headers::new(),
        }
    }
}

impl Validate for CreateTektonPipelineDefinitionOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        self.definition.source.validate()
    }
}

/// Options for `PUT /tekton_pipelines/{pipeline_id}/definitions/{definition_id}`
#[derive(Debug, Clone)]
pub struct ReplaceTektonPipelineDefinitionOptions {
    pub pipeline_id: Uuid,
    pub definition_id: Uuid,
    pub definition: ReplaceDefinition,
    pub headers: Headers,
}

impl ReplaceTektonPipelineDefinitionOptions {
    pub fn new(pipeline_id: Uuid, definition_id: Uuid, source: DefinitionSource) -> Self {
        Self {
            pipeline_id,
            definition_id,
            definition: ReplaceDefinition {
                source,
                id: Some(definition_id),
            },
            headers: Headers::new(),
        }
    }
}

impl Validate for ReplaceTektonPipelineDefinitionOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(id) = self.definition.id {
            if id != self.definition_id {
                return Err(ValidationError::new(
                    "id",
                    "body ID does not match the definition being replaced",
                ));
            }
        }
        self.definition.source.validate()
    }
}

macro_rules! definition_path_options {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone)]
            pub struct $name {
                pub pipeline_id: Uuid,
                pub definition_id: Uuid,
                pub headers: Headers,
            }

            impl $name {
                pub fn new(pipeline_id: Uuid, definition_id: Uuid) -> Self {
                    Self {
                        pipeline_id,
                        definition_id,
                        headers: Headers::new(),
                    }
                }
            }
        )*
    };
}

definition_path_options!(
    /// Options for `GET /tekton_pipelines/{pipeline_id}/definitions/{definition_id}`
    GetTektonPipelineDefinitionOptions,
    /// Options for `DELETE /tekton_pipelines/{pipeline_id}/definitions/{definition_id}`
    DeleteTektonPipelineDefinitionOptions,
);

impl_request_options!(
    ListTektonPipelineDefinitionsOptions,
    CreateTektonPipelineDefinitionOptions,
    GetTektonPipelineDefinitionOptions,
    ReplaceTektonPipelineDefinitionOptions,
    DeleteTektonPipelineDefinitionOptions,
);
