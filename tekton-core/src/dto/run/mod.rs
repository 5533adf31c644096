//! Pipeline run DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::run::RunStatus;
use crate::dto::Headers;
use crate::validation::{Validate, ValidationError, require_non_empty};

/// Largest page size accepted by the run list endpoint
pub const MAX_PAGE_LIMIT: u32 = 50;

/// Options for `GET /tekton_pipelines/{pipeline_id}/pipeline_runs`
#[derive(Debug, Clone)]
pub struct ListTektonPipelineRunsOptions {
    pub pipeline_id: Uuid,
    /// Opaque cursor taken from the `next` link of a previous page
    pub start: Option<String>,
    pub limit: Option<u32>,
    pub status: Option<RunStatus>,
    pub trigger_name: Option<String>,
    pub headers: Headers,
}

impl ListTektonPipelineRunsOptions {
    pub fn new(pipeline_id: Uuid) -> Self {
        Self {
            pipeline_id,
            start: None,
            limit: None,
            status: None,
            trigger_name: None,
            headers: Headers::new(),
        }
    }

    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_status(mut self, status: RunStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_trigger_name(mut self, trigger_name: impl Into<String>) -> Self {
        self.trigger_name = Some(trigger_name.into());
        self
    }

    /// Query parameters of the request
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(start) = &self.start {
            query.push(("start", start.clone()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(trigger_name) = &self.trigger_name {
            query.push(("trigger.name", trigger_name.clone()));
        }
        query
    }
}

impl Validate for ListTektonPipelineRunsOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(limit) = self.limit {
            if limit == 0 || limit > MAX_PAGE_LIMIT {
                return Err(ValidationError::new(
                    "limit",
                    format!("must be between 1 and {}", MAX_PAGE_LIMIT),
                ));
            }
        }
        if let Some(start) = &self.start {
            require_non_empty("start", start)?;
        }
        Ok(())
    }
}

/// Trigger to start a run with, together with its event data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineRunTrigger {
    pub name: String,
    /// Overrides for the trigger's properties
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub properties: HashMap<String, Value>,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub secure_properties: HashMap<String, Value>,
    /// Headers of the simulated event, available to the event listener
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub headers: HashMap<String, Value>,
    /// Body of the simulated event, available to the event listener
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub body: HashMap<String, Value>,
}

impl PipelineRunTrigger {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn with_secure_property(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.secure_properties.insert(name.into(), value.into());
        self
    }

    pub fn with_event_header(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_event_body(mut self, body: HashMap<String, Value>) -> Self {
        self.body = body;
        self
    }
}

/// Request to start a pipeline run
///
/// The trigger is named either through `trigger` or through the older flat
/// `trigger_*` fields, never both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatePipelineRun {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_properties: Option<HashMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure_trigger_properties: Option<HashMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_headers: Option<HashMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_body: Option<HashMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<PipelineRunTrigger>,
}

/// Options for `POST /tekton_pipelines/{pipeline_id}/pipeline_runs`
#[derive(Debug, Clone)]
pub struct CreateTektonPipelineRunOptions {
    pub pipeline_id: Uuid,
    pub run: CreatePipelineRun,
    pub headers: Headers,
}

impl CreateTektonPipelineRunOptions {
    /// Start a run from the given trigger
    pub fn new(pipeline_id: Uuid, trigger: PipelineRunTrigger) -> Self {
        Self {
            pipeline_id,
            run: CreatePipelineRun {
                trigger: Some(trigger),
                ..Default::default()
            },
            headers: Headers::new(),
        }
    }

    /// Start a run using the flat `trigger_name` form
    pub fn from_trigger_name(pipeline_id: Uuid, trigger_name: impl Into<String>) -> Self {
        Self {
            pipeline_id,
            run: CreatePipelineRun {
                trigger_name: Some(trigger_name.into()),
                ..Default::default()
            },
            headers: Headers::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.run.description = Some(description.into());
        self
    }
}

impl Validate for CreateTektonPipelineRunOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        let run = &self.run;
        crate::validation::require_exactly_one(
            "trigger",
            &run.trigger,
            &run.trigger_name,
            ("trigger", "trigger_name"),
        )?;
        if let Some(trigger) = &run.trigger {
            require_non_empty("trigger.name", &trigger.name)?;
            let flat_fields_set = run.trigger_properties.is_some()
                || run.secure_trigger_properties.is_some()
                || run.trigger_headers.is_some()
                || run.trigger_body.is_some();
            if flat_fields_set {
                return Err(ValidationError::new(
                    "trigger",
                    "flat `trigger_*` fields cannot be combined with `trigger`",
                ));
            }
        }
        if let Some(trigger_name) = &run.trigger_name {
            require_non_empty("trigger_name", trigger_name)?;
        }
        Ok(())
    }
}

/// Options for `GET /tekton_pipelines/{pipeline_id}/pipeline_runs/{id}`
#[derive(Debug, Clone)]
pub struct GetTektonPipelineRunOptions {
    pub pipeline_id: Uuid,
    pub id: Uuid,
    /// Extra resources to embed, only `definitions` is supported
    pub includes: Option<String>,
    pub headers: Headers,
}

impl GetTektonPipelineRunOptions {
    pub fn new(pipeline_id: Uuid, id: Uuid) -> Self {
        Self {
            pipeline_id,
            id,
            includes: None,
            headers: Headers::new(),
        }
    }

    /// Embed the definition the run was started from
    pub fn with_definitions(mut self) -> Self {
        self.includes = Some("definitions".to_string());
        self
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        self.includes
            .iter()
            .map(|includes| ("includes", includes.clone()))
            .collect()
    }
}

/// Request to cancel a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelPipelineRun {
    /// Stop the run immediately instead of letting running tasks finish
    pub force: bool,
}

/// Options for `POST /tekton_pipelines/{pipeline_id}/pipeline_runs/{id}/cancel`
#[derive(Debug, Clone)]
pub struct CancelTektonPipelineRunOptions {
    pub pipeline_id: Uuid,
    pub id: Uuid,
    pub cancel: CancelPipelineRun,
    pub headers: Headers,
}

impl CancelTektonPipelineRunOptions {
    pub fn new(pipeline_id: Uuid, id: Uuid) -> Self {
        Self {
            pipeline_id,
            id,
            cancel: CancelPipelineRun::default(),
            headers: Headers::new(),
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.cancel.force = force;
        self
    }
}

/// Path of a single run, shared by the operations that need nothing else
macro_rules! run_path_options {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone)]
            pub struct $name {
                pub pipeline_id: Uuid,
                pub id: Uuid,
                pub headers: Headers,
            }

            impl $name {
                pub fn new(pipeline_id: Uuid, id: Uuid) -> Self {
                    Self {
                        pipeline_id,
                        id,
                        headers: Headers::new(),
                    }
                }
            }
        )*
    };
}

run_path_options!(
    /// Options for `DELETE /tekton_pipelines/{pipeline_id}/pipeline_runs/{id}`
    DeleteTektonPipelineRunOptions,
    /// Options for `POST /tekton_pipelines/{pipeline_id}/pipeline_runs/{id}/rerun`
    RerunTektonPipelineRunOptions,
    /// Options for `GET /tekton_pipelines/{pipeline_id}/pipeline_runs/{id}/logs`
    GetTektonPipelineRunLogsOptions,
);

/// Options for `GET /tekton_pipelines/{pipeline_id}/pipeline_runs/{pipeline_run_id}/logs/{id}`
#[derive(Debug, Clone)]
pub struct GetTektonPipelineRunLogContentOptions {
    pub pipeline_id: Uuid,
    pub pipeline_run_id: Uuid,
    /// Log ID from the run's logs collection
    pub id: String,
    pub headers: Headers,
}

impl GetTektonPipelineRunLogContentOptions {
    pub fn new(pipeline_id: Uuid, pipeline_run_id: Uuid, id: impl Into<String>) -> Self {
        Self {
            pipeline_id,
            pipeline_run_id,
            id: id.into(),
            headers: Headers::new(),
        }
    }
}

impl Validate for GetTektonPipelineRunLogContentOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("id", &self.id)
    }
}

impl_request_options!(
    ListTektonPipelineRunsOptions,
    CreateTektonPipelineRunOptions,
    GetTektonPipelineRunOptions,
    DeleteTektonPipelineRunOptions,
    CancelTektonPipelineRunOptions,
    RerunTektonPipelineRunOptions,
    GetTektonPipelineRunLogsOptions,
    GetTektonPipelineRunLogContentOptions,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_uses_wire_names() {
        let options = ListTektonPipelineRunsOptions::new(Uuid::new_v4())
            .with_start("cursor")
            .with_limit(20)
            .with_status(RunStatus::Failed)
            .with_trigger_name("manual");

        assert_eq!(
            options.query(),
            vec![
                ("start", "cursor".to_string()),
                ("limit", "20".to_string()),
                ("status", "failed".to_string()),
                ("trigger.name", "manual".to_string()),
            ]
        );
    }

    #[test]
    fn test_limit_bounds() {
        let options = ListTektonPipelineRunsOptions::new(Uuid::new_v4());
        assert!(options.clone().with_limit(1).validate().is_ok());
        assert!(options.clone().with_limit(50).validate().is_ok());
        assert!(options.clone().with_limit(0).validate().is_err());
        assert!(options.with_limit(51).validate().is_err());
    }

    #[test]
    fn test_create_run_body() {
        let trigger = PipelineRunTrigger::new("Manual Trigger")
            .with_property("branch", "main")
            .with_secure_property("token", "s3cret");
        let options = CreateTektonPipelineRunOptions::new(Uuid::new_v4(), trigger)
            .with_description("release build");

        assert!(options.validate().is_ok());
        let body = serde_json::to_value(&options.run).unwrap();
        assert_eq!(body["description"], "release build");
        assert_eq!(body["trigger"]["name"], "Manual Trigger");
        assert_eq!(body["trigger"]["properties"]["branch"], "main");
        assert!(body["trigger"].get("headers").is_none());
        assert!(body.get("trigger_name").is_none());
    }

    #[test]
    fn test_create_run_requires_single_trigger_form() {
        let mut options = CreateTektonPipelineRunOptions::new(
            Uuid::new_v4(),
            PipelineRunTrigger::new("Manual Trigger"),
        );
        options.run.trigger_name = Some("Other".to_string());
        assert!(options.validate().is_err());

        options.run.trigger = None;
        options.run.trigger_name = None;
        assert!(options.validate().is_err());

        let options = CreateTektonPipelineRunOptions::from_trigger_name(Uuid::new_v4(), "");
        assert!(options.validate().is_err());
    }
}
