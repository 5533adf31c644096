//! Trigger DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::WorkerIdentity;
use crate::domain::trigger::{GenericSecret, ScmEvent, TriggerType};
use crate::dto::Headers;
use crate::validation::{Validate, ValidationError, require_non_empty};

/// Repository an SCM trigger should listen to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSourcePrototype {
    #[serde(rename = "type")]
    pub source_type: String,
    pub properties: TriggerSourcePropertiesPrototype,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSourcePropertiesPrototype {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl TriggerSourcePrototype {
    pub fn git(url: impl Into<String>) -> Self {
        Self {
            source_type: "git".to_string(),
            properties: TriggerSourcePropertiesPrototype {
                url: url.into(),
                branch: None,
                pattern: None,
            },
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.properties.branch = Some(branch.into());
        self
    }

    /// Listen to every branch matching a glob pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.properties.pattern = Some(pattern.into());
        self
    }
}

impl Validate for TriggerSourcePrototype {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("source.properties.url", &self.properties.url)?;
        if self.properties.branch.is_some() && self.properties.pattern.is_some() {
            return Err(ValidationError::new(
                "source.properties",
                "`branch` and `pattern` cannot both be set",
            ));
        }
        Ok(())
    }
}

/// Kind-specific fields of a new trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriggerSpec {
    Manual {},
    Scm {
        source: TriggerSourcePrototype,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        events: Vec<ScmEvent>,
        #[serde(skip_serializing_if = "Option::is_none")]
        filter: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        enable_events_from_forks: Option<bool>,
    },
    Timer {
        cron: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        timezone: Option<String>,
    },
    Generic {
        #[serde(skip_serializing_if = "Option::is_none")]
        secret: Option<GenericSecret>,
        #[serde(skip_serializing_if = "Option::is_none")]
        filter: Option<String>,
    },
}

/// Request to add a trigger to a pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTrigger {
    pub name: String,
    pub event_listener: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<WorkerIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrent_runs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    #[serde(flatten)]
    pub spec: TriggerSpec,
}

impl CreateTrigger {
    pub fn new(
        name: impl Into<String>,
        event_listener: impl Into<String>,
        spec: TriggerSpec,
    ) -> Self {
        Self {
            name: name.into(),
            event_listener: event_listener.into(),
            tags: Vec::new(),
            worker: None,
            max_concurrent_runs: None,
            enabled: None,
            favorite: None,
            spec,
        }
    }

    pub fn manual(name: impl Into<String>, event_listener: impl Into<String>) -> Self {
        Self::new(name, event_listener, TriggerSpec::Manual {})
    }

    /// Trigger firing on a cron schedule
    pub fn timer(
        name: impl Into<String>,
        event_listener: impl Into<String>,
        cron: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            event_listener,
            TriggerSpec::Timer {
                cron: cron.into(),
                timezone: None,
            },
        )
    }

    /// Trigger firing on Git events of a repository
    pub fn scm(
        name: impl Into<String>,
        event_listener: impl Into<String>,
        source: TriggerSourcePrototype,
        events: Vec<ScmEvent>,
    ) -> Self {
        Self::new(
            name,
            event_listener,
            TriggerSpec::Scm {
                source,
                events,
                filter: None,
                enable_events_from_forks: None,
            },
        )
    }

    /// Trigger firing on calls to its webhook
    pub fn generic(name: impl Into<String>, event_listener: impl Into<String>) -> Self {
        Self::new(
            name,
            event_listener,
            TriggerSpec::Generic {
                secret: None,
                filter: None,
            },
        )
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_worker(mut self, worker: WorkerIdentity) -> Self {
        self.worker = Some(worker);
        self
    }

    pub fn with_max_concurrent_runs(mut self, max: i64) -> Self {
        self.max_concurrent_runs = Some(max);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = Some(favorite);
        self
    }
}

impl Validate for CreateTrigger {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("event_listener", &self.event_listener)?;
        if let Some(max) = self.max_concurrent_runs {
            if max < 1 {
                return Err(ValidationError::new(
                    "max_concurrent_runs",
                    "must be at least 1",
                ));
            }
        }
        match &self.spec {
            TriggerSpec::Timer { cron, .. } => require_non_empty("cron", cron),
            TriggerSpec::Scm { source, .. } => source.validate(),
            TriggerSpec::Manual {} | TriggerSpec::Generic { .. } => Ok(()),
        }
    }
}

/// JSON merge patch for a trigger; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerPatch {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub trigger_type: Option<TriggerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_listener: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<WorkerIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrent_runs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<GenericSecret>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<TriggerSourcePrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<ScmEvent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_events_from_forks: Option<bool>,
}

impl TriggerPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Filters for trigger listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerFilter {
    pub trigger_type: Option<TriggerType>,
    pub name: Option<String>,
    pub event_listener: Option<String>,
    pub worker_id: Option<String>,
    pub worker_name: Option<String>,
    pub disabled: Option<bool>,
    /// Keep triggers carrying all of these tags
    pub tags: Vec<String>,
}

impl TriggerFilter {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(trigger_type) = self.trigger_type {
            query.push(("type", trigger_type.as_str().to_string()));
        }
        if let Some(name) = &self.name {
            query.push(("name", name.clone()));
        }
        if let Some(event_listener) = &self.event_listener {
            query.push(("event_listener", event_listener.clone()));
        }
        if let Some(worker_id) = &self.worker_id {
            query.push(("worker.id", worker_id.clone()));
        }
        if let Some(worker_name) = &self.worker_name {
            query.push(("worker.name", worker_name.clone()));
        }
        if let Some(disabled) = self.disabled {
            query.push(("disabled", disabled.to_string()));
        }
        if !self.tags.is_empty() {
            query.push(("tags", self.tags.join(",")));
        }
        query
    }
}

/// Options for `GET /tekton_pipelines/{pipeline_id}/triggers`
#[derive(Debug, Clone)]
pub struct ListTektonPipelineTriggersOptions {
    pub pipeline_id: Uuid,
    pub filter: TriggerFilter,
    pub headers: Headers,
}

impl ListTektonPipelineTriggersOptions {
    pub fn new(pipeline_id: Uuid) -> Self {
        Self {
            pipeline_id,
            filter: TriggerFilter::default(),
            headers: Headers::new(),
        }
    }

    pub fn with_filter(mut self, filter: TriggerFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Options for `POST /tekton_pipelines/{pipeline_id}/triggers`
#[derive(Debug, Clone)]
pub struct CreateTektonPipelineTriggerOptions {
    pub pipeline_id: Uuid,
    pub trigger: CreateTrigger,
    pub headers: Headers,
}

impl CreateTektonPipelineTriggerOptions {
    pub fn new(pipeline_id: Uuid, trigger: CreateTrigger) -> Self {
        Self {
            pipeline_id,
            trigger,
            headers: Headers::new(),
        }
    }
}

impl Validate for CreateTektonPipelineTriggerOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        self.trigger.validate()
    }
}

/// Options for `PATCH /tekton_pipelines/{pipeline_id}/triggers/{trigger_id}`
#[derive(Debug, Clone)]
pub struct UpdateTektonPipelineTriggerOptions {
    pub pipeline_id: Uuid,
    pub trigger_id: Uuid,
    pub patch: TriggerPatch,
    pub headers: Headers,
}

impl UpdateTektonPipelineTriggerOptions {
    pub fn new(pipeline_id: Uuid, trigger_id: Uuid, patch: TriggerPatch) -> Self {
        Self {
            pipeline_id,
            trigger_id,
            patch,
            headers: Headers::new(),
        }
    }
}

impl Validate for UpdateTektonPipelineTriggerOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.patch.is_empty() {
            return Err(ValidationError::new(
                "patch",
                "at least one field must be changed",
            ));
        }
        if let Some(name) = &self.patch.name {
            require_non_empty("name", name)?;
        }
        if let Some(source) = &self.patch.source {
            source.validate()?;
        }
        Ok(())
    }
}

/// Request to copy a trigger under a new name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateTrigger {
    pub name: String,
}

/// Options for `POST /tekton_pipelines/{pipeline_id}/triggers/{source_trigger_id}/duplicate`
#[derive(Debug, Clone)]
pub struct DuplicateTektonPipelineTriggerOptions {
    pub pipeline_id: Uuid,
    pub source_trigger_id: Uuid,
    pub duplicate: DuplicateTrigger,
    pub headers: Headers,
}

impl DuplicateTektonPipelineTriggerOptions {
    pub fn new(pipeline_id: Uuid, source_trigger_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            pipeline_id,
            source_trigger_id,
            duplicate: DuplicateTrigger { name: name.into() },
            headers: Headers::new(),
        }
    }
}

impl Validate for DuplicateTektonPipelineTriggerOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.duplicate.name)
    }
}

macro_rules! trigger_path_options {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone)]
            pub struct $name {
                pub pipeline_id: Uuid,
                pub trigger_id: Uuid,
                pub headers: Headers,
            }

            impl $name {
                pub fn new(pipeline_id: Uuid, trigger_id: Uuid) -> Self {
                    Self {
                        pipeline_id,
                        trigger_id,
                        headers: Headers::new(),
                    }
                }
            }
        )*
    };
}

trigger_path_options!(
    /// Options for `GET /tekton_pipelines/{pipeline_id}/triggers/{trigger_id}`
    GetTektonPipelineTriggerOptions,
    /// Options for `DELETE /tekton_pipelines/{pipeline_id}/triggers/{trigger_id}`
    DeleteTektonPipelineTriggerOptions,
);

impl_request_options!(
    ListTektonPipelineTriggersOptions,
    CreateTektonPipelineTriggerOptions,
    GetTektonPipelineTriggerOptions,
    UpdateTektonPipelineTriggerOptions,
    DeleteTektonPipelineTriggerOptions,
    DuplicateTektonPipelineTriggerOptions,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_timer_body_is_flat() {
        let trigger = CreateTrigger::timer("nightly", "listener", "0 2 * * *")
            .with_tags(vec!["nightly".to_string()])
            .with_worker(WorkerIdentity::public());

        let body = serde_json::to_value(&trigger).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "type": "timer",
                "name": "nightly",
                "event_listener": "listener",
                "cron": "0 2 * * *",
                "tags": ["nightly"],
                "worker": { "id": "public" }
            })
        );
    }

    #[test]
    fn test_create_trigger_validation() {
        assert!(CreateTrigger::manual("run", "listener").validate().is_ok());
        assert_eq!(
            CreateTrigger::manual("run", "").validate().unwrap_err().field,
            "event_listener"
        );
        assert_eq!(
            CreateTrigger::timer("nightly", "listener", " ")
                .validate()
                .unwrap_err()
                .field,
            "cron"
        );

        let source = TriggerSourcePrototype::git("https://github.com/org/repo")
            .with_branch("main")
            .with_pattern("release-*");
        let scm = CreateTrigger::scm("git", "listener", source, vec![ScmEvent::Push]);
        assert!(scm.validate().is_err());

        assert!(
            CreateTrigger::manual("run", "listener")
                .with_max_concurrent_runs(0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_filter_query() {
        let filter = TriggerFilter {
            trigger_type: Some(TriggerType::Scm),
            worker_id: Some("public".to_string()),
            disabled: Some(false),
            tags: vec!["a".to_string(), "b".to_string()],
            ..Default::default()
        };

        assert_eq!(
            filter.query(),
            vec![
                ("type", "scm".to_string()),
                ("worker.id", "public".to_string()),
                ("disabled", "false".to_string()),
                ("tags", "a,b".to_string()),
            ]
        );
    }

    #[test]
    fn test_patch_skips_unset_fields() {
        let patch = TriggerPatch {
            enabled: Some(false),
            tags: Some(Vec::new()),
            ..Default::default()
        };

        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body, serde_json::json!({ "enabled": false, "tags": [] }));
        assert!(TriggerPatch::default().is_empty());
    }
}
