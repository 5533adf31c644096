//! Trigger API endpoints

use crate::error::Result;
use crate::{TektonPipelineClient, validated};
use reqwest::Method;
use tekton_core::domain::trigger::{Trigger, TriggersCollection};
use tekton_core::dto::trigger::{
    CreateTektonPipelineTriggerOptions, DeleteTektonPipelineTriggerOptions,
    DuplicateTektonPipelineTriggerOptions, GetTektonPipelineTriggerOptions,
    ListTektonPipelineTriggersOptions, UpdateTektonPipelineTriggerOptions,
};
use uuid::Uuid;

impl TektonPipelineClient {
    fn triggers_endpoint(&self, pipeline_id: Uuid, path: &[&str]) -> Result<reqwest::Url> {
        let pipeline_id = pipeline_id.to_string();
        let mut segments = vec!["tekton_pipelines", pipeline_id.as_str(), "triggers"];
        segments.extend_from_slice(path);
        self.endpoint(&segments)
    }

    /// List the triggers of a pipeline
    pub async fn list_tekton_pipeline_triggers(
        &self,
        options: &ListTektonPipelineTriggersOptions,
    ) -> Result<TriggersCollection> {
        let url = self.triggers_endpoint(options.pipeline_id, &[])?;
        let request = self
            .request(Method::GET, url, options)?
            .query(&options.filter.query());

        self.call(request).await
    }

    /// Add a trigger to a pipeline
    ///
    /// # Example
    /// ```no_run
    /// # use tekton_client::TektonPipelineClient;
    /// # use tekton_core::dto::trigger::{CreateTektonPipelineTriggerOptions, CreateTrigger};
    /// # use uuid::Uuid;
    /// # async fn example(pipeline_id: Uuid) -> anyhow::Result<()> {
    /// let client = TektonPipelineClient::new("http://localhost:8080/pipeline/v2");
    /// let trigger = CreateTrigger::timer("nightly", "listener", "0 2 * * *")
    ///     .with_tags(vec!["nightly".to_string()]);
    /// let created = client
    ///     .create_tekton_pipeline_trigger(&CreateTektonPipelineTriggerOptions::new(
    ///         pipeline_id,
    ///         trigger,
    ///     ))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_tekton_pipeline_trigger(
        &self,
        options: &CreateTektonPipelineTriggerOptions,
    ) -> Result<Trigger> {
        let options = validated(options)?;
        let url = self.triggers_endpoint(options.pipeline_id, &[])?;
        let request = self
            .request(Method::POST, url, options)?
            .json(&options.trigger);

        self.call(request).await
    }

    /// Get a trigger
    pub async fn get_tekton_pipeline_trigger(
        &self,
        options: &GetTektonPipelineTriggerOptions,
    ) -> Result<Trigger> {
        let trigger_id = options.trigger_id.to_string();
        let url = self.triggers_endpoint(options.pipeline_id, &[trigger_id.as_str()])?;
        let request = self.request(Method::GET, url, options)?;

        self.call(request).await
    }

    /// Update a trigger with a JSON merge patch
    pub async fn update_tekton_pipeline_trigger(
        &self,
        options: &UpdateTektonPipelineTriggerOptions,
    ) -> Result<Trigger> {
        let options = validated(options)?;
        let trigger_id = options.trigger_id.to_string();
        let url = self.triggers_endpoint(options.pipeline_id, &[trigger_id.as_str()])?;
        let request = self.request(Method::PATCH, url, options)?;
        let request = Self::merge_patch(request, &options.patch)?;

        self.call(request).await
    }

    /// Delete a trigger
    pub async fn delete_tekton_pipeline_trigger(
        &self,
        options: &DeleteTektonPipelineTriggerOptions,
    ) -> Result<()> {
        let trigger_id = options.trigger_id.to_string();
        let url = self.triggers_endpoint(options.pipeline_id, &[trigger_id.as_str()])?;
        let request = self.request(Method::DELETE, url, options)?;

        self.call_empty(request).await
    }

    /// Copy a trigger, with its properties, under a new name
    pub async fn duplicate_tekton_pipeline_trigger(
        &self,
        options: &DuplicateTektonPipelineTriggerOptions,
    ) -> Result<Trigger> {
        let options = validated(options)?;
        let source_trigger_id = options.source_trigger_id.to_string();
        let url = self.triggers_endpoint(
            options.pipeline_id,
            &[source_trigger_id.as_str(), "duplicate"],
        )?;
        let request = self
            .request(Method::POST, url, options)?
            .json(&options.duplicate);

        self.call(request).await
    }
}
