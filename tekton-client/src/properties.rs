//! Pipeline and trigger property API endpoints

use crate::error::Result;
use crate::{TektonPipelineClient, validated};
use reqwest::Method;
use tekton_core::domain::property::{PropertiesCollection, Property};
use tekton_core::dto::property::{
    CreateTektonPipelinePropertiesOptions, CreateTektonPipelineTriggerPropertiesOptions,
    DeleteTektonPipelinePropertyOptions, DeleteTektonPipelineTriggerPropertyOptions,
    GetTektonPipelinePropertyOptions, GetTektonPipelineTriggerPropertyOptions,
    ListTektonPipelinePropertiesOptions, ListTektonPipelineTriggerPropertiesOptions,
    ReplaceTektonPipelinePropertyOptions, ReplaceTektonPipelineTriggerPropertyOptions,
};
use uuid::Uuid;

impl TektonPipelineClient {
    fn pipeline_properties_endpoint(
        &self,
        pipeline_id: Uuid,
        name: Option<&str>,
    ) -> Result<reqwest::Url> {
        let pipeline_id = pipeline_id.to_string();
        let mut segments = vec!["tekton_pipelines", pipeline_id.as_str(), "properties"];
        segments.extend(name);
        self.endpoint(&segments)
    }

    fn trigger_properties_endpoint(
        &self,
        pipeline_id: Uuid,
        trigger_id: Uuid,
        name: Option<&str>,
    ) -> Result<reqwest::Url> {
        let pipeline_id = pipeline_id.to_string();
        let trigger_id = trigger_id.to_string();
        let mut segments = vec![
            "tekton_pipelines",
            pipeline_id.as_str(),
            "triggers",
            trigger_id.as_str(),
            "properties",
        ];
        segments.extend(name);
        self.endpoint(&segments)
    }

    // =============================================================================
    // Pipeline Properties
    // =============================================================================

    /// List the environment properties of a pipeline
    pub async fn list_tekton_pipeline_properties(
        &self,
        options: &ListTektonPipelinePropertiesOptions,
    ) -> Result<PropertiesCollection> {
        let url = self.pipeline_properties_endpoint(options.pipeline_id, None)?;
        let request = self
            .request(Method::GET, url, options)?
            .query(&options.filter.query());

        self.call(request).await
    }

    /// Add an environment property to a pipeline
    pub async fn create_tekton_pipeline_properties(
        &self,
        options: &CreateTektonPipelinePropertiesOptions,
    ) -> Result<Property> {
        let options = validated(options)?;
        let url = self.pipeline_properties_endpoint(options.pipeline_id, None)?;
        let request = self
            .request(Method::POST, url, options)?
            .json(&options.property);

        self.call(request).await
    }

    /// Get a pipeline property by name
    pub async fn get_tekton_pipeline_property(
        &self,
        options: &GetTektonPipelinePropertyOptions,
    ) -> Result<Property> {
        let options = validated(options)?;
        let name = Some(options.property_name.as_str());
        let url = self.pipeline_properties_endpoint(options.pipeline_id, name)?;
        let request = self.request(Method::GET, url, options)?;

        self.call(request).await
    }

    /// Replace the value and settings of a pipeline property
    pub async fn replace_tekton_pipeline_property(
        &self,
        options: &ReplaceTektonPipelinePropertyOptions,
    ) -> Result<Property> {
        let options = validated(options)?;
        let name = Some(options.property_name.as_str());
        let url = self.pipeline_properties_endpoint(options.pipeline_id, name)?;
        let request = self
            .request(Method::PUT, url, options)?
            .json(&options.property);

        self.call(request).await
    }

    /// Delete a pipeline property
    pub async fn delete_tekton_pipeline_property(
        &self,
        options: &DeleteTektonPipelinePropertyOptions,
    ) -> Result<()> {
        let options = validated(options)?;
        let name = Some(options.property_name.as_str());
        let url = self.pipeline_properties_endpoint(options.pipeline_id, name)?;
        let request = self.request(Method::DELETE, url, options)?;

        self.call_empty(request).await
    }

    // =============================================================================
    // Trigger Properties
    // =============================================================================

    /// List the properties of a trigger
    pub async fn list_tekton_pipeline_trigger_properties(
        &self,
        options: &ListTektonPipelineTriggerPropertiesOptions,
    ) -> Result<PropertiesCollection> {
        let url = self.trigger_properties_endpoint(options.pipeline_id, options.trigger_id, None)?;
        let request = self
            .request(Method::GET, url, options)?
            .query(&options.filter.query());

        self.call(request).await
    }

    /// Add a property to a trigger
    pub async fn create_tekton_pipeline_trigger_properties(
        &self,
        options: &CreateTektonPipelineTriggerPropertiesOptions,
    ) -> Result<Property> {
        let options = validated(options)?;
        let url = self.trigger_properties_endpoint(options.pipeline_id, options.trigger_id, None)?;
        let request = self
            .request(Method::POST, url, options)?
            .json(&options.property);

        self.call(request).await
    }

    /// Get a trigger property by name
    pub async fn get_tekton_pipeline_trigger_property(
        &self,
        options: &GetTektonPipelineTriggerPropertyOptions,
    ) -> Result<Property> {
        let options = validated(options)?;
        let url = self.trigger_properties_endpoint(
            options.pipeline_id,
            options.trigger_id,
            Some(options.property_name.as_str()),
        )?;
        let request = self.request(Method::GET, url, options)?;

        self.call(request).await
    }

    /// Replace the value and settings of a trigger property
    pub async fn replace_tekton_pipeline_trigger_property(
        &self,
        options: &ReplaceTektonPipelineTriggerPropertyOptions,
    ) -> Result<Property> {
        let options = validated(options)?;
        let url = self.trigger_properties_endpoint(
            options.pipeline_id,
            options.trigger_id,
            Some(options.property_name.as_str()),
        )?;
        let request = self
            .request(Method::PUT, url, options)?
            .json(&options.property);

        self.call(request).await
    }

    /// Delete a trigger property
    pub async fn delete_tekton_pipeline_trigger_property(
        &self,
        options: &DeleteTektonPipelineTriggerPropertyOptions,
    ) -> Result<()> {
        let options = validated(options)?;
        let url = self.trigger_properties_endpoint(
            options.pipeline_id,
            options.trigger_id,
            Some(options.property_name.as_str()),
        )?;
        let request = self.request(Method::DELETE, url, options)?;

        self.call_empty(request).await
    }
}
