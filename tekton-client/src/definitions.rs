//! Definition API endpoints

use crate::error::Result;
use crate::{TektonPipelineClient, validated};
use reqwest::Method;
use tekton_core::domain::definition::{Definition, DefinitionsCollection};
use tekton_core::dto::definition::{
    CreateTektonPipelineDefinitionOptions, DeleteTektonPipelineDefinitionOptions,
    GetTektonPipelineDefinitionOptions, ListTektonPipelineDefinitionsOptions,
    ReplaceTektonPipelineDefinitionOptions,
};
use uuid::Uuid;

impl TektonPipelineClient {
    fn definitions_endpoint(
        &self,
        pipeline_id: Uuid,
        definition_id: Option<Uuid>,
    ) -> Result<reqwest::Url> {
        let pipeline_id = pipeline_id.to_string();
        let definition_id = definition_id.map(|id| id.to_string());
        let mut segments = vec!["tekton_pipelines", pipeline_id.as_str(), "definitions"];
        segments.extend(definition_id.as_deref());
        self.endpoint(&segments)
    }

    /// List the definitions of a pipeline
    pub async fn list_tekton_pipeline_definitions(
        &self,
        options: &ListTektonPipelineDefinitionsOptions,
    ) -> Result<DefinitionsCollection> {
        let url = self.definitions_endpoint(options.pipeline_id, None)?;
        let request = self.request(Method::GET, url, options)?;

        self.call(request).await
    }

    /// Add a definition to a pipeline
    ///
    /// # Example
    /// ```no_run
    /// # use tekton_client::TektonPipelineClient;
    /// # use tekton_core::domain::definition::DefinitionSource;
    /// # use tekton_core::dto::definition::CreateTektonPipelineDefinitionOptions;
    /// # use uuid::Uuid;
    /// # async fn example(pipeline_id: Uuid) -> anyhow::Result<()> {
    /// let client = TektonPipelineClient::new("http://localhost:8080/pipeline/v2");
    /// let source = DefinitionSource::git_branch(
    ///     "https://github.com/open-toolchain/hello-tekton.git",
    ///     "main",
    ///     ".tekton",
    /// );
    /// let definition = client
    ///     .create_tekton_pipeline_definition(&CreateTektonPipelineDefinitionOptions::new(
    ///         pipeline_id,
    ///         source,
    ///     ))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_tekton_pipeline_definition(
        &self,
        options: &CreateTektonPipelineDefinitionOptions,
    ) -> Result<Definition> {
        let options = validated(options)?;
        let url = self.definitions_endpoint(options.pipeline_id, None)?;
        let request = self
            .request(Method::POST, url, options)?
            .json(&options.definition);

        self.call(request).await
    }

    /// Get a single definition
    pub async fn get_tekton_pipeline_definition(
        &self,
        options: &GetTektonPipelineDefinitionOptions,
    ) -> Result<Definition> {
        let url = self.definitions_endpoint(options.pipeline_id, Some(options.definition_id))?;
        let request = self.request(Method::GET, url, options)?;

        self.call(request).await
    }

    /// Replace the source of a definition
    pub async fn replace_tekton_pipeline_definition(
        &self,
        options: &ReplaceTektonPipelineDefinitionOptions,
    ) -> Result<Definition> {
        let options = validated(options)?;
        let url = self.definitions_endpoint(options.pipeline_id, Some(options.definition_id))?;
        let request = self
            .request(Method::PUT, url, options)?
            .json(&options.definition);

        self.call(request).await
    }

    /// Remove a definition from a pipeline
    pub async fn delete_tekton_pipeline_definition(
        &self,
        options: &DeleteTektonPipelineDefinitionOptions,
    ) -> Result<()> {
        let url = self.definitions_endpoint(options.pipeline_id, Some(options.definition_id))?;
        let request = self.request(Method::DELETE, url, options)?;

        self.call_empty(request).await
    }
}
