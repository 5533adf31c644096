//! Pipeline API endpoints

use crate::error::Result;
use crate::{TektonPipelineClient, validated};
use reqwest::Method;
use tekton_core::domain::pipeline::TektonPipeline;
use tekton_core::dto::pipeline::{
    CreateTektonPipelineOptions, DeleteTektonPipelineOptions, GetTektonPipelineOptions,
    UpdateTektonPipelineOptions,
};

impl TektonPipelineClient {
    // =============================================================================
    // Pipeline Management
    // =============================================================================

    /// Create a Tekton pipeline
    ///
    /// The pipeline tool must already exist in the toolchain; its ID becomes
    /// the pipeline ID.
    ///
    /// # Example
    /// ```no_run
    /// # use tekton_client::TektonPipelineClient;
    /// # use tekton_core::domain::common::WorkerIdentity;
    /// # use tekton_core::dto::pipeline::CreateTektonPipelineOptions;
    /// # use uuid::Uuid;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = TektonPipelineClient::new("http://localhost:8080/pipeline/v2");
    /// let pipeline = client
    ///     .create_tekton_pipeline(
    ///         &CreateTektonPipelineOptions::new(Uuid::new_v4())
    ///             .with_worker(WorkerIdentity::public()),
    ///     )
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_tekton_pipeline(
        &self,
        options: &CreateTektonPipelineOptions,
    ) -> Result<TektonPipeline> {
        let options = validated(options)?;
        let url = self.endpoint(&["tekton_pipelines"])?;
        let request = self
            .request(Method::POST, url, options)?
            .json(&options.pipeline);

        self.call(request).await
    }

    /// Get a pipeline by ID
    pub async fn get_tekton_pipeline(
        &self,
        options: &GetTektonPipelineOptions,
    ) -> Result<TektonPipeline> {
        let url = self.endpoint(&["tekton_pipelines", options.id.to_string().as_str()])?;
        let request = self.request(Method::GET, url, options)?;

        self.call(request).await
    }

    /// Update a pipeline with a JSON merge patch
    pub async fn update_tekton_pipeline(
        &self,
        options: &UpdateTektonPipelineOptions,
    ) -> Result<TektonPipeline> {
        let options = validated(options)?;
        let url = self.endpoint(&["tekton_pipelines", options.id.to_string().as_str()])?;
        let request = self.request(Method::PATCH, url, options)?;
        let request = Self::merge_patch(request, &options.patch)?;

        self.call(request).await
    }

    /// Delete a pipeline, together with its definitions, triggers and runs
    pub async fn delete_tekton_pipeline(
        &self,
        options: &DeleteTektonPipelineOptions,
    ) -> Result<()> {
        let url = self.endpoint(&["tekton_pipelines", options.id.to_string().as_str()])?;
        let request = self.request(Method::DELETE, url, options)?;

        self.call_empty(request).await
    }
}
