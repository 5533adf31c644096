//! Pipeline run API endpoints

use crate::error::Result;
use crate::{TektonPipelineClient, validated};
use reqwest::Method;
use tekton_core::domain::run::{LogsCollection, PipelineRun, PipelineRunsCollection, StepLog};
use tekton_core::dto::run::{
    CancelTektonPipelineRunOptions, CreateTektonPipelineRunOptions,
    DeleteTektonPipelineRunOptions, GetTektonPipelineRunLogContentOptions,
    GetTektonPipelineRunLogsOptions, GetTektonPipelineRunOptions,
    ListTektonPipelineRunsOptions, RerunTektonPipelineRunOptions,
};
use uuid::Uuid;

impl TektonPipelineClient {
    fn run_endpoint(
        &self,
        pipeline_id: Uuid,
        run_id: Uuid,
        action: &[&str],
    ) -> Result<reqwest::Url> {
        let pipeline_id = pipeline_id.to_string();
        let run_id = run_id.to_string();
        let mut segments = vec![
            "tekton_pipelines",
            pipeline_id.as_str(),
            "pipeline_runs",
            run_id.as_str(),
        ];
        segments.extend_from_slice(action);
        self.endpoint(&segments)
    }

    // =============================================================================
    // Run Listing
    // =============================================================================

    /// List one page of pipeline runs, most recent first
    ///
    /// Use [`TektonPipelineClient::pipeline_runs_pager`] to walk every page.
    pub async fn list_tekton_pipeline_runs(
        &self,
        options: &ListTektonPipelineRunsOptions,
    ) -> Result<PipelineRunsCollection> {
        let options = validated(options)?;
        let url = self.endpoint(&[
            "tekton_pipelines",
            options.pipeline_id.to_string().as_str(),
            "pipeline_runs",
        ])?;
        let request = self
            .request(Method::GET, url, options)?
            .query(&options.query());

        self.call(request).await
    }

    // =============================================================================
    // Run Lifecycle
    // =============================================================================

    /// Start a pipeline run from a trigger
    ///
    /// # Example
    /// ```no_run
    /// # use tekton_client::TektonPipelineClient;
    /// # use tekton_core::dto::run::{CreateTektonPipelineRunOptions, PipelineRunTrigger};
    /// # use uuid::Uuid;
    /// # async fn example(pipeline_id: Uuid) -> anyhow::Result<()> {
    /// let client = TektonPipelineClient::new("http://localhost:8080/pipeline/v2");
    /// let run = client
    ///     .create_tekton_pipeline_run(
    ///         &CreateTektonPipelineRunOptions::new(
    ///             pipeline_id,
    ///             PipelineRunTrigger::new("Manual Trigger").with_property("branch", "main"),
    ///         )
    ///         .with_description("hotfix"),
    ///     )
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_tekton_pipeline_run(
        &self,
        options: &CreateTektonPipelineRunOptions,
    ) -> Result<PipelineRun> {
        let options = validated(options)?;
        let url = self.endpoint(&[
            "tekton_pipelines",
            options.pipeline_id.to_string().as_str(),
            "pipeline_runs",
        ])?;
        let request = self.request(Method::POST, url, options)?.json(&options.run);

        self.call(request).await
    }

    /// Get a pipeline run
    pub async fn get_tekton_pipeline_run(
        &self,
        options: &GetTektonPipelineRunOptions,
    ) -> Result<PipelineRun> {
        let url = self.run_endpoint(options.pipeline_id, options.id, &[])?;
        let request = self
            .request(Method::GET, url, options)?
            .query(&options.query());

        self.call(request).await
    }

    /// Delete a pipeline run and its logs
    pub async fn delete_tekton_pipeline_run(
        &self,
        options: &DeleteTektonPipelineRunOptions,
    ) -> Result<()> {
        let url = self.run_endpoint(options.pipeline_id, options.id, &[])?;
        let request = self.request(Method::DELETE, url, options)?;

        self.call_empty(request).await
    }

    /// Request cancellation of a running pipeline run
    ///
    /// The service answers with the run in its `cancelling` state.
    pub async fn cancel_tekton_pipeline_run(
        &self,
        options: &CancelTektonPipelineRunOptions,
    ) -> Result<PipelineRun> {
        let url = self.run_endpoint(options.pipeline_id, options.id, &["cancel"])?;
        let request = self
            .request(Method::POST, url, options)?
            .json(&options.cancel);

        self.call(request).await
    }

    /// Start a new run with the same trigger and event data as an earlier one
    pub async fn rerun_tekton_pipeline_run(
        &self,
        options: &RerunTektonPipelineRunOptions,
    ) -> Result<PipelineRun> {
        let url = self.run_endpoint(options.pipeline_id, options.id, &["rerun"])?;
        let request = self.request(Method::POST, url, options)?;

        self.call(request).await
    }

    // =============================================================================
    // Run Logs
    // =============================================================================

    /// List the step logs of a run
    pub async fn get_tekton_pipeline_run_logs(
        &self,
        options: &GetTektonPipelineRunLogsOptions,
    ) -> Result<LogsCollection> {
        let url = self.run_endpoint(options.pipeline_id, options.id, &["logs"])?;
        let request = self.request(Method::GET, url, options)?;

        self.call(request).await
    }

    /// Get the content of one step log
    pub async fn get_tekton_pipeline_run_log_content(
        &self,
        options: &GetTektonPipelineRunLogContentOptions,
    ) -> Result<StepLog> {
        let options = validated(options)?;
        let url = self.run_endpoint(
            options.pipeline_id,
            options.pipeline_run_id,
            &["logs", options.id.as_str()],
        )?;
        let request = self.request(Method::GET, url, options)?;

        self.call(request).await
    }
}
