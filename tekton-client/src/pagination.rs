//! Cursor pagination over pipeline runs
//!
//! Run listings return a `next` link while more pages exist. The pager
//! lifts the `start` cursor out of that link and requests pages until the
//! link disappears.

use reqwest::Url;
use tekton_core::domain::run::PipelineRun;
use tekton_core::dto::run::ListTektonPipelineRunsOptions;
use tekton_core::validation::Validate;

use crate::TektonPipelineClient;
use crate::error::{ClientError, Result};

/// Walks every page of a pipeline's runs
///
/// # Example
/// ```no_run
/// # use tekton_client::TektonPipelineClient;
/// # use tekton_core::dto::run::ListTektonPipelineRunsOptions;
/// # use uuid::Uuid;
/// # async fn example(pipeline_id: Uuid) -> anyhow::Result<()> {
/// let client = TektonPipelineClient::new("http://localhost:8080/pipeline/v2");
/// let mut pager = client
///     .pipeline_runs_pager(ListTektonPipelineRunsOptions::new(pipeline_id).with_limit(50))?;
///
/// while pager.has_next() {
///     for run in pager.next_page().await? {
///         println!("{} {}", run.id, run.status);
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PipelineRunsPager<'a> {
    client: &'a TektonPipelineClient,
    options: ListTektonPipelineRunsOptions,
    next_start: Option<String>,
    has_next: bool,
}

impl TektonPipelineClient {
    /// Create a pager over the runs matching `options`
    ///
    /// A `start` cursor already set in `options` is used for the first page.
    pub fn pipeline_runs_pager(
        &self,
        options: ListTektonPipelineRunsOptions,
    ) -> Result<PipelineRunsPager<'_>> {
        options.validate()?;
        Ok(PipelineRunsPager {
            client: self,
            next_start: options.start.clone(),
            options,
            has_next: true,
        })
    }
}

impl PipelineRunsPager<'_> {
    /// Whether another page may be fetched
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Fetch the next page
    ///
    /// Returns an empty page without contacting the service once the last
    /// page has been read.
    pub async fn next_page(&mut self) -> Result<Vec<PipelineRun>> {
        if !self.has_next {
            return Ok(Vec::new());
        }

        let mut options = self.options.clone();
        options.start = self.next_start.clone();

        let page = self.client.list_tekton_pipeline_runs(&options).await?;
        self.next_start = match &page.next {
            Some(next) => start_from_href(&next.href)?,
            None => None,
        };
        self.has_next = self.next_start.is_some();

        tracing::debug!(
            pipeline_id = %self.options.pipeline_id,
            runs = page.pipeline_runs.len(),
            has_next = self.has_next,
            "fetched page of pipeline runs"
        );

        Ok(page.pipeline_runs)
    }

    /// Fetch all remaining pages and concatenate them in order
    pub async fn collect_all(mut self) -> Result<Vec<PipelineRun>> {
        let mut runs = Vec::new();
        while self.has_next {
            runs.extend(self.next_page().await?);
        }
        Ok(runs)
    }
}

/// Extract the `start` cursor from a page link
///
/// Accepts absolute links and links relative to the service root. Returns
/// `None` when the link carries no usable cursor.
pub fn start_from_href(href: &str) -> Result<Option<String>> {
    let base = Url::parse("http://localhost/")
        .map_err(|e| ClientError::ParseError(format!("invalid base URL: {}", e)))?;
    let url = base
        .join(href)
        .map_err(|e| ClientError::ParseError(format!("invalid page link `{}`: {}", href, e)))?;

    Ok(url
        .query_pairs()
        .find(|(key, _)| key == "start")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty()))
}
