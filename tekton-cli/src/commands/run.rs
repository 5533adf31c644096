//! Run command handlers
//!
//! Handles listing, starting, cancelling and inspecting pipeline runs,
//! including their step logs.

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use colored::*;
use tekton_client::TektonPipelineClient;
use tekton_core::domain::run::{PipelineRun, RunStatus};
use tekton_core::dto::run::{
    CancelTektonPipelineRunOptions, CreateTektonPipelineRunOptions,
    DeleteTektonPipelineRunOptions, GetTektonPipelineRunLogContentOptions,
    GetTektonPipelineRunLogsOptions, GetTektonPipelineRunOptions,
    ListTektonPipelineRunsOptions, PipelineRunTrigger, RerunTektonPipelineRunOptions,
};
use uuid::Uuid;

use super::parse_key_val;

/// Run status filter
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Pending,
    Waiting,
    Queued,
    Running,
    Cancelled,
    Cancelling,
    Failed,
    Error,
    Succeeded,
}

impl From<StatusArg> for RunStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Pending => RunStatus::Pending,
            StatusArg::Waiting => RunStatus::Waiting,
            StatusArg::Queued => RunStatus::Queued,
            StatusArg::Running => RunStatus::Running,
            StatusArg::Cancelled => RunStatus::Cancelled,
            StatusArg::Cancelling => RunStatus::Cancelling,
            StatusArg::Failed => RunStatus::Failed,
            StatusArg::Error => RunStatus::Error,
            StatusArg::Succeeded => RunStatus::Succeeded,
        }
    }
}

/// Run subcommands
#[derive(Subcommand)]
pub enum RunCommands {
    /// List runs of a pipeline, most recent first
    List {
        /// Pipeline ID
        pipeline_id: Uuid,

        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,

        /// Only runs started by this trigger
        #[arg(short, long)]
        trigger: Option<String>,

        /// Page size (1-50)
        #[arg(short, long, default_value = "20")]
        limit: u32,

        /// Fetch every page instead of the first one
        #[arg(long)]
        all: bool,
    },
    /// Get run details
    Get {
        pipeline_id: Uuid,
        run_id: Uuid,
    },
    /// Start a run from a trigger
    Create {
        pipeline_id: Uuid,

        /// Name of the manual trigger to start
        #[arg(short, long)]
        trigger: String,

        #[arg(short, long)]
        description: Option<String>,

        /// Trigger property overrides as key=value pairs
        #[arg(short, long, value_parser = parse_key_val)]
        property: Vec<(String, String)>,

        /// Secure trigger property overrides as key=value pairs
        #[arg(long, value_parser = parse_key_val)]
        secure_property: Vec<(String, String)>,
    },
    /// Cancel a running run
    Cancel {
        pipeline_id: Uuid,
        run_id: Uuid,

        /// Stop the run immediately instead of letting running tasks finish
        #[arg(short, long)]
        force: bool,
    },
    /// Start a new run with the trigger and event of an earlier one
    Rerun {
        pipeline_id: Uuid,
        run_id: Uuid,
    },
    /// Delete a run
    Delete {
        pipeline_id: Uuid,
        run_id: Uuid,
    },
    /// Show the step logs of a run
    Logs {
        pipeline_id: Uuid,
        run_id: Uuid,

        /// Only print the log with this ID
        #[arg(long)]
        step: Option<String>,
    },
}

/// Handle run commands
pub async fn handle_run_command(command: RunCommands, client: &TektonPipelineClient) -> Result<()> {
    match command {
        RunCommands::List {
            pipeline_id,
            status,
            trigger,
            limit,
            all,
        } => {
            let mut options = ListTektonPipelineRunsOptions::new(pipeline_id).with_limit(limit);
            if let Some(status) = status {
                options = options.with_status(status.into());
            }
            if let Some(trigger) = trigger {
                options = options.with_trigger_name(trigger);
            }
            list_runs(client, options, all).await
        }
        RunCommands::Get {
            pipeline_id,
            run_id,
        } => get_run(client, pipeline_id, run_id).await,
        RunCommands::Create {
            pipeline_id,
            trigger,
            description,
            property,
            secure_property,
        } => {
            let mut run_trigger = PipelineRunTrigger::new(trigger);
            for (key, value) in property {
                run_trigger = run_trigger.with_property(key, value);
            }
            for (key, value) in secure_property {
                run_trigger = run_trigger.with_secure_property(key, value);
            }
            let mut options = CreateTektonPipelineRunOptions::new(pipeline_id, run_trigger);
            if let Some(description) = description {
                options = options.with_description(description);
            }
            create_run(client, options).await
        }
        RunCommands::Cancel {
            pipeline_id,
            run_id,
            force,
        } => cancel_run(client, pipeline_id, run_id, force).await,
        RunCommands::Rerun {
            pipeline_id,
            run_id,
        } => rerun(client, pipeline_id, run_id).await,
        RunCommands::Delete {
            pipeline_id,
            run_id,
        } => delete_run(client, pipeline_id, run_id).await,
        RunCommands::Logs {
            pipeline_id,
            run_id,
            step,
        } => show_logs(client, pipeline_id, run_id, step).await,
    }
}

/// List runs, following the page cursor when `all` is set
async fn list_runs(
    client: &TektonPipelineClient,
    options: ListTektonPipelineRunsOptions,
    all: bool,
) -> Result<()> {
    let runs = if all {
        client
            .pipeline_runs_pager(options)?
            .collect_all()
            .await
            .context("Failed to list pipeline runs")?
    } else {
        client
            .list_tekton_pipeline_runs(&options)
            .await
            .context("Failed to list pipeline runs")?
            .pipeline_runs
    };

    if runs.is_empty() {
        println!("{}", "No runs found.".yellow());
    } else {
        println!("{}", format!("Found {} run(s):", runs.len()).bold());
        println!();
        for run in runs {
            print_run_summary(&run);
        }
    }

    Ok(())
}

/// Get and display a single run
async fn get_run(client: &TektonPipelineClient, pipeline_id: Uuid, run_id: Uuid) -> Result<()> {
    let run = client
        .get_tekton_pipeline_run(&GetTektonPipelineRunOptions::new(pipeline_id, run_id))
        .await
        .with_context(|| format!("Failed to get run {}", run_id))?;

    print_run_details(&run);

    Ok(())
}

async fn create_run(
    client: &TektonPipelineClient,
    options: CreateTektonPipelineRunOptions,
) -> Result<()> {
    let run = client
        .create_tekton_pipeline_run(&options)
        .await
        .context("Failed to start pipeline run")?;

    println!("{}", "✓ Run started successfully!".green().bold());
    println!("  Run ID:  {}", run.id.to_string().cyan());
    println!("  Trigger: {}", run.trigger.name);
    println!("  Status:  {}", format_status(run.status));
    println!("  URL:     {}", run.run_url.dimmed());

    Ok(())
}

async fn cancel_run(
    client: &TektonPipelineClient,
    pipeline_id: Uuid,
    run_id: Uuid,
    force: bool,
) -> Result<()> {
    let options = CancelTektonPipelineRunOptions::new(pipeline_id, run_id).with_force(force);
    let run = client
        .cancel_tekton_pipeline_run(&options)
        .await
        .with_context(|| format!("Failed to cancel run {}", run_id))?;

    println!(
        "{} {}",
        "✓ Cancellation requested:".green().bold(),
        format_status(run.status)
    );

    Ok(())
}

async fn rerun(client: &TektonPipelineClient, pipeline_id: Uuid, run_id: Uuid) -> Result<()> {
    let run = client
        .rerun_tekton_pipeline_run(&RerunTektonPipelineRunOptions::new(pipeline_id, run_id))
        .await
        .with_context(|| format!("Failed to rerun {}", run_id))?;

    println!("{}", "✓ Rerun started successfully!".green().bold());
    println!("  Run ID: {}", run.id.to_string().cyan());
    println!("  Status: {}", format_status(run.status));

    Ok(())
}

async fn delete_run(client: &TektonPipelineClient, pipeline_id: Uuid, run_id: Uuid) -> Result<()> {
    client
        .delete_tekton_pipeline_run(&DeleteTektonPipelineRunOptions::new(pipeline_id, run_id))
        .await
        .with_context(|| format!("Failed to delete run {}", run_id))?;

    println!(
        "{}",
        format!("✓ Run {} deleted successfully!", run_id).green().bold()
    );

    Ok(())
}

/// Print the step logs of a run
async fn show_logs(
    client: &TektonPipelineClient,
    pipeline_id: Uuid,
    run_id: Uuid,
    step: Option<String>,
) -> Result<()> {
    let logs = client
        .get_tekton_pipeline_run_logs(&GetTektonPipelineRunLogsOptions::new(pipeline_id, run_id))
        .await
        .with_context(|| format!("Failed to list logs of run {}", run_id))?;

    let selected: Vec<_> = logs
        .logs
        .into_iter()
        .filter(|log| step.as_deref().is_none_or(|id| log.id == id))
        .collect();

    if selected.is_empty() {
        println!("{}", "No logs found.".yellow());
        return Ok(());
    }

    for log in selected {
        let content = client
            .get_tekton_pipeline_run_log_content(&GetTektonPipelineRunLogContentOptions::new(
                pipeline_id,
                run_id,
                log.id.as_str(),
            ))
            .await
            .with_context(|| format!("Failed to fetch log {}", log.name))?;

        println!("{}", format!("── {} ──", log.name).bold());
        print!("{}", content.data);
        if !content.data.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}

fn format_status(status: RunStatus) -> ColoredString {
    let label = status.as_str();
    match status {
        RunStatus::Succeeded => label.green(),
        RunStatus::Failed | RunStatus::Error => label.red(),
        RunStatus::Running => label.cyan(),
        RunStatus::Cancelled | RunStatus::Cancelling => label.dimmed(),
        _ => label.yellow(),
    }
}

/// Print a run summary
fn print_run_summary(run: &PipelineRun) {
    println!(
        "  {} {} {}",
        "▸".cyan(),
        run.id.to_string().bold(),
        format_status(run.status)
    );
    println!("    Trigger: {}", run.trigger.name.dimmed());
    println!(
        "    Created: {}",
        run.created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    if let Some(description) = &run.description {
        println!("    Description: {}", description.dimmed());
    }
    println!();
}

/// Print detailed run information
fn print_run_details(run: &PipelineRun) {
    println!("{}", "Run Details:".bold());
    println!("  ID:        {}", run.id.to_string().cyan());
    println!("  Status:    {}", format_status(run.status));
    println!("  Trigger:   {} [{}]", run.trigger.name, run.trigger.trigger_type());
    println!("  Listener:  {}", run.listener_name);
    println!(
        "  Worker:    {}",
        run.worker.name.as_deref().unwrap_or(&run.worker.id)
    );
    if let Some(user) = &run.user_info {
        println!("  Started by: {}", user.sub);
    }
    if let Some(description) = &run.description {
        println!("  Description: {}", description);
    }
    println!(
        "  Created:   {}",
        run.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    if let Some(updated) = run.updated_at {
        println!("  Updated:   {}", updated.format("%Y-%m-%d %H:%M:%S"));
    }
    println!("  URL:       {}", run.run_url.dimmed());

    if let Some(message) = &run.error_message {
        println!("\n{}", "Error:".red().bold());
        println!("  {}", message.red());
    }

    if !run.properties.is_empty() {
        println!("\n{}", "Properties:".bold());
        for property in &run.properties {
            println!(
                "  {} = {}",
                property.name.cyan(),
                property.value.as_deref().unwrap_or("").dimmed()
            );
        }
    }
}
