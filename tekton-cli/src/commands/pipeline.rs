//! Pipeline command handlers
//!
//! Handles creating, viewing, updating and deleting Tekton pipelines.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use tekton_client::TektonPipelineClient;
use tekton_core::domain::common::WorkerIdentity;
use tekton_core::domain::pipeline::{PipelineStatus, TektonPipeline};
use tekton_core::dto::pipeline::{
    CreateTektonPipelineOptions, DeleteTektonPipelineOptions, GetTektonPipelineOptions,
    PipelinePatch, UpdateTektonPipelineOptions,
};
use uuid::Uuid;

/// Pipeline subcommands
#[derive(Subcommand)]
pub enum PipelineCommands {
    /// Create the Tekton pipeline of an existing pipeline tool
    Create {
        /// ID of the pipeline tool in the toolchain
        id: Uuid,

        /// Worker to run on (`public` or a private worker ID)
        #[arg(short, long)]
        worker: Option<String>,

        /// Build number of the next run
        #[arg(long)]
        next_build_number: Option<i64>,

        /// Send run notifications to the toolchain
        #[arg(long)]
        notifications: bool,

        /// Clone only the files the definitions need
        #[arg(long)]
        partial_cloning: bool,
    },
    /// Get pipeline details
    Get {
        /// Pipeline ID
        id: Uuid,
    },
    /// Update pipeline settings
    Update {
        /// Pipeline ID
        id: Uuid,

        #[arg(short, long)]
        worker: Option<String>,

        #[arg(long)]
        next_build_number: Option<i64>,

        #[arg(long)]
        notifications: Option<bool>,

        #[arg(long)]
        partial_cloning: Option<bool>,
    },
    /// Delete a pipeline
    Delete {
        /// Pipeline ID
        id: Uuid,
    },
}

/// Handle pipeline commands
pub async fn handle_pipeline_command(
    command: PipelineCommands,
    client: &TektonPipelineClient,
) -> Result<()> {
    match command {
        PipelineCommands::Create {
            id,
            worker,
            next_build_number,
            notifications,
            partial_cloning,
        } => {
            let mut options = CreateTektonPipelineOptions::new(id)
                .with_notifications(notifications)
                .with_partial_cloning(partial_cloning);
            if let Some(worker) = worker {
                options = options.with_worker(WorkerIdentity::new(worker));
            }
            if let Some(build_number) = next_build_number {
                options = options.with_next_build_number(build_number);
            }
            create_pipeline(client, options).await
        }
        PipelineCommands::Get { id } => get_pipeline(client, id).await,
        PipelineCommands::Update {
            id,
            worker,
            next_build_number,
            notifications,
            partial_cloning,
        } => {
            let patch = PipelinePatch {
                next_build_number,
                enable_notifications: notifications,
                enable_partial_cloning: partial_cloning,
                worker: worker.map(WorkerIdentity::new),
            };
            update_pipeline(client, id, patch).await
        }
        PipelineCommands::Delete { id } => delete_pipeline(client, id).await,
    }
}

async fn create_pipeline(
    client: &TektonPipelineClient,
    options: CreateTektonPipelineOptions,
) -> Result<()> {
    let pipeline = client
        .create_tekton_pipeline(&options)
        .await
        .context("Failed to create pipeline")?;

    println!("{}", "✓ Pipeline created successfully!".green().bold());
    println!("  ID:     {}", pipeline.id.to_string().cyan());
    println!("  Name:   {}", pipeline.name.bold());
    println!("  Status: {}", format_status(pipeline.status));

    Ok(())
}

/// Get and display a single pipeline
async fn get_pipeline(client: &TektonPipelineClient, id: Uuid) -> Result<()> {
    let pipeline = client
        .get_tekton_pipeline(&GetTektonPipelineOptions::new(id))
        .await
        .with_context(|| format!("Failed to get pipeline {}", id))?;

    print_pipeline_details(&pipeline);

    Ok(())
}

async fn update_pipeline(
    client: &TektonPipelineClient,
    id: Uuid,
    patch: PipelinePatch,
) -> Result<()> {
    if patch.is_empty() {
        anyhow::bail!("nothing to update, pass at least one setting");
    }

    let pipeline = client
        .update_tekton_pipeline(&UpdateTektonPipelineOptions::new(id).with_patch(patch))
        .await
        .with_context(|| format!("Failed to update pipeline {}", id))?;

    println!("{}", "✓ Pipeline updated successfully!".green().bold());
    print_pipeline_details(&pipeline);

    Ok(())
}

/// Delete a pipeline
async fn delete_pipeline(client: &TektonPipelineClient, id: Uuid) -> Result<()> {
    client
        .delete_tekton_pipeline(&DeleteTektonPipelineOptions::new(id))
        .await
        .with_context(|| format!("Failed to delete pipeline {}", id))?;

    println!(
        "{}",
        format!("✓ Pipeline {} deleted successfully!", id).green().bold()
    );

    Ok(())
}

fn format_status(status: PipelineStatus) -> ColoredString {
    match status {
        PipelineStatus::Configured => "configured".green(),
        PipelineStatus::Configuring => "configuring".yellow(),
    }
}

/// Print detailed pipeline information
fn print_pipeline_details(pipeline: &TektonPipeline) {
    println!("{}", "Pipeline Details:".bold());
    println!("  ID:          {}", pipeline.id.to_string().cyan());
    println!("  Name:        {}", pipeline.name.bold());
    println!("  Status:      {}", format_status(pipeline.status));
    println!("  Enabled:     {}", pipeline.enabled);
    println!("  Toolchain:   {}", pipeline.toolchain.id);
    println!(
        "  Worker:      {}",
        pipeline.worker.name.as_deref().unwrap_or(&pipeline.worker.id)
    );
    println!("  Build:       #{}", pipeline.build_number);
    if let Some(next) = pipeline.next_build_number {
        println!("  Next build:  #{}", next);
    }
    println!(
        "  Created:     {}",
        pipeline.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "  Updated:     {}",
        pipeline.updated_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!("  Runs:        {}", pipeline.runs_url.dimmed());

    if !pipeline.definitions.is_empty() {
        println!("\n{}", "Definitions:".bold());
        for definition in &pipeline.definitions {
            let props = &definition.source.properties;
            let reference = props.branch.as_deref().or(props.tag.as_deref()).unwrap_or("-");
            println!(
                "  {} {} @ {} ({})",
                "▸".cyan(),
                props.url,
                reference,
                props.path.dimmed()
            );
        }
    }

    if !pipeline.triggers.is_empty() {
        println!("\n{}", "Triggers:".bold());
        for trigger in &pipeline.triggers {
            let state = if trigger.enabled { "enabled".green() } else { "disabled".red() };
            println!(
                "  {} {} [{}] {}",
                "▸".cyan(),
                trigger.name.bold(),
                trigger.trigger_type(),
                state
            );
        }
    }

    if !pipeline.properties.is_empty() {
        println!("\n{}", "Properties:".bold());
        for property in &pipeline.properties {
            println!(
                "  {} = {}",
                property.name.cyan(),
                property.value.as_deref().unwrap_or("").dimmed()
            );
        }
    }
}
