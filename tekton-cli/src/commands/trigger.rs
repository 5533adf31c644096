//! Trigger command handlers

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use colored::*;
use tekton_client::TektonPipelineClient;
use tekton_core::domain::trigger::{Trigger, TriggerKind, TriggerType};
use tekton_core::dto::trigger::{
    DeleteTektonPipelineTriggerOptions, DuplicateTektonPipelineTriggerOptions,
    GetTektonPipelineTriggerOptions, ListTektonPipelineTriggersOptions, TriggerFilter,
};
use uuid::Uuid;

/// Trigger type filter
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TriggerTypeArg {
    Manual,
    Scm,
    Timer,
    Generic,
}

impl From<TriggerTypeArg> for TriggerType {
    fn from(trigger_type: TriggerTypeArg) -> Self {
        match trigger_type {
            TriggerTypeArg::Manual => TriggerType::Manual,
            TriggerTypeArg::Scm => TriggerType::Scm,
            TriggerTypeArg::Timer => TriggerType::Timer,
            TriggerTypeArg::Generic => TriggerType::Generic,
        }
    }
}

/// Trigger subcommands
#[derive(Subcommand)]
pub enum TriggerCommands {
    /// List triggers of a pipeline
    List {
        pipeline_id: Uuid,

        #[arg(short = 't', long = "type", value_enum)]
        trigger_type: Option<TriggerTypeArg>,

        #[arg(short, long)]
        name: Option<String>,

        /// Only triggers carrying all of these tags (comma-separated)
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Only disabled (`true`) or enabled (`false`) triggers
        #[arg(long)]
        disabled: Option<bool>,
    },
    /// Get trigger details
    Get {
        pipeline_id: Uuid,
        trigger_id: Uuid,
    },
    /// Copy a trigger under a new name
    Duplicate {
        pipeline_id: Uuid,
        trigger_id: Uuid,

        /// Name of the copy
        name: String,
    },
    /// Delete a trigger
    Delete {
        pipeline_id: Uuid,
        trigger_id: Uuid,
    },
}

/// Handle trigger commands
pub async fn handle_trigger_command(
    command: TriggerCommands,
    client: &TektonPipelineClient,
) -> Result<()> {
    match command {
        TriggerCommands::List {
            pipeline_id,
            trigger_type,
            name,
            tags,
            disabled,
        } => {
            let filter = TriggerFilter {
                trigger_type: trigger_type.map(Into::into),
                name,
                disabled,
                tags,
                ..Default::default()
            };
            list_triggers(client, pipeline_id, filter).await
        }
        TriggerCommands::Get {
            pipeline_id,
            trigger_id,
        } => {
            let trigger = client
                .get_tekton_pipeline_trigger(&GetTektonPipelineTriggerOptions::new(
                    pipeline_id,
                    trigger_id,
                ))
                .await
                .with_context(|| format!("Failed to get trigger {}", trigger_id))?;
            print_trigger_details(&trigger);
            Ok(())
        }
        TriggerCommands::Duplicate {
            pipeline_id,
            trigger_id,
            name,
        } => {
            let trigger = client
                .duplicate_tekton_pipeline_trigger(&DuplicateTektonPipelineTriggerOptions::new(
                    pipeline_id,
                    trigger_id,
                    name,
                ))
                .await
                .with_context(|| format!("Failed to duplicate trigger {}", trigger_id))?;
            println!("{}", "✓ Trigger duplicated successfully!".green().bold());
            println!("  ID:   {}", trigger.id.to_string().cyan());
            println!("  Name: {}", trigger.name.bold());
            Ok(())
        }
        TriggerCommands::Delete {
            pipeline_id,
            trigger_id,
        } => {
            client
                .delete_tekton_pipeline_trigger(&DeleteTektonPipelineTriggerOptions::new(
                    pipeline_id,
                    trigger_id,
                ))
                .await
                .with_context(|| format!("Failed to delete trigger {}", trigger_id))?;
            println!(
                "{}",
                format!("✓ Trigger {} deleted successfully!", trigger_id)
                    .green()
                    .bold()
            );
            Ok(())
        }
    }
}

async fn list_triggers(
    client: &TektonPipelineClient,
    pipeline_id: Uuid,
    filter: TriggerFilter,
) -> Result<()> {
    let collection = client
        .list_tekton_pipeline_triggers(
            &ListTektonPipelineTriggersOptions::new(pipeline_id).with_filter(filter),
        )
        .await
        .context("Failed to list triggers")?;

    if collection.triggers.is_empty() {
        println!("{}", "No triggers found.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("Found {} trigger(s):", collection.triggers.len()).bold()
    );
    println!();
    for trigger in &collection.triggers {
        let state = if trigger.enabled { "enabled".green() } else { "disabled".red() };
        println!(
            "  {} {} [{}] {}",
            "▸".cyan(),
            trigger.name.bold(),
            trigger.trigger_type(),
            state
        );
        println!("    ID:       {}", trigger.id.to_string().dimmed());
        println!("    Listener: {}", trigger.event_listener.dimmed());
        if !trigger.tags.is_empty() {
            println!("    Tags:     {}", trigger.tags.join(", ").dimmed());
        }
        println!();
    }

    Ok(())
}

/// Print detailed trigger information
fn print_trigger_details(trigger: &Trigger) {
    println!("{}", "Trigger Details:".bold());
    println!("  ID:        {}", trigger.id.to_string().cyan());
    println!("  Name:      {}", trigger.name.bold());
    println!("  Type:      {}", trigger.trigger_type());
    println!("  Enabled:   {}", trigger.enabled);
    println!("  Listener:  {}", trigger.event_listener);
    if let Some(max) = trigger.max_concurrent_runs {
        println!("  Max runs:  {}", max);
    }
    if let Some(worker) = &trigger.worker {
        println!("  Worker:    {}", worker.name.as_deref().unwrap_or(&worker.id));
    }
    if !trigger.tags.is_empty() {
        println!("  Tags:      {}", trigger.tags.join(", "));
    }

    match &trigger.kind {
        TriggerKind::Manual {} => {}
        TriggerKind::Scm {
            source,
            events,
            filter,
            ..
        } => {
            if let Some(source) = source {
                println!("  Repo:      {}", source.properties.url);
                if let Some(branch) = &source.properties.branch {
                    println!("  Branch:    {}", branch);
                }
                if let Some(pattern) = &source.properties.pattern {
                    println!("  Pattern:   {}", pattern);
                }
            }
            if !events.is_empty() {
                let events: Vec<&str> = events.iter().map(|event| event.as_str()).collect();
                println!("  Events:    {}", events.join(", "));
            }
            if let Some(filter) = filter {
                println!("  Filter:    {}", filter.dimmed());
            }
        }
        TriggerKind::Timer { cron, timezone } => {
            println!("  Cron:      {}", cron.as_deref().unwrap_or("-"));
            if let Some(timezone) = timezone {
                println!("  Timezone:  {}", timezone);
            }
        }
        TriggerKind::Generic {
            webhook_url,
            filter,
            ..
        } => {
            if let Some(url) = webhook_url {
                println!("  Webhook:   {}", url.cyan());
            }
            if let Some(filter) = filter {
                println!("  Filter:    {}", filter.dimmed());
            }
        }
    }

    if !trigger.properties.is_empty() {
        println!("\n{}", "Properties:".bold());
        for property in &trigger.properties {
            println!(
                "  {} = {}",
                property.name.cyan(),
                property.value.as_deref().unwrap_or("").dimmed()
            );
        }
    }
}
