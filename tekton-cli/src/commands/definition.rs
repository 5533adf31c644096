//! Definition command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use tekton_client::TektonPipelineClient;
use tekton_core::domain::definition::Definition;
use tekton_core::dto::definition::{
    DeleteTektonPipelineDefinitionOptions, GetTektonPipelineDefinitionOptions,
    ListTektonPipelineDefinitionsOptions,
};
use uuid::Uuid;

/// Definition subcommands
#[derive(Subcommand)]
pub enum DefinitionCommands {
    /// List definitions of a pipeline
    List { pipeline_id: Uuid },
    /// Get definition details
    Get {
        pipeline_id: Uuid,
        definition_id: Uuid,
    },
    /// Delete a definition
    Delete {
        pipeline_id: Uuid,
        definition_id: Uuid,
    },
}

/// Handle definition commands
pub async fn handle_definition_command(
    command: DefinitionCommands,
    client: &TektonPipelineClient,
) -> Result<()> {
    match command {
        DefinitionCommands::List { pipeline_id } => {
            let collection = client
                .list_tekton_pipeline_definitions(&ListTektonPipelineDefinitionsOptions::new(
                    pipeline_id,
                ))
                .await
                .context("Failed to list definitions")?;

            if collection.definitions.is_empty() {
                println!("{}", "No definitions found.".yellow());
            } else {
                println!(
                    "{}",
                    format!("Found {} definition(s):", collection.definitions.len()).bold()
                );
                println!();
                for definition in &collection.definitions {
                    print_definition(definition);
                }
            }
            Ok(())
        }
        DefinitionCommands::Get {
            pipeline_id,
            definition_id,
        } => {
            let definition = client
                .get_tekton_pipeline_definition(&GetTektonPipelineDefinitionOptions::new(
                    pipeline_id,
                    definition_id,
                ))
                .await
                .with_context(|| format!("Failed to get definition {}", definition_id))?;
            print_definition(&definition);
            Ok(())
        }
        DefinitionCommands::Delete {
            pipeline_id,
            definition_id,
        } => {
            client
                .delete_tekton_pipeline_definition(&DeleteTektonPipelineDefinitionOptions::new(
                    pipeline_id,
                    definition_id,
                ))
                .await
                .with_context(|| format!("Failed to delete definition {}", definition_id))?;
            println!(
                "{}",
                format!("✓ Definition {} deleted successfully!", definition_id)
                    .green()
                    .bold()
            );
            Ok(())
        }
    }
}

fn print_definition(definition: &Definition) {
    let props = &definition.source.properties;
    println!("  {} {}", "▸".cyan(), definition.id.to_string().bold());
    println!("    Repo:   {}", props.url);
    if let Some(branch) = &props.branch {
        println!("    Branch: {}", branch);
    }
    if let Some(tag) = &props.tag {
        println!("    Tag:    {}", tag);
    }
    println!("    Path:   {}", props.path.dimmed());
    println!();
}
