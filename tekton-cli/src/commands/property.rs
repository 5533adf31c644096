//! Property command handlers
//!
//! Every subcommand works on pipeline properties, or on the properties of a
//! single trigger when `--trigger` is given.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use tekton_client::TektonPipelineClient;
use tekton_core::domain::property::{PropertiesCollection, Property, PropertyType};
use tekton_core::dto::property::{
    CreateProperty, CreateTektonPipelinePropertiesOptions,
    CreateTektonPipelineTriggerPropertiesOptions, ListTektonPipelinePropertiesOptions,
    ListTektonPipelineTriggerPropertiesOptions, PipelinePropertyPath,
    ReplaceTektonPipelinePropertyOptions, ReplaceTektonPipelineTriggerPropertyOptions,
    TriggerPropertyPath,
};
use uuid::Uuid;

/// Property subcommands
#[derive(Subcommand)]
pub enum PropertyCommands {
    /// List properties
    List {
        pipeline_id: Uuid,

        /// Trigger whose properties to list
        #[arg(long)]
        trigger: Option<Uuid>,
    },
    /// Get a property
    Get {
        pipeline_id: Uuid,
        name: String,

        #[arg(long)]
        trigger: Option<Uuid>,
    },
    /// Create or replace a property
    Set {
        pipeline_id: Uuid,
        name: String,
        value: String,

        #[arg(long)]
        trigger: Option<Uuid>,

        /// Store the value as a secure property
        #[arg(long)]
        secure: bool,
    },
    /// Delete a property
    Delete {
        pipeline_id: Uuid,
        name: String,

        #[arg(long)]
        trigger: Option<Uuid>,
    },
}

/// Handle property commands
pub async fn handle_property_command(
    command: PropertyCommands,
    client: &TektonPipelineClient,
) -> Result<()> {
    match command {
        PropertyCommands::List {
            pipeline_id,
            trigger,
        } => list_properties(client, pipeline_id, trigger).await,
        PropertyCommands::Get {
            pipeline_id,
            name,
            trigger,
        } => {
            let property = match trigger {
                Some(trigger_id) => {
                    client
                        .get_tekton_pipeline_trigger_property(&TriggerPropertyPath::new(
                            pipeline_id,
                            trigger_id,
                            &name,
                        ))
                        .await
                }
                None => {
                    let path = PipelinePropertyPath::new(pipeline_id, &name);
                    client.get_tekton_pipeline_property(&path).await
                }
            }
            .with_context(|| format!("Failed to get property {}", name))?;
            print_property(&property);
            Ok(())
        }
        PropertyCommands::Set {
            pipeline_id,
            name,
            value,
            trigger,
            secure,
        } => {
            let property = if secure {
                CreateProperty::secure(name, value)
            } else {
                CreateProperty::text(name, value)
            };
            set_property(client, pipeline_id, trigger, property).await
        }
        PropertyCommands::Delete {
            pipeline_id,
            name,
            trigger,
        } => {
            let deleted = match trigger {
                Some(trigger_id) => {
                    client
                        .delete_tekton_pipeline_trigger_property(&TriggerPropertyPath::new(
                            pipeline_id,
                            trigger_id,
                            &name,
                        ))
                        .await
                }
                None => {
                    client
                        .delete_tekton_pipeline_property(&PipelinePropertyPath::new(
                            pipeline_id,
                            &name,
                        ))
                        .await
                }
            };
            deleted.with_context(|| format!("Failed to delete property {}", name))?;
            println!(
                "{}",
                format!("✓ Property {} deleted successfully!", name)
                    .green()
                    .bold()
            );
            Ok(())
        }
    }
}

async fn list_properties(
    client: &TektonPipelineClient,
    pipeline_id: Uuid,
    trigger: Option<Uuid>,
) -> Result<()> {
    let collection: PropertiesCollection = match trigger {
        Some(trigger_id) => {
            client
                .list_tekton_pipeline_trigger_properties(
                    &ListTektonPipelineTriggerPropertiesOptions::new(pipeline_id, trigger_id),
                )
                .await
        }
        None => {
            client
                .list_tekton_pipeline_properties(&ListTektonPipelinePropertiesOptions::new(
                    pipeline_id,
                ))
                .await
        }
    }
    .context("Failed to list properties")?;

    if collection.properties.is_empty() {
        println!("{}", "No properties found.".yellow());
    } else {
        for property in &collection.properties {
            print_property(property);
        }
    }

    Ok(())
}

/// Replace the property when it exists, create it otherwise
async fn set_property(
    client: &TektonPipelineClient,
    pipeline_id: Uuid,
    trigger: Option<Uuid>,
    property: CreateProperty,
) -> Result<()> {
    let name = property.name.clone();

    let existing = match trigger {
        Some(trigger_id) => {
            client
                .get_tekton_pipeline_trigger_property(&TriggerPropertyPath::new(
                    pipeline_id,
                    trigger_id,
                    &name,
                ))
                .await
        }
        None => {
            client
                .get_tekton_pipeline_property(&PipelinePropertyPath::new(pipeline_id, &name))
                .await
        }
    };
    let exists = match existing {
        Ok(_) => true,
        Err(err) if err.is_not_found() => false,
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to look up property {}", name));
        }
    };

    let saved = match (trigger, exists) {
        (Some(trigger_id), true) => {
            client
                .replace_tekton_pipeline_trigger_property(
                    &ReplaceTektonPipelineTriggerPropertyOptions::new(
                        pipeline_id,
                        trigger_id,
                        property,
                    ),
                )
                .await
        }
        (Some(trigger_id), false) => {
            client
                .create_tekton_pipeline_trigger_properties(
                    &CreateTektonPipelineTriggerPropertiesOptions::new(
                        pipeline_id,
                        trigger_id,
                        property,
                    ),
                )
                .await
        }
        (None, true) => {
            client
                .replace_tekton_pipeline_property(&ReplaceTektonPipelinePropertyOptions::new(
                    pipeline_id,
                    property,
                ))
                .await
        }
        (None, false) => {
            client
                .create_tekton_pipeline_properties(&CreateTektonPipelinePropertiesOptions::new(
                    pipeline_id,
                    property,
                ))
                .await
        }
    }
    .with_context(|| format!("Failed to save property {}", name))?;

    let verb = if exists { "updated" } else { "created" };
    println!(
        "{}",
        format!("✓ Property {} {} successfully!", saved.name, verb)
            .green()
            .bold()
    );

    Ok(())
}

fn print_property(property: &Property) {
    let value = match property.property_type {
        PropertyType::Secure => "********".to_string(),
        _ => property.value.clone().unwrap_or_default(),
    };
    let locked = if property.locked == Some(true) { " (locked)" } else { "" };
    println!(
        "  {} = {} [{}]{}",
        property.name.cyan(),
        value,
        property.property_type.to_string().dimmed(),
        locked.red()
    );
}
