//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod definition;
mod pipeline;
mod property;
mod run;
mod trigger;

pub use definition::DefinitionCommands;
pub use pipeline::PipelineCommands;
pub use property::PropertyCommands;
pub use run::RunCommands;
pub use trigger::TriggerCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Pipeline management
    Pipeline {
        #[command(subcommand)]
        command: PipelineCommands,
    },
    /// Pipeline runs
    Run {
        #[command(subcommand)]
        command: RunCommands,
    },
    /// Triggers of a pipeline
    Trigger {
        #[command(subcommand)]
        command: TriggerCommands,
    },
    /// Definitions of a pipeline
    Definition {
        #[command(subcommand)]
        command: DefinitionCommands,
    },
    /// Pipeline and trigger properties
    Property {
        #[command(subcommand)]
        command: PropertyCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = config.client()?;
    tracing::debug!(service_url = client.base_url(), "using service");

    match command {
        Commands::Pipeline { command } => pipeline::handle_pipeline_command(command, &client).await,
        Commands::Run { command } => run::handle_run_command(command, &client).await,
        Commands::Trigger { command } => trigger::handle_trigger_command(command, &client).await,
        Commands::Definition { command } => {
            definition::handle_definition_command(command, &client).await
        }
        Commands::Property { command } => property::handle_property_command(command, &client).await,
    }
}

/// Parse a single key=value pair
pub(crate) fn parse_key_val(s: &str) -> Result<(String, String)> {
    let pos = s
        .find('=')
        .ok_or_else(|| anyhow::anyhow!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}
