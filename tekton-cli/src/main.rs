//! Tekton CLI
//!
//! Command-line interface for the Tekton pipeline API.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tekton")]
#[command(about = "Tekton Pipeline API CLI", long_about = None)]
struct Cli {
    /// Service URL, including the `/pipeline/v2` prefix (overrides --region)
    #[arg(long, env = "CD_TEKTON_PIPELINE_URL")]
    service_url: Option<String>,

    /// Region hosting the pipelines
    #[arg(long, env = "CD_TEKTON_PIPELINE_REGION", default_value = "us-south")]
    region: String,

    /// Bearer token for the API
    #[arg(long, env = "CD_TEKTON_PIPELINE_BEARER_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "CD_TEKTON_PIPELINE_TIMEOUT", default_value = "60")]
    timeout: u64,

    /// Accept invalid TLS certificates
    #[arg(long, env = "CD_TEKTON_PIPELINE_DISABLE_SSL")]
    insecure: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tekton_cli=info,tekton_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        service_url: cli.service_url,
        region: cli.region,
        token: cli.token,
        timeout_seconds: cli.timeout,
        insecure: cli.insecure,
    };

    handle_command(cli.command, &config).await
}
