pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "telco")]
#[command(about = "Telco churn CLI - schema setup, dataset ingestion and store probes")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Provision the stores and load the dataset")]
    Setup {
        #[command(subcommand)]
        cmd: commands::setup::SetupCommands,
    },

    #[command(about = "Dataset download")]
    Dataset {
        #[command(subcommand)]
        cmd: commands::dataset::DatasetCommands,
    },

    #[command(about = "Check connectivity to PostgreSQL and MongoDB")]
    Probe,

    #[command(about = "Inspect the prediction log")]
    Predictions {
        #[command(subcommand)]
        cmd: commands::predictions::PredictionsCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Setup { cmd } => commands::setup::handle(cmd, output_format).await,
        Commands::Dataset { cmd } => commands::dataset::handle(cmd, output_format).await,
        Commands::Probe => commands::probe::handle(output_format).await,
        Commands::Predictions { cmd } => commands::predictions::handle(cmd, output_format).await,
    }
}
