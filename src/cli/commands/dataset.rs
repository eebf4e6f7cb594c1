use clap::Subcommand;
use serde_json::json;
use std::path::PathBuf;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::ingest;

#[derive(Subcommand)]
pub enum DatasetCommands {
    #[command(about = "Download the Telco customer churn CSV")]
    Fetch {
        #[arg(long, help = "URL of the CSV file")]
        url: String,
        #[arg(long, default_value = "data/Telco-Customer-Churn.csv", help = "Where to save it")]
        output: PathBuf,
    },
}

pub async fn handle(cmd: DatasetCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        DatasetCommands::Fetch { url, output } => {
            let rows = ingest::fetch_dataset(&url, &output).await?;
            output_success(
                output_format,
                &format!("Saved {} rows to {}", rows, output.display()),
                Some(json!({ "rows": rows, "path": output.display().to_string() })),
            )
        }
    }
}
