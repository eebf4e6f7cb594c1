use clap::Subcommand;

use crate::cli::OutputFormat;
use crate::config::config;
use crate::predictions::PredictionLogger;

#[derive(Subcommand)]
pub enum PredictionsCommands {
    #[command(about = "Show the most recent prediction log entries")]
    Recent {
        #[arg(long, default_value_t = 10, help = "Number of entries")]
        limit: i64,
    },
}

pub async fn handle(cmd: PredictionsCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        PredictionsCommands::Recent { limit } => {
            let logger = PredictionLogger::open(&config().predictions.db_path).await?;
            let rows = logger.recent(limit).await?;
            logger.close().await;

            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
                OutputFormat::Text => {
                    if rows.is_empty() {
                        println!("No predictions logged");
                    }
                    for row in rows {
                        println!(
                            "{:>5}  {:<12}  {:<8}  {:<8}  {}",
                            row.id,
                            row.record_id.as_deref().unwrap_or("-"),
                            row.prediction.as_deref().unwrap_or("-"),
                            row.probability.as_deref().unwrap_or("-"),
                            row.predicted_at.as_deref().unwrap_or("-"),
                        );
                    }
                }
            }
            Ok(())
        }
    }
}
