use anyhow::Context;
use clap::{Subcommand, ValueEnum};
use serde_json::json;
use std::path::PathBuf;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::config;
use crate::database::ConnectionManager;
use crate::ingest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LoadTarget {
    Postgresql,
    Mongodb,
    All,
}

impl LoadTarget {
    fn relational(self) -> bool {
        matches!(self, LoadTarget::Postgresql | LoadTarget::All)
    }

    fn document(self) -> bool {
        matches!(self, LoadTarget::Mongodb | LoadTarget::All)
    }
}

#[derive(Subcommand)]
pub enum SetupCommands {
    #[command(about = "Create the relational tables and the unique customerID indexes")]
    Schema,

    #[command(about = "Load the Telco CSV into the selected stores")]
    Load {
        #[arg(help = "Path to the Telco customer churn CSV")]
        csv: PathBuf,
        #[arg(long, value_enum, default_value = "all", help = "Store(s) to load")]
        target: LoadTarget,
    },
}

pub async fn handle(cmd: SetupCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        SetupCommands::Schema => {
            let db = ConnectionManager::open(&config().database).await?;
            let applied = ingest::apply_relational_schema(db.pg_pool()).await?;
            ingest::ensure_document_indexes(&db).await?;
            db.close().await;

            output_success(
                output_format,
                &format!("Schema ready ({} statements applied)", applied),
                Some(json!({ "statements": applied })),
            )
        }
        SetupCommands::Load { csv, target } => {
            let dataset = ingest::read_dataset(&csv).with_context(|| format!("failed to read {}", csv.display()))?;

            let db = if target.relational() {
                ConnectionManager::open(&config().database).await?
            } else {
                ConnectionManager::connect_lazy(&config().database).await?
            };

            let mut inserted = json!({ "dropped": dataset.dropped });
            if target.relational() {
                inserted["postgresql"] = json!(ingest::load_relational(&db, &dataset.records).await?);
            }
            if target.document() {
                inserted["mongodb"] = json!(ingest::load_documents(&db, &dataset.records).await?);
            }
            db.close().await;

            output_success(
                output_format,
                &format!(
                    "Loaded {} records ({} rows dropped)",
                    dataset.records.len(),
                    dataset.dropped
                ),
                Some(inserted),
            )
        }
    }
}
