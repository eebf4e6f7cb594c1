use serde_json::json;

use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::database::ConnectionManager;

fn status(connected: bool) -> &'static str {
    if connected {
        "connected"
    } else {
        "disconnected"
    }
}

pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let db = ConnectionManager::connect_lazy(&config().database).await?;
    let (postgresql, mongodb) = tokio::join!(db.probe_relational(), db.probe_document_store());
    db.close().await;

    let data = json!({ "postgresql": status(postgresql), "mongodb": status(mongodb) });
    if postgresql && mongodb {
        output_success(output_format, "Both stores reachable", Some(data))
    } else {
        output_error(
            output_format,
            &format!("PostgreSQL {}, MongoDB {}", status(postgresql), status(mongodb)),
            Some("STORE_UNREACHABLE"),
        )?;
        anyhow::bail!("store probe failed")
    }
}
