use mongodb::bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use sqlx::PgPool;
use tracing::{debug, info, warn};

use crate::database::ConnectionManager;

use super::IngestError;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// Collections holding one document per `customerID`
pub const COLLECTIONS: [&str; 3] = ["customers", "contracts", "services"];

/// Split a SQL script on `;` once `--` comments are stripped, dropping empty statements
pub fn statements(script: &str) -> Vec<String> {
    let code = script
        .lines()
        .map(|line| line.find("--").map_or(line, |at| &line[..at]))
        .collect::<Vec<_>>()
        .join("\n");

    code.split(';')
        .map(|chunk| chunk.trim().to_string())
        .filter(|statement| !statement.is_empty())
        .collect()
}

/// Run the bundled schema. Objects that already exist are skipped.
pub async fn apply_relational_schema(pool: &PgPool) -> Result<usize, IngestError> {
    let mut applied = 0;
    for statement in statements(SCHEMA_SQL) {
        match sqlx::query(&statement).execute(pool).await {
            Ok(_) => {
                debug!("Executed: {}", statement.lines().next().unwrap_or_default());
                applied += 1;
            }
            Err(sqlx::Error::Database(e)) if e.message().contains("already exists") => {
                warn!("Skipped: {}", e.message());
            }
            Err(e) => return Err(e.into()),
        }
    }
    info!("Applied {} schema statements", applied);
    Ok(applied)
}

/// Unique `customerID` index on every collection
pub async fn ensure_document_indexes(db: &ConnectionManager) -> Result<(), IngestError> {
    for name in COLLECTIONS {
        let index = IndexModel::builder()
            .keys(doc! { "customerID": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        db.collection::<Document>(name).create_index(index, None).await?;
        info!("Ensured unique customerID index on {}", name);
    }
    Ok(())
}
