//! Schema provisioning and Telco dataset ingestion used by the `telco` CLI.

pub mod dataset;
pub mod loader;
pub mod schema;

use thiserror::Error;

use crate::database::DatabaseError;

pub use dataset::{fetch_dataset, read_dataset, Dataset, TelcoRecord};
pub use loader::{load_documents, load_relational};
pub use schema::{apply_relational_schema, ensure_document_indexes};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Download failed: {0}")]
    Download(#[from] reqwest::Error),

    #[error("Invalid dataset: {message}")]
    InvalidDataset { message: String },
}

impl From<sqlx::Error> for IngestError {
    fn from(err: sqlx::Error) -> Self {
        IngestError::Database(err.into())
    }
}

impl From<mongodb::error::Error> for IngestError {
    fn from(err: mongodb::error::Error) -> Self {
        IngestError::Database(err.into())
    }
}
