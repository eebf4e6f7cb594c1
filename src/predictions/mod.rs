//! Prediction side service: an append-only SQLite log of model inferences and
//! the "latest record" lookup over the local dataset directory.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Prediction log database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dataset read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS prediction_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    record_id TEXT,
    prediction TEXT,
    probability TEXT,
    predicted_at TEXT,
    inputs_json TEXT,
    created_at TEXT
)";

/// Payload of `POST /api/predictions`
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionLog {
    #[serde(default)]
    pub record_id: Option<Value>,
    pub prediction: Value,
    #[serde(default)]
    pub probability: Value,
    pub predicted_at: String,
    pub inputs: Map<String, Value>,
}

impl PredictionLog {
    /// Text form of the record id: strings as-is, anything else as JSON
    fn record_id_text(&self) -> Option<String> {
        match &self.record_id {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

/// A stored log row. JSON-valued columns are kept as their encoded text.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct PredictionRecord {
    pub id: i64,
    pub record_id: Option<String>,
    pub prediction: Option<String>,
    pub probability: Option<String>,
    pub predicted_at: Option<String>,
    pub inputs_json: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Clone)]
pub struct PredictionLogger {
    pool: SqlitePool,
}

impl PredictionLogger {
    /// Open (creating if needed) the log database at `path`
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, PredictionError> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().max_connections(4).connect_with(options).await?;
        info!("Opened prediction log at {}", path.as_ref().display());
        Self::init(pool).await
    }

    /// Private in-memory log; one connection so every query sees the same database
    pub async fn in_memory() -> Result<Self, PredictionError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Self::init(pool).await
    }

    async fn init(pool: SqlitePool) -> Result<Self, PredictionError> {
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Append one log row, returning its id
    pub async fn log(&self, entry: &PredictionLog) -> Result<i64, PredictionError> {
        let result = sqlx::query(
            "INSERT INTO prediction_logs (record_id, prediction, probability, predicted_at, inputs_json, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(entry.record_id_text())
        .bind(serde_json::to_string(&entry.prediction)?)
        .bind(serde_json::to_string(&entry.probability)?)
        .bind(entry.predicted_at.clone())
        .bind(serde_json::to_string(&entry.inputs)?)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Logged prediction {} for record {:?}", id, entry.record_id_text());
        Ok(id)
    }

    /// Newest rows first
    pub async fn recent(&self, limit: i64) -> Result<Vec<PredictionRecord>, PredictionError> {
        let rows = sqlx::query_as::<_, PredictionRecord>(
            "SELECT id, record_id, prediction, probability, predicted_at, inputs_json, created_at \
             FROM prediction_logs ORDER BY id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Row served when the dataset directory holds no usable CSV
pub fn default_record() -> Map<String, Value> {
    let value = json!({ "id": 1, "feature_1": 3.5, "feature_2": 2.8, "feature_3": 0.0 });
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Last row of the first non-empty `*.csv` in `data_dir` (by file name), or [`default_record`]
pub fn latest_record(data_dir: &Path) -> Result<Map<String, Value>, PredictionError> {
    if !data_dir.is_dir() {
        debug!("Dataset directory {} not found", data_dir.display());
        return Ok(default_record());
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(data_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    files.sort();

    for path in files {
        let mut reader = csv::Reader::from_path(&path)?;
        let headers = reader.headers()?.clone();
        let mut last = None;
        for record in reader.records() {
            last = Some(record?);
        }
        if let Some(row) = last {
            debug!("Latest record taken from {}", path.display());
            return Ok(headers
                .iter()
                .zip(row.iter())
                .map(|(name, raw)| (name.to_string(), typed_value(raw)))
                .collect());
        }
    }

    Ok(default_record())
}

/// Integer, then float, then string; blank cells become null
fn typed_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return json!(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        if f.is_finite() {
            return json!(f);
        }
    }
    Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn entry(record_id: Value) -> PredictionLog {
        serde_json::from_value(json!({
            "record_id": record_id,
            "prediction": "Yes",
            "probability": 0.81,
            "predicted_at": "2024-05-01T10:00:00Z",
            "inputs": { "tenure": 2, "MonthlyCharges": 70.7 }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn log_then_recent_returns_newest_first() {
        let logger = PredictionLogger::in_memory().await.unwrap();
        let first = logger.log(&entry(json!("7590-VHVEG"))).await.unwrap();
        let second = logger.log(&entry(json!(42))).await.unwrap();
        assert!(second > first);

        let rows = logger.recent(10).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, second);
        assert_eq!(rows[0].record_id.as_deref(), Some("42"));
        assert_eq!(rows[1].record_id.as_deref(), Some("7590-VHVEG"));
        assert_eq!(rows[1].prediction.as_deref(), Some("\"Yes\""));
        assert_eq!(rows[1].probability.as_deref(), Some("0.81"));

        let inputs: Value = serde_json::from_str(rows[1].inputs_json.as_deref().unwrap()).unwrap();
        assert_eq!(inputs["tenure"], json!(2));
    }

    #[tokio::test]
    async fn missing_record_id_is_stored_as_null() {
        let logger = PredictionLogger::in_memory().await.unwrap();
        let payload: PredictionLog = serde_json::from_value(json!({
            "prediction": 1,
            "predicted_at": "2024-05-01T10:00:00Z",
            "inputs": {}
        }))
        .unwrap();
        logger.log(&payload).await.unwrap();

        let rows = logger.recent(1).await.unwrap();
        assert_eq!(rows[0].record_id, None);
        assert_eq!(rows[0].probability.as_deref(), Some("null"));
    }

    #[tokio::test]
    async fn open_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions.db");
        let logger = PredictionLogger::open(&path).await.unwrap();
        logger.log(&entry(json!("A"))).await.unwrap();
        logger.close().await;
        assert!(path.exists());
    }

    #[test]
    fn latest_record_defaults_without_dataset() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(latest_record(dir.path()).unwrap(), default_record());
        assert_eq!(latest_record(&dir.path().join("missing")).unwrap(), default_record());
    }

    #[test]
    fn latest_record_reads_last_row_with_types() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(
            dir.path().join("Telco.csv"),
            "customerID,tenure,MonthlyCharges,TotalCharges\n\
             7590-VHVEG,1,29.85,29.85\n\
             5575-GNVDE,34,56.95, \n",
        )
        .unwrap();

        let row = latest_record(dir.path()).unwrap();
        assert_eq!(row["customerID"], json!("5575-GNVDE"));
        assert_eq!(row["tenure"], json!(34));
        assert_eq!(row["MonthlyCharges"], json!(56.95));
        assert_eq!(row["TotalCharges"], Value::Null);
    }

    #[test]
    fn empty_csv_falls_through_to_next_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.csv"), "id,feature_1\n").unwrap();
        fs::write(dir.path().join("b.csv"), "id,feature_1\n7,1.5\n").unwrap();

        let row = latest_record(dir.path()).unwrap();
        assert_eq!(row["id"], json!(7));
        assert_eq!(row["feature_1"], json!(1.5));
    }
}
