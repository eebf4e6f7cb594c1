use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Map, Value};

use crate::api::AppState;
use crate::error::ApiError;
use crate::predictions::{latest_record, PredictionError, PredictionLog};

/// GET /api/records/latest - last dataset row, or the built-in default
pub async fn latest(State(state): State<AppState>) -> Result<Json<Map<String, Value>>, ApiError> {
    let data_dir = state.data_dir.clone();
    let row = tokio::task::spawn_blocking(move || latest_record(&data_dir))
        .await
        .map_err(PredictionError::from)??;
    Ok(Json(row))
}

/// POST /api/predictions - append to the prediction log
pub async fn log_prediction(
    State(state): State<AppState>,
    payload: Result<Json<PredictionLog>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(entry) = payload?;
    state.predictions.log(&entry).await?;
    Ok(Json(json!({ "status": "ok", "logged": true })))
}
