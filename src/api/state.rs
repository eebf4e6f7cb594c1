use axum::extract::FromRef;
use std::path::PathBuf;
use std::sync::Arc;

use crate::api::PageLimits;
use crate::database::documents::{DocumentEntity, MongoRepository};
use crate::database::postgres::{PgEntity, PgRepository};
use crate::database::ConnectionManager;
use crate::predictions::PredictionLogger;

/// Shared router state. Repositories are cheap handles derived from it per request.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<ConnectionManager>,
    pub predictions: PredictionLogger,
    pub limits: PageLimits,
    pub data_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(db: Arc<ConnectionManager>, predictions: PredictionLogger, limits: PageLimits, data_dir: PathBuf) -> Self {
        Self {
            db,
            predictions,
            limits,
            data_dir: Arc::new(data_dir),
        }
    }
}

impl FromRef<AppState> for PageLimits {
    fn from_ref(state: &AppState) -> Self {
        state.limits
    }
}

impl FromRef<AppState> for PredictionLogger {
    fn from_ref(state: &AppState) -> Self {
        state.predictions.clone()
    }
}

impl<T: PgEntity> FromRef<AppState> for PgRepository<T> {
    fn from_ref(state: &AppState) -> Self {
        PgRepository::new(state.db.clone())
    }
}

impl<T: DocumentEntity> FromRef<AppState> for MongoRepository<T> {
    fn from_ref(state: &AppState) -> Self {
        MongoRepository::new(state.db.clone())
    }
}
