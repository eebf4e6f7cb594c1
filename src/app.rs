use axum::routing::{get, post};
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::AppState;
use crate::handlers::{health, mongo, postgres, predictions};

pub fn router(state: AppState, request_logging: bool) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(health::root))
        .route("/health", get(health::health))
        // Store-backed CRUD
        .merge(postgres::routes())
        .merge(mongo::routes())
        // Prediction side service
        .route("/api/records/latest", get(predictions::latest))
        .route("/api/predictions", post(predictions::log_prediction))
        // Global middleware
        .layer(CorsLayer::permissive());

    let router = if request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}
