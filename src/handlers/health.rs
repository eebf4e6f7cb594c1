use axum::extract::State;
use serde_json::json;

use crate::api::{AppState, MessageResponse};

/// GET / - banner
pub async fn root() -> MessageResponse {
    MessageResponse::new("Telco Customer Churn API is running!")
}

/// GET /health - probes both stores; always 200, status is in the body
pub async fn health(State(state): State<AppState>) -> MessageResponse {
    let (postgresql, mongodb) = tokio::join!(state.db.probe_relational(), state.db.probe_document_store());

    MessageResponse::new("Health Check").with_data(json!({
        "postgresql": if postgresql { "connected" } else { "disconnected" },
        "mongodb": if mongodb { "connected" } else { "disconnected" },
        "overall": if postgresql && mongodb { "healthy" } else { "unhealthy" },
    }))
}
