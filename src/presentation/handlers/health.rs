use crate::infrastructure::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// Liveness plus a `SELECT 1` round trip to Postgres
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let reachable = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => true,
        Err(e) => {
            tracing::error!("Database health check failed: {:?}", e);
            false
        }
    };

    let (status, label, database) = if reachable {
        (StatusCode::OK, "healthy", "connected")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", "disconnected")
    };

    (
        status,
        Json(json!({
            "service": env!("CARGO_PKG_NAME"),
            "status": label,
            "database": database
        })),
    )
}
