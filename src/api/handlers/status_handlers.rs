use super::{fail_with_error, ok};
use crate::api::ApiState;
use crate::database::operations::SystemOperations;
use axum::{extract::State, http::StatusCode, response::Response, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub database_status: String,
}

#[derive(Debug, Serialize)]
pub struct ServiceBanner {
    pub message: String,
    pub version: String,
}

// Health handlers
pub async fn get_health(State(state): State<ApiState>) -> Response {
    match SystemOperations::health_check(state.database.pool()).await {
        Ok(_) => ok(HealthStatus {
            status: "OK".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database_status: "connected".to_string(),
        }),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            fail_with_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database health check failed",
                e,
            )
        }
    }
}

pub async fn root() -> Response {
    ok(ServiceBanner {
        message: "Crypto Market Monitor API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "success": false,
            "message": "Route not found"
        })),
    )
}
