//! Health check endpoint.
//!
//! Probes the database pool directly, bypassing the service layer.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{Json, extract::State, http::StatusCode};
use diesel_async::RunQueryDsl;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::state::AppState;

pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(health_check))
}

/// Reports database connectivity. Answers 503 when any component is unhealthy.
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    )
)]
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let mut checks = BTreeMap::new();
    checks.insert("database".to_string(), check_database(&state).await);

    let response = HealthResponse::from_checks(crate::pkg_version(), checks);
    let status = match response.status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
    };
    (status, Json(response))
}

async fn check_database(state: &AppState) -> ComponentHealth {
    let started = Instant::now();
    let elapsed = |started: Instant| Some(started.elapsed().as_millis() as u64);

    let Some(pool) = state.db_pool.as_ref() else {
        return ComponentHealth {
            status: HealthStatus::Unhealthy,
            message: Some("No database pool configured".to_string()),
            response_time_ms: None,
        };
    };

    let (status, message) = match pool.get().await {
        Ok(mut conn) => match diesel::sql_query("SELECT 1").execute(&mut conn).await {
            Ok(_) => (HealthStatus::Healthy, "Connected".to_string()),
            Err(e) => (HealthStatus::Unhealthy, format!("Query failed: {}", e)),
        },
        Err(e) => (HealthStatus::Unhealthy, format!("Connection failed: {}", e)),
    };

    ComponentHealth {
        status,
        message: Some(message),
        response_time_ms: elapsed(started),
    }
}
