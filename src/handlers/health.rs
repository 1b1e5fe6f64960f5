use actix_web::{HttpResponse, web};
use diesel_async::RunQueryDsl;

use super::{AppState, HealthResponse};

/// Round-trip a trivial query to prove the database is reachable.
async fn probe_database(state: &AppState) -> Result<(), String> {
    let mut conn = state.pool.get().await.map_err(|e| e.to_string())?;
    diesel::sql_query("SELECT 1")
        .execute(&mut conn)
        .await
        .map_err(|e| e.to_string())?;
    Ok(())
}

#[utoipa::path(
    get,
    path = "/health",
    summary = "Health check",
    description = "Liveness probe. Round-trips a query to the database and reports pool statistics; 200 when the database answers, 503 otherwise.",
    responses(
        (status = 200, description = "Database reachable", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse),
    ),
    tag = "health"
)]
/// Liveness probe
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let pool_state = state.pool.state();

    let database = match probe_database(&state).await {
        Ok(()) => "healthy".to_string(),
        Err(e) => {
            log::warn!("Health probe failed: {}", e);
            "unhealthy".to_string()
        }
    };
    let healthy = database == "healthy";

    let body = HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        database,
        pool_size: pool_state.connections,
        pool_idle: pool_state.idle_connections,
    };

    match healthy {
        true => HttpResponse::Ok().json(body),
        false => HttpResponse::ServiceUnavailable().json(body),
    }
}

#[utoipa::path(
    get,
    path = "/ready",
    summary = "Readiness check",
    description = "Readiness probe, stricter than /health: a saturated connection pool also counts as not ready.",
    responses(
        (status = 200, description = "Ready to accept traffic"),
        (status = 503, description = "Pool saturated or database unreachable"),
    ),
    tag = "health"
)]
/// Readiness probe
pub async fn readiness_check(state: web::Data<AppState>) -> HttpResponse {
    let pool_state = state.pool.state();

    // A saturated pool means new requests would only queue up.
    if pool_state.idle_connections == 0 && pool_state.connections >= state.config.pool.max_size {
        return HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "not_ready",
            "reason": "connection pool saturated"
        }));
    }

    match probe_database(&state).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({"status": "ready"})),
        Err(_) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "not_ready",
            "reason": "cannot reach the database"
        })),
    }
}
