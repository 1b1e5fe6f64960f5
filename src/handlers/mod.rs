//! HTTP layer: shared state, route table, OpenAPI doc and the handlers
//! themselves. `configure_routes` is the single wiring point used by both the
//! server binary and the integration tests.

mod health;
pub mod response;
mod todo;

use std::sync::Arc;

use actix_web::{error, web};

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{DbPool, config::Config, dtos};

pub use health::{health_check, readiness_check};
pub use todo::{add_todo, delete_todo, get_todo, list_todos, update_todo};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<Config>,
}

impl AppState {
    /// Acquire a pooled connection, retrying per the configured policy.
    pub async fn conn(&self) -> Result<crate::Conn<'_>, actix_web::Error> {
        let policy = &self.config.pool;
        get_conn_with_retry(&self.pool, policy.acquire_retries, policy.retry_delay).await
    }
}

/// Body of the `/health` endpoint.
#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    /// "ok" or "degraded"
    pub status: String,
    /// "healthy", or "unhealthy" when the probe query failed
    pub database: String,
    pub pool_size: u32,
    pub pool_idle: u32,
}

/// Acquire a connection from the pool, sleeping `retry_delay` between
/// attempts. Exhausting the attempts maps to a 503.
pub async fn get_conn_with_retry<'a>(
    pool: &'a DbPool,
    max_retries: u32,
    retry_delay: std::time::Duration,
) -> Result<crate::Conn<'a>, actix_web::Error> {
    let attempts = max_retries.max(1);

    for attempt in 1..=attempts {
        match pool.get().await {
            Ok(conn) => return Ok(conn),
            Err(e) if attempt == attempts => {
                log::error!("Giving up acquiring a connection after {} attempts: {}", attempts, e);
                return Err(error::ErrorServiceUnavailable(
                    "Database connection unavailable",
                ));
            }
            Err(e) => {
                log::warn!(
                    "Connection acquire attempt {}/{} failed ({}), retrying",
                    attempt,
                    attempts,
                    e
                );
                tokio::time::sleep(retry_delay).await;
            }
        }
    }
    unreachable!("loop either returns a connection or errors on the last attempt")
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::readiness_check,
        todo::list_todos,
        todo::get_todo,
        todo::add_todo,
        todo::update_todo,
        todo::delete_todo,
    ),
    components(schemas(
        HealthResponse,
        dtos::TodoDto,
        dtos::NewTodoDto,
        dtos::UpdateTodoDto,
        crate::models::TodoStatus,
    )),
    tags(
        (name = "health", description = "Liveness (GET /health) and readiness (GET /ready) probes."),
        (name = "todos", description = "Todo CRUD. The collection is ordered by creation time, newest first. All JSON keys are camelCase."),
    ),
    info(
        title = "Todo API",
        version = "0.1.0",
        description = "A small task management API: list, create, update, complete and delete todos with due-date tracking.",
    )
)]
pub struct ApiDoc;

/// Wire up every route. Used by the server binary and the integration tests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check))
        .route("/todos", web::get().to(list_todos))
        .route("/todos", web::post().to(add_todo))
        .route("/todos/{todo_id}", web::get().to(get_todo))
        .route("/todos/{todo_id}", web::put().to(update_todo))
        .route("/todos/{todo_id}", web::delete().to(delete_todo))
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
}
