use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use actix_web_prometheus::PrometheusMetricsBuilder;
use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use todo_api::{
    config::Config,
    handlers::{self, AppState},
    initialize_db_pool,
};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run pending migrations over a synchronous connection, retrying while the
/// database comes up.
fn run_migrations(database_url: &str) {
    let mut attempt = 0u64;
    let mut conn = loop {
        match PgConnection::establish(database_url) {
            Ok(conn) => break conn,
            Err(e) if attempt >= 10 => {
                log::error!("Could not connect for migrations: {}", e);
                std::process::exit(1);
            }
            Err(e) => {
                attempt += 1;
                log::warn!("Database not ready ({}), retrying", e);
                std::thread::sleep(std::time::Duration::from_millis(200 * attempt));
            }
        }
    };

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");
    for migration in applied {
        log::info!("Applied migration {}", migration);
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    run_migrations(&config.database_url);

    // initialize DB pool outside of `HttpServer::new` so that it is shared across all workers
    let pool = initialize_db_pool(&config).await;
    let port = config.port;
    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .build()
        .unwrap();

    log::info!("starting HTTP server at http://0.0.0.0:{port}");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(prometheus.clone())
            .wrap(middleware::Logger::default())
            .configure(handlers::configure_routes)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
