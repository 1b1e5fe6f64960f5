pub mod client;
pub mod config;
pub mod db;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod schema;
pub mod validation;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;

/// Short-hand for the database pool type to use throughout the app.
pub type DbPool = diesel_async::pooled_connection::bb8::Pool<AsyncPgConnection>;

pub type Conn<'a> = diesel_async::pooled_connection::bb8::PooledConnection<'a, AsyncPgConnection>;

/// Build the async connection pool from the loaded configuration.
pub async fn initialize_db_pool(config: &config::Config) -> DbPool {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);
    diesel_async::pooled_connection::bb8::Pool::builder()
        .max_size(config.pool.max_size)
        .min_idle(Some(config.pool.min_idle))
        .max_lifetime(Some(config.pool.max_lifetime))
        .idle_timeout(Some(config.pool.idle_timeout))
        .connection_timeout(config.pool.connection_timeout)
        .build(manager)
        .await
        .expect("Failed to create database pool")
}
