use axum::response::Json;
use axum::routing::get;
use axum::Router;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations};
use dotenvy::dotenv;
use std::env;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;

pub mod error;
pub mod handlers;
pub mod models;
pub mod schema;
pub mod serializer;
pub mod validation;

#[cfg(test)]
pub mod test_support;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Startup configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Config {
            listen_addr: env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:5555".to_string()),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "app.db".to_string()),
        }
    }
}

/// SQLite keeps foreign keys off per connection; every pooled checkout turns
/// them on and arms a busy timeout for concurrent writers.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConnectionPragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA busy_timeout = 5000; PRAGMA foreign_keys = ON;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn establish_pool(database_url: &str) -> DbPool {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(ConnectionPragmas))
        .build(manager)
        .expect("Failed to create pool.")
}

pub fn app(state: handlers::AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api-docs/openapi.json", get(openapi))
        .merge(handlers::restaurant_router())
        .merge(handlers::pizza_router())
        .merge(handlers::restaurant_pizza_router())
        .with_state(state)
        .layer(CorsLayer::permissive())
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(handlers::ApiDoc::openapi())
}
