use diesel_migrations::MigrationHarness;
use pizzeria_service::handlers::AppState;
use pizzeria_service::{app, establish_pool, Config, MIGRATIONS};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let pool = establish_pool(&config.database_url);

    {
        let mut conn = pool.get()?;
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Failed to run migrations");
    }

    let state = AppState { pool };
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!("Pizzeria service listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
