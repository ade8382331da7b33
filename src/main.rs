use sqlx::sqlite::SqlitePool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod error;
mod models;
mod routes;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting QED Express API...");

    dotenvy::dotenv().ok();

    let config = Config::from_env().expect("Invalid configuration");

    let pool = open_database(config.database_url.as_deref()).await;
    let state = AppState::new(pool, config.database_url.is_some());

    let app = routes::router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server.");
}

/// The API still serves `/` and `/test` without a database, so connection
/// failures are logged rather than fatal.
async fn open_database(url: Option<&str>) -> Option<SqlitePool> {
    let Some(url) = url else {
        tracing::warn!("DATABASE_URL is not set; running without a database");
        return None;
    };

    match db::connect(url).await {
        Ok(pool) => {
            tracing::info!("Database connection established.");
            Some(pool)
        }
        Err(e) => {
            tracing::error!("Failed to connect to database: {}", e);
            None
        }
    }
}
