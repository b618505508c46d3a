use std::sync::Arc;

use anyhow::Context;
use storage::{Database, MemoryStore, PgStore, ScoreStore};

mod app;
mod config;
mod error;
mod features;
mod middleware;
mod session;
mod state;

use config::Config;
use session::SessionRegistry;
use state::AppState;

async fn open_store(config: &Config) -> Arc<dyn ScoreStore> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, using in-memory storage (data will reset on restart)");
        return Arc::new(MemoryStore::new());
    };

    tracing::info!(
        "Connecting to database at: {}",
        database_url.split('@').next_back().unwrap_or("unknown")
    );

    let db = match Database::new(database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Error connecting to database: {}", e);
            tracing::warn!("Using in-memory storage as fallback (data will reset on restart)");
            return Arc::new(MemoryStore::new());
        }
    };
    tracing::info!("Database connection established");

    if let Err(e) = db.run_migrations().await {
        tracing::error!("Failed to run migrations: {}", e);
    } else {
        tracing::info!("Database migrations completed successfully");
    }

    Arc::new(PgStore::new(db))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Gentlemen's Cup API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let state = AppState {
        store: open_store(&config).await,
        sessions: SessionRegistry::new(),
        access_code: Arc::from(config.access_code.as_str()),
        leaderboard_refresh_secs: config.leaderboard_refresh_secs,
    };

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app::build_router(state)).await?;

    Ok(())
}
