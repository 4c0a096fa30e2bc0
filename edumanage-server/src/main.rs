use std::time::Duration;

use anyhow::Context;
use edumanage_server::{api, config::Config, db, state::AppState};
use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edumanage_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting EduManage server...");

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");

    // Create database connection pool
    let pool = db::create_pool(&config.database_url)
        .await
        .context("Failed to create database pool")?;

    tracing::info!("Database connection pool created");

    // Run migrations
    db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    if let Some(admin) = &config.bootstrap_admin {
        db::bootstrap_admin(&pool, admin).await?;
    }

    tokio::spawn(purge_sessions(pool.clone(), config.session_purge_interval));

    let addr = config.bind_addr.clone();

    // Build router with all API endpoints
    let app = api::create_router(AppState::new(pool, config));

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}

/// Periodically remove expired sessions and spent login codes
async fn purge_sessions(pool: PgPool, every: Duration) {
    let mut interval = tokio::time::interval(every);

    loop {
        interval.tick().await;

        match db::purge_expired_sessions(&pool).await {
            Ok(0) => {}
            Ok(removed) => tracing::info!("Purged {} expired sessions and login codes", removed),
            Err(e) => tracing::error!("Session purge failed: {}", e),
        }
    }
}
