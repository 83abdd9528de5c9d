//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use apalis_sql::postgres::PostgresStorage;
use apalis_sql::sqlx::postgres::PgPoolOptions;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, Database};
use crate::jobs::{EmailOutbox, EmailQueue, LogMailer};

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    // Initialize database
    let db = Arc::new(Database::connect(&config).await);
    tracing::info!("Database connected");

    // Initialize Redis cache
    let cache = Arc::new(Cache::connect(&config).await);
    tracing::info!("Redis cache connected");

    // Email delivery goes through the job queue; if its storage cannot be
    // prepared the API still serves and emails are logged instead
    let mailer: Arc<dyn EmailQueue> = match build_email_outbox(&config).await {
        Ok(outbox) => {
            tracing::info!("Email job storage ready");
            Arc::new(outbox)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Email job storage unavailable, falling back to logging");
            Arc::new(LogMailer)
        }
    };

    // Create application state with centralized service container
    let app_state = AppState::from_config(db, cache, mailer, config);

    // Build router
    let app = create_router(app_state);

    // Start server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}

/// Prepare the apalis Postgres storage used to enqueue outbound email.
async fn build_email_outbox(config: &Config) -> Result<EmailOutbox, apalis_sql::sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    PostgresStorage::setup(&pool).await?;

    Ok(EmailOutbox::new(PostgresStorage::new(pool)))
}
