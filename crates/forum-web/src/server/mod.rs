//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use forum_common::{AppConfig, AppError, PasswordService};
use forum_db::{
    acquire_bootstrap_lock, create_pool, ensure_schema, PgPool, PgPostRepository,
    PgTopicRepository, PgUserRepository,
};
use forum_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tower_sessions::session_store::ExpiredDeletion;
use tower_sessions_sqlx_store::PostgresStore;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::session::apply_sessions;
use crate::state::AppState;
use crate::templates::Templates;

/// How often expired session rows are purged
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let pages = apply_sessions(create_router(), state.session_store().clone(), state.config());
    let router = pages.merge(health_routes());
    let router = apply_middleware(router);
    router.with_state(state)
}

/// Create tables for the forum and the session store
///
/// Runs under an advisory lock so concurrent instances do not race on DDL.
async fn prepare_database(pool: &PgPool) -> Result<PostgresStore, AppError> {
    let lock = acquire_bootstrap_lock(pool).await.map_err(|e| AppError::Database(e.to_string()))?;
    ensure_schema(pool).await.map_err(|e| AppError::Database(e.to_string()))?;

    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    lock.release().await.map_err(|e| AppError::Database(e.to_string()))?;
    Ok(session_store)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&config.database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    let session_store = prepare_database(&pool).await?;
    info!("Database schema ready");

    // Create repositories
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let topic_repo = Arc::new(PgTopicRepository::new(pool.clone()));
    let post_repo = Arc::new(PgPostRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .user_repo(user_repo)
        .topic_repo(topic_repo)
        .post_repo(post_repo)
        .password_service(Arc::new(PasswordService::new()))
        .upgrade_secret(config.membership.upgrade_secret.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let templates =
        Templates::new(&config.app.name).map_err(|e| AppError::Config(format!("Invalid template: {e}")))?;

    Ok(AppState::new(service_context, config, templates, pool, session_store))
}

/// Purge expired sessions in the background
fn spawn_session_sweeper(store: PostgresStore) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            if let Err(e) = store.delete_expired().await {
                warn!(error = %e, "Failed to purge expired sessions");
            }
        }
    });
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable; waiting for Ctrl+C");
                ctrl_c.await.ok();
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .server
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    // Create app state
    let state = create_app_state(config).await?;
    spawn_session_sweeper(state.session_store().clone());

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
