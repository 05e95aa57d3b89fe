//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! configuration, compiled templates, and the database pool.

use std::sync::Arc;

use forum_common::AppConfig;
use forum_db::PgPool;
use forum_service::ServiceContext;
use tower_sessions_sqlx_store::PostgresStore;

use crate::templates::Templates;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
    /// Page templates
    templates: Arc<Templates>,
    /// Pool used for readiness checks
    pool: PgPool,
    /// Session rows live in the same database
    session_store: PostgresStore,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        service_context: ServiceContext,
        config: AppConfig,
        templates: Templates,
        pool: PgPool,
        session_store: PostgresStore,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            templates: Arc::new(templates),
            pool,
            session_store,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn templates(&self) -> &Templates {
        &self.templates
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn session_store(&self) -> &PostgresStore {
        &self.session_store
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .field("templates", &self.templates)
            .finish()
    }
}
