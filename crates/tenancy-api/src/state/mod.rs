//! Shared application state

use std::sync::Arc;

use tenancy_common::{AppConfig, JwtService};
use tenancy_db::PgPool;
use tenancy_service::ServiceContext;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    service_context: ServiceContext,
    db_pool: PgPool,
    jwt_service: Arc<JwtService>,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    #[must_use]
    pub fn new(
        service_context: ServiceContext,
        db_pool: PgPool,
        jwt_service: Arc<JwtService>,
        config: AppConfig,
    ) -> Self {
        Self {
            service_context,
            db_pool,
            jwt_service,
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the database pool (readiness probe only)
    pub fn db_pool(&self) -> &PgPool {
        &self.db_pool
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config.app.name)
            .finish_non_exhaustive()
    }
}
