//! Application state management
//!
//! Shared state passed to every handler via Axum's state extraction. It is
//! built once at startup and read-only afterwards.

use crate::auth::JwtService;
use crate::config::AppConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
///
/// - `db`: PgPool is internally Arc'd, cloning is O(1)
/// - `config`: Wrapped in Arc, cloning is O(1)
/// - `jwt`: Pre-computed keys wrapped in Arc, cloning is O(1)
/// - `metrics`: Present only when the binary installed a Prometheus recorder
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub jwt: JwtService,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state
    ///
    /// Derives the JWT keys from the configured secret, so call this once at
    /// startup rather than per request.
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        let jwt = JwtService::new(
            &config.jwt.secret,
            config.jwt.access_token_expiry_secs,
            config.jwt.refresh_token_expiry_secs,
        );

        Self {
            db,
            config: Arc::new(config),
            jwt,
            metrics: None,
        }
    }

    /// Attach the handle used to render `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
