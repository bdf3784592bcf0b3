//! Backend REST contract and its implementations.

pub mod client;
pub mod fixtures;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ApiConfig;
use crate::error::Result;
use crate::models::{Decision, Notification, UserRecord};

pub use client::ApiClient;
pub use fixtures::FixtureBackend;

/// Calls the panels make against the HR backend.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /notificaciones`
    async fn list_notifications(&self) -> Result<Vec<Notification>>;

    /// `POST /notificaciones`
    async fn submit_decision(&self, decision: &Decision) -> Result<()>;

    /// `GET /usuarios`
    async fn list_users(&self) -> Result<Vec<UserRecord>>;

    /// Reachability check used by the settings dialog.
    async fn ping(&self) -> Result<()>;
}

/// Pick the backend selected by the `[api]` config section.
pub fn backend_from_config(config: &ApiConfig) -> Result<Arc<dyn Backend>> {
    if config.use_fixtures {
        tracing::info!("Using fixture backend");
        return Ok(Arc::new(FixtureBackend::new()));
    }
    tracing::info!("Using API at {}", config.base_url);
    Ok(Arc::new(ApiClient::from_config(config)?))
}
