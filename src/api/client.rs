//! HTTP client for the ChronoGuard REST backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::Backend;
use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::models::{Decision, Notification, UserRecord};

/// Backend HTTP client.
///
/// One `reqwest::Client` is shared by every request so connections are
/// pooled. No request is retried.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The backend URL (e.g., "http://localhost:5170")
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    /// Build a client from the `[api]` config section.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{base}{path}", base = self.base_url)
    }
}

/// Turn a non-2xx response into `AppError::Status`.
fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(AppError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

/// Read the body and decode it as JSON, keeping the URL in the error.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let url = response.url().to_string();
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| AppError::parse(format!("{url}: {e}")))
}

#[async_trait]
impl Backend for ApiClient {
    async fn list_notifications(&self) -> Result<Vec<Notification>> {
        let url = self.url("/notificaciones");
        tracing::debug!("GET {}", url);

        let response = ensure_success(self.client.get(&url).send().await?)?;
        decode(response).await
    }

    async fn submit_decision(&self, decision: &Decision) -> Result<()> {
        let url = self.url("/notificaciones");
        tracing::debug!(
            "POST {} notification={} action={:?}",
            url,
            decision.notification_id,
            decision.action
        );

        ensure_success(self.client.post(&url).json(decision).send().await?)?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        let url = self.url("/usuarios");
        tracing::debug!("GET {}", url);

        let response = ensure_success(self.client.get(&url).send().await?)?;
        decode(response).await
    }

    async fn ping(&self) -> Result<()> {
        let url = self.url("/");
        self.client.get(&url).send().await?;
        Ok(())
    }
}
