use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::auth::AuthClient;
use crate::config::Config;
use crate::jobs::client::JobsClient;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable resume store. Default: PgResumeStore.
    pub store: Arc<dyn ResumeStore>,
    pub jobs: JobsClient,
    pub auth: AuthClient,
    pub config: Config,
}

impl AppState {
    /// Builds the outbound clients around one shared `reqwest::Client`.
    pub fn new(config: Config, store: Arc<dyn ResumeStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(AppState {
            store,
            jobs: JobsClient::new(
                http.clone(),
                config.job_service_url.clone(),
                config.job_top_k,
            ),
            auth: AuthClient::new(http, config.auth_service_url.clone()),
            config,
        })
    }
}
