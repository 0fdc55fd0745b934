use anyhow::{Context, Result};

const DEFAULT_TOP_K: u32 = 3;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_CONTENT_TYPE: &str = "application/pdf";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Job-matching upload endpoint, without the `top_k` query.
    pub job_service_url: String,
    pub auth_service_url: String,
    pub job_top_k: u32,
    pub max_upload_bytes: usize,
    pub accepted_content_type: String,
    pub upstream_timeout_secs: u64,
    pub cors_allowed_origin: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            job_service_url: require_env("JOB_SERVICE_URL")?,
            auth_service_url: require_env("AUTH_SERVICE_URL")?,
            job_top_k: parse_env("JOB_TOP_K", DEFAULT_TOP_K)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            accepted_content_type: std::env::var("ACCEPTED_CONTENT_TYPE")
                .unwrap_or_else(|_| DEFAULT_CONTENT_TYPE.to_string()),
            upstream_timeout_secs: parse_env(
                "UPSTREAM_TIMEOUT_SECS",
                DEFAULT_UPSTREAM_TIMEOUT_SECS,
            )?,
            cors_allowed_origin: std::env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            port: parse_env("PORT", 4000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Configuration pointing both upstreams at a local stub.
    pub fn for_tests(stub_base: &str) -> Self {
        Config {
            database_url: String::new(),
            job_service_url: format!("{stub_base}/api/v1/alerts/upload"),
            auth_service_url: format!("{stub_base}/auth"),
            job_top_k: DEFAULT_TOP_K,
            max_upload_bytes: 1024,
            accepted_content_type: DEFAULT_CONTENT_TYPE.to_string(),
            upstream_timeout_secs: 5,
            cors_allowed_origin: None,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
