use crate::shared::config::{AppConfig, ConfigError};

/// Default backend URL
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Environment variable overriding the backend URL
pub const BACKEND_URL_ENV: &str = "PULSECHAT_BACKEND_URL";

/// Client configuration wrapper.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    app: AppConfig,
}

impl ClientConfig {
    /// Configuration for an explicit backend URL
    pub fn new(server_url: impl Into<String>) -> Result<Self, ConfigError> {
        let app = AppConfig::builder().server_url(server_url).build()?;
        Ok(Self { app })
    }

    /// Configuration from `PULSECHAT_BACKEND_URL`, falling back to the default
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_url =
            std::env::var(BACKEND_URL_ENV).unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        Self::new(server_url)
    }

    pub fn server_url(&self) -> &str {
        self.app.server_url.as_deref().unwrap_or(DEFAULT_BACKEND_URL)
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url(), path)
    }

    /// URL of the realtime stream
    pub fn realtime_url(&self) -> String {
        self.api_url("/realtime")
    }
}
