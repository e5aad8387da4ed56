use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `CAMPAIGN_TRACKER__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

/// Connection settings for the external table store (PostgREST-style API).
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_backend")]
    pub backend: StoreBackend,
    #[serde(default = "default_store_url")]
    pub url: String,
    #[serde(default)]
    pub anon_key: String,
    #[serde(default)]
    pub service_role_key: Option<String>,
    #[serde(default = "default_store_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Hosted table store reached over HTTP.
    Rest,
    /// In-process store for development and testing.
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsConfig {
    #[serde(default = "default_news_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_news_page_size")]
    pub page_size: u32,
    #[serde(default = "default_news_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

// Default functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_store_backend() -> StoreBackend {
    StoreBackend::Rest
}
fn default_store_url() -> String {
    "http://localhost:54321".to_string()
}
fn default_store_timeout_ms() -> u64 {
    10_000
}
fn default_news_base_url() -> String {
    "https://newsapi.org/v2".to_string()
}
fn default_news_page_size() -> u32 {
    20
}
fn default_news_timeout_ms() -> u64 {
    10_000
}
fn default_metrics_port() -> u16 {
    9091
}

impl StoreConfig {
    /// Key sent to the table store; the service role key takes precedence
    /// over the anon key when both are configured.
    pub fn effective_key(&self) -> &str {
        self.service_role_key.as_deref().unwrap_or(&self.anon_key)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            url: default_store_url(),
            anon_key: String::new(),
            service_role_key: None,
            timeout_ms: default_store_timeout_ms(),
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: default_news_base_url(),
            api_key: String::new(),
            page_size: default_news_page_size(),
            timeout_ms: default_news_timeout_ms(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            port: default_metrics_port(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            store: StoreConfig::default(),
            news: NewsConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("CAMPAIGN_TRACKER")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_complete() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api.http_port, 8080);
        assert_eq!(cfg.store.backend, StoreBackend::Rest);
        assert_eq!(cfg.store.timeout_ms, 10_000);
        assert_eq!(cfg.news.page_size, 20);
        assert_eq!(cfg.metrics.port, 9091);
    }

    #[test]
    fn test_service_role_key_wins() {
        let mut cfg = StoreConfig::default();
        cfg.anon_key = "anon".to_string();
        assert_eq!(cfg.effective_key(), "anon");
        cfg.service_role_key = Some("service".to_string());
        assert_eq!(cfg.effective_key(), "service");
    }
}
