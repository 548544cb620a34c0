//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Runtime environment enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Live data source configuration
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Market engine configuration
    #[serde(default)]
    pub market: MarketConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Enable CORS origin checking. Disabled means permissive (dev only).
    #[serde(default = "default_cors_enabled")]
    pub cors_enabled: bool,

    /// Allowed CORS origins. Empty defaults to localhost for safety.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Whole-request timeout applied by the router.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Configuration for the live market data tiers.
///
/// A tier with no endpoint/key configured is skipped entirely; the
/// synthesizer needs no configuration and always runs last.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Base URL of the self-hosted mandi scraper bridge, if deployed.
    #[serde(default)]
    pub scraper_url: Option<String>,

    #[serde(default = "default_scraper_timeout")]
    pub scraper_timeout_secs: u64,

    /// Upper bound on concurrent per-crop scraper requests.
    #[serde(default = "default_scraper_concurrency")]
    pub scraper_concurrency: usize,

    /// data.gov.in API key for the Agmarknet daily price resource.
    #[serde(default)]
    pub agmarknet_api_key: Option<String>,

    #[serde(default = "default_agmarknet_base_url")]
    pub agmarknet_base_url: String,

    #[serde(default = "default_agmarknet_timeout")]
    pub agmarknet_timeout_secs: u64,

    /// Records requested per state query.
    #[serde(default = "default_agmarknet_record_limit")]
    pub agmarknet_record_limit: usize,
}

/// Market engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// State used when the location resolver finds no match.
    #[serde(default = "default_state")]
    pub default_state: String,

    /// Maximum commodities in one listing.
    #[serde(default = "default_max_listing")]
    pub max_listing: usize,

    /// Multiplier applied in states absent from the factor table.
    /// Slightly above neutral: unmodeled regions are assumed to be net
    /// consumers.
    #[serde(default = "default_state_factor")]
    pub default_state_factor: f64,
}

// Default values

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_enabled() -> bool {
    true
}

fn default_request_timeout() -> u64 {
    30
}

fn default_scraper_timeout() -> u64 {
    8
}

fn default_scraper_concurrency() -> usize {
    5
}

fn default_agmarknet_base_url() -> String {
    // Agmarknet daily mandi price resource on data.gov.in
    "https://api.data.gov.in/resource/9ef84268-d588-465a-a308-a864a43d0070".to_string()
}

fn default_agmarknet_timeout() -> u64 {
    10
}

fn default_agmarknet_record_limit() -> usize {
    100
}

fn default_state() -> String {
    "Punjab".to_string()
}

fn default_max_listing() -> usize {
    8
}

fn default_state_factor() -> f64 {
    1.05
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: default_cors_enabled(),
            cors_origins: Vec::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            scraper_url: None,
            scraper_timeout_secs: default_scraper_timeout(),
            scraper_concurrency: default_scraper_concurrency(),
            agmarknet_api_key: None,
            agmarknet_base_url: default_agmarknet_base_url(),
            agmarknet_timeout_secs: default_agmarknet_timeout(),
            agmarknet_record_limit: default_agmarknet_record_limit(),
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            default_state: default_state(),
            max_listing: default_max_listing(),
            default_state_factor: default_state_factor(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port must be non-zero".to_string(),
            });
        }

        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.request_timeout_secs".to_string(),
                message: "Request timeout must be at least 1 second".to_string(),
            });
        }

        if !(1..=16).contains(&self.sources.scraper_concurrency) {
            return Err(ConfigError::InvalidValue {
                field: "sources.scraper_concurrency".to_string(),
                message: format!(
                    "Must be between 1 and 16, got {}",
                    self.sources.scraper_concurrency
                ),
            });
        }

        if self.sources.scraper_timeout_secs == 0 || self.sources.agmarknet_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sources.*_timeout_secs".to_string(),
                message: "Source timeouts must be at least 1 second".to_string(),
            });
        }

        if !(1..=24).contains(&self.market.max_listing) {
            return Err(ConfigError::InvalidValue {
                field: "market.max_listing".to_string(),
                message: format!("Must be between 1 and 24, got {}", self.market.max_listing),
            });
        }

        if self.market.default_state_factor <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "market.default_state_factor".to_string(),
                message: "Default state factor must be positive".to_string(),
            });
        }

        if self.market.default_state.trim().is_empty() {
            return Err(ConfigError::MissingField(
                "market.default_state".to_string(),
            ));
        }

        Ok(())
    }
}

/// Load settings from an optional TOML file plus environment overrides.
///
/// Environment variables use the KISAN_AGENT_ prefix with `__` as the
/// section separator, e.g. `KISAN_AGENT_SERVER__PORT=9000`.
pub fn load_settings(path: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(File::with_name(path));
    } else {
        builder = builder.add_source(File::with_name("config/default").required(false));
    }

    builder = builder.add_source(Environment::with_prefix("KISAN_AGENT").separator("__"));

    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;

    tracing::debug!(
        environment = ?settings.environment,
        scraper_configured = settings.sources.scraper_url.is_some(),
        agmarknet_configured = settings.sources.agmarknet_api_key.is_some(),
        "Settings loaded"
    );

    Ok(settings)
}
