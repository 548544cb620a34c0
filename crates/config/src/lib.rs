//! Configuration management for the kisan agent
//!
//! Supports loading configuration from:
//! - TOML files
//! - Environment variables (KISAN_AGENT_ prefix)
//!
//! Also home to the static market reference tables:
//! - Commodity base prices, MSPs and volatility
//! - State supply/demand multipliers
//! - Ordered location keyword rules
//!
//! The reference tables are plain immutable data built once at startup
//! and injected into the engines; nothing here is written after
//! initialization.

pub mod commodities;
pub mod settings;
pub mod states;

pub use commodities::{CommodityBasePrice, CommodityTable};
pub use settings::{
    load_settings, MarketConfig, RuntimeEnvironment, ServerConfig, Settings, SourcesConfig,
};
pub use states::{default_location_rules, LocationRule, StateFactorTable, StateFactors};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
