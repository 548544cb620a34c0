//! Core traits and types for the kisan agent market engine
//!
//! This crate provides foundational types used across all other crates:
//! - Market data types (trends, estimated prices, source tags)
//! - Forecast and recommendation types
//! - Core traits for pluggable backends (data sources, noise)
//! - Error types

pub mod error;
pub mod forecast;
pub mod market;
pub mod traits;

// Re-exports from market types
pub use market::{DataSource, EstimatedPrice, MarketSnapshot, MarketTrend};

// Re-exports from forecast types
pub use forecast::{
    Confidence, ForecastResult, Recommendation, RecommendationPriority, RecommendedAction,
    FORECAST_TIMEFRAME,
};

// Error re-exports
pub use error::{Error, Result, SourceError};

// Trait re-exports
pub use traits::{MarketDataSource, NoiseSource};
