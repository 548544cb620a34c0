//! Market data types
//!
//! Shared between the price synthesis engine and the live data-source
//! tiers. An [`EstimatedPrice`] is recomputed per request and never
//! persisted; the percentage change is always relative to the commodity's
//! static base price, not to any previous estimate.

use serde::{Deserialize, Serialize};

/// Price movement classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketTrend {
    Up,
    Down,
    Stable,
}

impl MarketTrend {
    /// A change within this band (in percent, either side) counts as stable.
    pub const STABLE_BAND_PCT: f64 = 2.0;

    /// Classify a signed percentage change against the stable band.
    pub fn from_change_pct(change_pct: f64) -> Self {
        if change_pct > Self::STABLE_BAND_PCT {
            MarketTrend::Up
        } else if change_pct < -Self::STABLE_BAND_PCT {
            MarketTrend::Down
        } else {
            MarketTrend::Stable
        }
    }

    /// Lenient parse for caller-supplied trend strings.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "up" => Some(MarketTrend::Up),
            "down" => Some(MarketTrend::Down),
            "stable" => Some(MarketTrend::Stable),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketTrend::Up => "up",
            MarketTrend::Down => "down",
            MarketTrend::Stable => "stable",
        }
    }
}

/// Which tier actually produced a market snapshot.
///
/// The tag must always name the tier the data came from; a synthesized
/// listing is never labelled as a live source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataSource {
    CustomApi,
    Agmarknet,
    Mock,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::CustomApi => "custom-api",
            DataSource::Agmarknet => "agmarknet",
            DataSource::Mock => "mock",
        }
    }
}

/// One priced commodity in a listing.
///
/// `change_pct` is `None` for live-source records whose commodity has no
/// static baseline to compare against; it is never a fabricated 0.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatedPrice {
    /// Commodity name as listed in the static table or live record.
    pub commodity: String,
    /// Current estimated price, whole rupees per quintal.
    pub price: i64,
    /// Minimum support price per quintal; 0 means no government floor.
    pub msp: i64,
    /// Movement relative to the static base price.
    pub trend: MarketTrend,
    /// Signed percentage change vs the static base price, one decimal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_pct: Option<f64>,
    /// Market/state label, e.g. "Punjab Mandi".
    pub market: String,
}

/// A complete market-data response for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Resolved canonical state.
    pub state: String,
    /// Tier that produced the prices.
    pub source: DataSource,
    /// Priced commodities, farmer crops first, at most the listing cap.
    #[serde(rename = "market_data")]
    pub prices: Vec<EstimatedPrice>,
}
