//! Forecast and recommendation types
//!
//! A forecast is an advisory, not a prediction from a trained model: it
//! combines the caller's stated current trend with the seasonal outlook
//! through a fixed decision table and always spans a 7-day window.

use serde::{Deserialize, Serialize};

use crate::market::MarketTrend;

/// Fixed advisory window for all forecasts.
pub const FORECAST_TIMEFRAME: &str = "7 days";

/// How much weight the advisory carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

/// What the farmer should do with their stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendedAction {
    Sell,
    Wait,
    Hold,
}

/// How urgently the action is advised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    Strong,
    Moderate,
    Neutral,
}

/// Sell/wait/hold advice attached to a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: RecommendedAction,
    pub priority: RecommendationPriority,
}

impl Recommendation {
    /// Advice as a function of forecast direction and confidence alone.
    ///
    /// A stable outlook never earns a strong priority.
    pub fn from_outlook(direction: MarketTrend, confidence: Confidence) -> Self {
        match (direction, confidence) {
            (MarketTrend::Up, Confidence::High) => Recommendation {
                action: RecommendedAction::Wait,
                priority: RecommendationPriority::Strong,
            },
            (MarketTrend::Up, _) => Recommendation {
                action: RecommendedAction::Wait,
                priority: RecommendationPriority::Moderate,
            },
            (MarketTrend::Down, Confidence::High) => Recommendation {
                action: RecommendedAction::Sell,
                priority: RecommendationPriority::Strong,
            },
            (MarketTrend::Down, _) => Recommendation {
                action: RecommendedAction::Sell,
                priority: RecommendationPriority::Moderate,
            },
            (MarketTrend::Stable, _) => Recommendation {
                action: RecommendedAction::Hold,
                priority: RecommendationPriority::Neutral,
            },
        }
    }
}

/// A 7-day price outlook for one commodity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Expected direction of movement over the window.
    pub direction: MarketTrend,
    /// Lower bound of the expected change, signed percent.
    pub expected_change_min: f64,
    /// Upper bound of the expected change, signed percent.
    pub expected_change_max: f64,
    pub confidence: Confidence,
    /// Expected price range, whole rupees per quintal.
    pub expected_price_min: i64,
    pub expected_price_max: i64,
    /// Always [`FORECAST_TIMEFRAME`].
    pub timeframe: String,
    /// Human-readable seasonal driver behind the outlook.
    pub seasonal_reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_table() {
        let r = Recommendation::from_outlook(MarketTrend::Up, Confidence::High);
        assert_eq!(r.action, RecommendedAction::Wait);
        assert_eq!(r.priority, RecommendationPriority::Strong);

        let r = Recommendation::from_outlook(MarketTrend::Up, Confidence::Medium);
        assert_eq!(r.action, RecommendedAction::Wait);
        assert_eq!(r.priority, RecommendationPriority::Moderate);

        let r = Recommendation::from_outlook(MarketTrend::Down, Confidence::High);
        assert_eq!(r.action, RecommendedAction::Sell);
        assert_eq!(r.priority, RecommendationPriority::Strong);

        let r = Recommendation::from_outlook(MarketTrend::Down, Confidence::Low);
        assert_eq!(r.action, RecommendedAction::Sell);
        assert_eq!(r.priority, RecommendationPriority::Moderate);
    }

    #[test]
    fn test_stable_is_never_strong() {
        for confidence in [Confidence::Low, Confidence::Medium, Confidence::High] {
            let r = Recommendation::from_outlook(MarketTrend::Stable, confidence);
            assert_eq!(r.action, RecommendedAction::Hold);
            assert_eq!(r.priority, RecommendationPriority::Neutral);
        }
    }

    #[test]
    fn test_wire_casing() {
        let r = Recommendation::from_outlook(MarketTrend::Down, Confidence::High);
        let json = serde_json::to_value(r).unwrap();
        assert_eq!(json["action"], "sell");
        assert_eq!(json["priority"], "strong");
    }
}
