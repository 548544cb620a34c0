//! Price Forecasting
//!
//! Combines the caller's stated current trend with the seasonal outlook
//! through a fixed decision table and turns the result into sell/wait/
//! hold advice. Advisory path: it never fails, and missing inputs fall
//! back to documented neutral defaults instead of erroring.

use kisan_agent_config::CommodityTable;
use kisan_agent_core::{
    Confidence, ForecastResult, MarketTrend, Recommendation, FORECAST_TIMEFRAME,
};

use crate::seasonal;
use crate::synthesis::round1;

/// Reference price used when the crop is unknown to the static table and
/// the caller supplied no usable current price.
const FALLBACK_REFERENCE_PRICE: f64 = 2000.0;

/// Seven-day advisory engine.
pub struct ForecastEngine {
    commodities: CommodityTable,
}

impl ForecastEngine {
    pub fn new(commodities: CommodityTable) -> Self {
        Self { commodities }
    }

    /// Forecast a commodity's price over the next week.
    ///
    /// `current_trend` defaults to stable when absent or unparseable;
    /// a missing or non-positive `current_price` falls back to the
    /// commodity's static base price.
    pub fn forecast(
        &self,
        crop: &str,
        current_price: Option<f64>,
        current_trend: Option<MarketTrend>,
        month: u32,
    ) -> (ForecastResult, Recommendation) {
        let seasonal = seasonal::assess(crop, month);
        let current_trend = current_trend.unwrap_or(MarketTrend::Stable);
        let reference_price = current_price
            .filter(|p| p.is_finite() && *p > 0.0)
            .or_else(|| self.commodities.find(crop).map(|c| c.base_price))
            .unwrap_or(FALLBACK_REFERENCE_PRICE);

        let (change_min, change_max, direction, confidence) =
            outlook(current_trend, seasonal.trend);

        let expected_price_min = (reference_price * (1.0 + change_min / 100.0)).round() as i64;
        let expected_price_max = (reference_price * (1.0 + change_max / 100.0)).round() as i64;

        let recommendation = Recommendation::from_outlook(direction, confidence);

        tracing::debug!(
            crop,
            current = current_trend.as_str(),
            seasonal = seasonal.trend.as_str(),
            direction = direction.as_str(),
            confidence = confidence.as_str(),
            "Forecast computed"
        );

        (
            ForecastResult {
                direction,
                expected_change_min: round1(change_min),
                expected_change_max: round1(change_max),
                confidence,
                expected_price_min,
                expected_price_max,
                timeframe: FORECAST_TIMEFRAME.to_string(),
                seasonal_reason: seasonal.reason,
            },
            recommendation,
        )
    }
}

/// The trend-combination table. Farmer-facing advice depends on these
/// exact ranges; do not tune them without updating the advisory copy.
fn outlook(current: MarketTrend, seasonal: MarketTrend) -> (f64, f64, MarketTrend, Confidence) {
    use MarketTrend::{Down, Stable, Up};
    match (current, seasonal) {
        (Up, Up) => (8.0, 15.0, Up, Confidence::High),
        (Up, Stable) => (3.0, 8.0, Up, Confidence::Medium),
        (Up, Down) => (-2.0, 5.0, Stable, Confidence::Low),
        (Down, Down) => (-10.0, -5.0, Down, Confidence::High),
        (Down, Up) => (-3.0, 5.0, Stable, Confidence::Low),
        (Down, Stable) => (-8.0, -2.0, Down, Confidence::Medium),
        (Stable, _) => (-3.0, 3.0, Stable, Confidence::Medium),
    }
}
