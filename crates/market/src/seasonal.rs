//! Seasonal Factor Assessment
//!
//! Hand-authored harvest-cycle tables: rabi and kharif crops share their
//! season's curve, the big perishables each get their own monthly curve.
//! The month-range boundaries are a design contract - changing them
//! changes farmer-facing advice materially.

use kisan_agent_core::MarketTrend;

/// Month-driven supply/demand assessment for one commodity.
#[derive(Debug, Clone)]
pub struct SeasonalAssessment {
    pub trend: MarketTrend,
    /// Signed fraction; +0.50 means prices run 50% above base levels.
    pub adjustment: f64,
    /// Human-readable driver, surfaced in forecasts.
    pub reason: String,
}

impl SeasonalAssessment {
    /// Multiplicative form applied to prices.
    pub fn multiplier(&self) -> f64 {
        1.0 + self.adjustment
    }

    fn up(adjustment: f64, reason: &str) -> Self {
        Self {
            trend: MarketTrend::Up,
            adjustment,
            reason: reason.to_string(),
        }
    }

    fn down(adjustment: f64, reason: &str) -> Self {
        Self {
            trend: MarketTrend::Down,
            adjustment,
            reason: reason.to_string(),
        }
    }

    fn stable(adjustment: f64, reason: &str) -> Self {
        Self {
            trend: MarketTrend::Stable,
            adjustment,
            reason: reason.to_string(),
        }
    }

    /// Neutral default for uncategorized commodities and out-of-range
    /// months.
    pub fn neutral() -> Self {
        Self::stable(0.02, "Normal market conditions")
    }
}

/// Harvest-cycle category of a commodity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeasonalCategory {
    Rabi,
    Kharif,
    Onion,
    Potato,
    Tomato,
    Uncategorized,
}

const RABI_CROPS: &[&str] = &["wheat", "mustard", "gram", "chana", "barley", "masur"];
const KHARIF_CROPS: &[&str] = &[
    "rice",
    "paddy",
    "maize",
    "cotton",
    "soybean",
    "groundnut",
    "bajra",
];

fn categorize(commodity: &str) -> SeasonalCategory {
    let name = commodity.trim().to_lowercase();
    if name.is_empty() {
        return SeasonalCategory::Uncategorized;
    }
    if name.contains("onion") {
        SeasonalCategory::Onion
    } else if name.contains("potato") {
        SeasonalCategory::Potato
    } else if name.contains("tomato") {
        SeasonalCategory::Tomato
    } else if RABI_CROPS.iter().any(|c| name.contains(c)) {
        SeasonalCategory::Rabi
    } else if KHARIF_CROPS.iter().any(|c| name.contains(c)) {
        SeasonalCategory::Kharif
    } else {
        SeasonalCategory::Uncategorized
    }
}

/// Assess a commodity for a calendar month (1-12).
///
/// Deterministic lookup; out-of-range months get the neutral default.
pub fn assess(commodity: &str, month: u32) -> SeasonalAssessment {
    match categorize(commodity) {
        SeasonalCategory::Rabi => match month {
            11 | 12 | 1 | 2 => {
                SeasonalAssessment::up(0.06, "Pre-harvest scarcity as old rabi stock runs down")
            }
            3..=5 => SeasonalAssessment::down(-0.08, "Rabi harvest arrivals flooding mandis"),
            6..=10 => SeasonalAssessment::neutral(),
            _ => SeasonalAssessment::neutral(),
        },
        SeasonalCategory::Kharif => match month {
            7..=9 => SeasonalAssessment::up(0.08, "Pre-harvest scarcity before kharif arrivals"),
            10..=12 => SeasonalAssessment::down(-0.08, "Kharif harvest arrivals flooding mandis"),
            1..=6 => SeasonalAssessment::neutral(),
            _ => SeasonalAssessment::neutral(),
        },
        SeasonalCategory::Onion => match month {
            9..=12 => {
                SeasonalAssessment::up(0.50, "Onion shortage season, stored stock exhausted")
            }
            1..=3 => SeasonalAssessment::down(-0.15, "Fresh rabi onion arrivals easing prices"),
            4..=8 => SeasonalAssessment::stable(0.05, "Steady supply from storage"),
            _ => SeasonalAssessment::neutral(),
        },
        SeasonalCategory::Potato => match month {
            1..=3 => SeasonalAssessment::down(-0.20, "Cold-belt potato harvest glut"),
            10..=12 => SeasonalAssessment::up(0.15, "Cold-store potato stock depleting"),
            4..=9 => SeasonalAssessment::neutral(),
            _ => SeasonalAssessment::neutral(),
        },
        SeasonalCategory::Tomato => match month {
            6..=9 => SeasonalAssessment::up(0.30, "Monsoon disruption in tomato supply"),
            12 | 1 | 2 => SeasonalAssessment::down(-0.20, "Winter tomato glut"),
            3..=5 | 10 | 11 => SeasonalAssessment::neutral(),
            _ => SeasonalAssessment::neutral(),
        },
        SeasonalCategory::Uncategorized => SeasonalAssessment::neutral(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rabi_cycle_boundaries() {
        // Pre-harvest high through winter.
        for month in [11, 12, 1, 2] {
            let a = assess("Wheat", month);
            assert_eq!(a.trend, MarketTrend::Up, "month {}", month);
            assert!((a.adjustment - 0.06).abs() < f64::EPSILON);
        }
        // Harvest glut through spring.
        for month in 3..=5 {
            let a = assess("Mustard", month);
            assert_eq!(a.trend, MarketTrend::Down, "month {}", month);
            assert!((a.adjustment + 0.08).abs() < f64::EPSILON);
        }
        // Quiet months.
        for month in 6..=10 {
            assert_eq!(assess("Gram (Chana)", month).trend, MarketTrend::Stable);
        }
    }

    #[test]
    fn test_kharif_cycle_boundaries() {
        for month in 7..=9 {
            let a = assess("Rice (Paddy)", month);
            assert_eq!(a.trend, MarketTrend::Up, "month {}", month);
            assert!((a.adjustment - 0.08).abs() < f64::EPSILON);
        }
        for month in 10..=12 {
            let a = assess("Cotton", month);
            assert_eq!(a.trend, MarketTrend::Down, "month {}", month);
        }
        for month in 1..=6 {
            assert_eq!(assess("Soybean", month).trend, MarketTrend::Stable);
        }
    }

    #[test]
    fn test_onion_crisis_season() {
        for month in 9..=12 {
            let a = assess("Onion", month);
            assert_eq!(a.trend, MarketTrend::Up, "month {}", month);
            assert!((a.adjustment - 0.50).abs() < f64::EPSILON);
            assert!((a.multiplier() - 1.5).abs() < f64::EPSILON);
        }
        for month in 1..=3 {
            assert_eq!(assess("Onion", month).trend, MarketTrend::Down);
        }
    }

    #[test]
    fn test_category_matching_is_loose() {
        // Substring matching catches qualified names from live sources.
        assert_eq!(assess("Basmati Rice", 8).trend, MarketTrend::Up);
        assert_eq!(assess("red onion", 10).trend, MarketTrend::Up);
    }

    #[test]
    fn test_uncategorized_and_bad_months_are_neutral() {
        let a = assess("Turmeric", 6);
        assert_eq!(a.trend, MarketTrend::Stable);
        assert!((a.adjustment - 0.02).abs() < f64::EPSILON);
        assert_eq!(a.reason, "Normal market conditions");

        // Out-of-range month never panics.
        assert_eq!(assess("Wheat", 0).trend, MarketTrend::Stable);
        assert_eq!(assess("Wheat", 13).trend, MarketTrend::Stable);
    }
}
