//! Commodity reference table
//!
//! Static base prices (INR per quintal), minimum support prices and
//! volatility for the commodities the assistant covers. The table order
//! is part of the contract: listings backfill in table order after the
//! farmer's own crops.

use serde::{Deserialize, Serialize};

/// Static reference entry for one commodity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommodityBasePrice {
    /// Commodity name, the unique key of the table.
    pub name: String,
    /// Reference market price, INR per quintal.
    pub base_price: f64,
    /// Minimum support price, INR per quintal. 0 means no government
    /// floor (perishables are outside the procurement system).
    pub msp: f64,
    /// Fraction in (0, 1] governing day-to-day jitter amplitude.
    pub volatility: f64,
}

/// Ordered table of reference commodities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommodityTable {
    commodities: Vec<CommodityBasePrice>,
}

impl Default for CommodityTable {
    fn default() -> Self {
        Self {
            commodities: builtin_commodities(),
        }
    }
}

impl CommodityTable {
    /// Build a table from explicit entries (tests, overrides).
    pub fn new(commodities: Vec<CommodityBasePrice>) -> Self {
        Self { commodities }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommodityBasePrice> {
        self.commodities.iter()
    }

    pub fn len(&self) -> usize {
        self.commodities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commodities.is_empty()
    }

    /// Case-insensitive lookup, substring match in either direction, so
    /// "wheat" finds "Wheat" and "paddy" finds "Rice (Paddy)".
    pub fn find(&self, name: &str) -> Option<&CommodityBasePrice> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.commodities.iter().find(|c| {
            let listed = c.name.to_lowercase();
            listed.contains(&needle) || needle.contains(&listed)
        })
    }
}

/// Built-in reference data, approximate 2024-25 mandi levels.
///
/// Base prices are calibrated to sit far enough above MSP that the
/// support floor only engages under extreme synthetic conditions.
fn builtin_commodities() -> Vec<CommodityBasePrice> {
    fn entry(name: &str, base_price: f64, msp: f64, volatility: f64) -> CommodityBasePrice {
        CommodityBasePrice {
            name: name.to_string(),
            base_price,
            msp,
            volatility,
        }
    }

    vec![
        entry("Wheat", 2550.0, 2275.0, 0.05),
        entry("Rice (Paddy)", 2450.0, 2183.0, 0.05),
        entry("Maize", 2350.0, 2090.0, 0.06),
        entry("Cotton", 7600.0, 6620.0, 0.08),
        entry("Soybean", 5250.0, 4600.0, 0.08),
        entry("Mustard", 6000.0, 5450.0, 0.06),
        entry("Gram (Chana)", 6100.0, 5440.0, 0.06),
        entry("Groundnut", 7200.0, 6377.0, 0.06),
        entry("Sugarcane", 400.0, 340.0, 0.04),
        entry("Onion", 2500.0, 0.0, 0.25),
        entry("Potato", 1500.0, 0.0, 0.20),
        entry("Tomato", 2200.0, 0.0, 0.30),
    ]
}
