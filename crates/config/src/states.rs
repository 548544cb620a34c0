//! State multipliers and location rules
//!
//! A sparse table of per-state commodity multipliers (below 1.0 in
//! producer regions, above 1.0 in consumer regions) and the ordered
//! keyword rules the location resolver walks. Rule order is part of the
//! contract: city keywords come before bare state keywords so the more
//! specific rule wins.

use serde::{Deserialize, Serialize};

/// Multipliers for the commodities a state materially produces or
/// consumes. Commodities not listed here use the neutral factor 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateFactors {
    pub state: String,
    pub factors: Vec<(String, f64)>,
}

/// Sparse state -> commodity -> multiplier table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateFactorTable {
    entries: Vec<StateFactors>,
}

impl Default for StateFactorTable {
    fn default() -> Self {
        Self {
            entries: builtin_state_factors(),
        }
    }
}

impl StateFactorTable {
    pub fn new(entries: Vec<StateFactors>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateFactors> {
        self.entries.iter()
    }

    /// Multiplier for a commodity in a state.
    ///
    /// The state is matched case-insensitively as a substring in either
    /// direction. Returns `Some(1.0)` when the state matched but the
    /// commodity is unlisted there, and `None` when no state matched at
    /// all (callers apply the configured default for unmodeled regions).
    pub fn factor_for(&self, state: &str, commodity: &str) -> Option<f64> {
        let state_needle = state.trim().to_lowercase();
        if state_needle.is_empty() {
            return None;
        }
        let entry = self.entries.iter().find(|e| {
            let listed = e.state.to_lowercase();
            listed.contains(&state_needle) || state_needle.contains(&listed)
        })?;

        let commodity_needle = commodity.trim().to_lowercase();
        let factor = entry
            .factors
            .iter()
            .find(|(name, _)| {
                let listed = name.to_lowercase();
                listed.contains(&commodity_needle) || commodity_needle.contains(&listed)
            })
            .map(|(_, f)| *f)
            .unwrap_or(1.0);
        Some(factor)
    }
}

/// One keyword -> state rule for the location resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRule {
    /// Lowercase keyword searched for in the free-text location.
    pub keyword: String,
    /// Canonical state name the keyword resolves to.
    pub state: String,
}

impl LocationRule {
    fn new(keyword: &str, state: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            state: state.to_string(),
        }
    }
}

/// Built-in ordered rules: mandi towns and cities first, then bare state
/// names. First match wins.
pub fn default_location_rules() -> Vec<LocationRule> {
    vec![
        // Cities and mandi towns
        LocationRule::new("ludhiana", "Punjab"),
        LocationRule::new("amritsar", "Punjab"),
        LocationRule::new("jalandhar", "Punjab"),
        LocationRule::new("karnal", "Haryana"),
        LocationRule::new("hisar", "Haryana"),
        LocationRule::new("nashik", "Maharashtra"),
        LocationRule::new("nagpur", "Maharashtra"),
        LocationRule::new("pune", "Maharashtra"),
        LocationRule::new("mumbai", "Maharashtra"),
        LocationRule::new("indore", "Madhya Pradesh"),
        LocationRule::new("bhopal", "Madhya Pradesh"),
        LocationRule::new("lucknow", "Uttar Pradesh"),
        LocationRule::new("kanpur", "Uttar Pradesh"),
        LocationRule::new("varanasi", "Uttar Pradesh"),
        LocationRule::new("agra", "Uttar Pradesh"),
        LocationRule::new("ahmedabad", "Gujarat"),
        LocationRule::new("rajkot", "Gujarat"),
        LocationRule::new("surat", "Gujarat"),
        LocationRule::new("jaipur", "Rajasthan"),
        LocationRule::new("jodhpur", "Rajasthan"),
        LocationRule::new("kolkata", "West Bengal"),
        LocationRule::new("bengaluru", "Karnataka"),
        LocationRule::new("bangalore", "Karnataka"),
        LocationRule::new("mysuru", "Karnataka"),
        LocationRule::new("chennai", "Tamil Nadu"),
        LocationRule::new("coimbatore", "Tamil Nadu"),
        LocationRule::new("hyderabad", "Telangana"),
        LocationRule::new("patna", "Bihar"),
        // Bare state names
        LocationRule::new("punjab", "Punjab"),
        LocationRule::new("haryana", "Haryana"),
        LocationRule::new("maharashtra", "Maharashtra"),
        LocationRule::new("madhya pradesh", "Madhya Pradesh"),
        LocationRule::new("uttar pradesh", "Uttar Pradesh"),
        LocationRule::new("gujarat", "Gujarat"),
        LocationRule::new("rajasthan", "Rajasthan"),
        LocationRule::new("west bengal", "West Bengal"),
        LocationRule::new("karnataka", "Karnataka"),
        LocationRule::new("tamil nadu", "Tamil Nadu"),
        LocationRule::new("andhra pradesh", "Andhra Pradesh"),
        LocationRule::new("telangana", "Telangana"),
        LocationRule::new("bihar", "Bihar"),
    ]
}

/// Built-in multipliers for the major producer and consumer states.
fn builtin_state_factors() -> Vec<StateFactors> {
    fn entry(state: &str, factors: &[(&str, f64)]) -> StateFactors {
        StateFactors {
            state: state.to_string(),
            factors: factors
                .iter()
                .map(|(name, f)| (name.to_string(), *f))
                .collect(),
        }
    }

    vec![
        entry(
            "Punjab",
            &[("Wheat", 0.95), ("Rice (Paddy)", 0.95), ("Maize", 0.97)],
        ),
        entry(
            "Haryana",
            &[("Wheat", 0.95), ("Rice (Paddy)", 0.96), ("Mustard", 0.97)],
        ),
        entry(
            "Uttar Pradesh",
            &[("Wheat", 0.97), ("Sugarcane", 0.95), ("Potato", 0.85)],
        ),
        entry(
            "Madhya Pradesh",
            &[("Wheat", 0.96), ("Soybean", 0.95), ("Gram (Chana)", 0.95)],
        ),
        entry(
            "Maharashtra",
            &[
                ("Onion", 0.85),
                ("Cotton", 0.96),
                ("Soybean", 0.96),
                ("Sugarcane", 0.97),
                ("Wheat", 1.04),
            ],
        ),
        entry("Gujarat", &[("Cotton", 0.95), ("Groundnut", 0.95)]),
        entry("Rajasthan", &[("Mustard", 0.97), ("Gram (Chana)", 0.96)]),
        entry(
            "West Bengal",
            &[("Rice (Paddy)", 0.95), ("Potato", 0.90), ("Wheat", 1.06)],
        ),
        entry(
            "Karnataka",
            &[("Maize", 0.95), ("Tomato", 0.90), ("Onion", 1.05)],
        ),
        entry(
            "Tamil Nadu",
            &[("Rice (Paddy)", 0.96), ("Tomato", 0.95), ("Wheat", 1.08)],
        ),
        entry(
            "Andhra Pradesh",
            &[("Rice (Paddy)", 0.95), ("Tomato", 0.92)],
        ),
        entry("Bihar", &[("Maize", 0.95), ("Potato", 0.88)]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_for_matched_state_and_commodity() {
        let table = StateFactorTable::default();
        assert_eq!(table.factor_for("Punjab", "Wheat"), Some(0.95));
        assert_eq!(table.factor_for("Maharashtra", "Onion"), Some(0.85));
    }

    #[test]
    fn test_factor_for_is_case_insensitive_substring() {
        let table = StateFactorTable::default();
        // Resolved state embedded in a longer string still matches.
        assert_eq!(table.factor_for("punjab region", "wheat"), Some(0.95));
        assert_eq!(table.factor_for("PUNJAB", "rice"), Some(0.95));
    }

    #[test]
    fn test_unlisted_commodity_in_matched_state_is_neutral() {
        let table = StateFactorTable::default();
        assert_eq!(table.factor_for("Punjab", "Tomato"), Some(1.0));
    }

    #[test]
    fn test_unmatched_state_returns_none() {
        let table = StateFactorTable::default();
        assert_eq!(table.factor_for("Sikkim", "Wheat"), None);
        assert_eq!(table.factor_for("", "Wheat"), None);
    }

    #[test]
    fn test_city_rules_come_before_state_rules() {
        let rules = default_location_rules();
        let first_state_rule = rules
            .iter()
            .position(|r| r.keyword == "punjab")
            .expect("state rule present");
        let city_rule = rules
            .iter()
            .position(|r| r.keyword == "ludhiana")
            .expect("city rule present");
        assert!(city_rule < first_state_rule);
    }
}
