//! Location Resolution
//!
//! Maps a free-text location ("Ludhiana, Punjab", "nashik") to exactly
//! one canonical state by walking an ordered keyword rule list. Never
//! fails: unknown input resolves to the configured default state.

use kisan_agent_config::{default_location_rules, LocationRule, MarketConfig};

/// Free-text location to canonical state resolver.
pub struct LocationResolver {
    rules: Vec<LocationRule>,
    default_state: String,
}

impl LocationResolver {
    /// Build from an explicit rule list. Rule order is the priority
    /// order: overlapping keywords are resolved by position, not by
    /// specificity.
    pub fn new(rules: Vec<LocationRule>, default_state: impl Into<String>) -> Self {
        Self {
            rules,
            default_state: default_state.into(),
        }
    }

    /// Built-in rules with the configured default state.
    pub fn from_config(market: &MarketConfig) -> Self {
        Self::new(default_location_rules(), market.default_state.clone())
    }

    /// Resolve a location string. First matching rule wins; no match
    /// yields the default state.
    pub fn resolve(&self, location: &str) -> &str {
        let needle = location.to_lowercase();
        for rule in &self.rules {
            if needle.contains(&rule.keyword) {
                return &rule.state;
            }
        }
        tracing::debug!(
            location,
            default = %self.default_state,
            "No location rule matched, using default state"
        );
        &self.default_state
    }
}
