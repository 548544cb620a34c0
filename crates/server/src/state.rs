//! Shared application state

use std::sync::Arc;

use kisan_agent_config::{CommodityTable, Settings};
use kisan_agent_core::SourceError;
use kisan_agent_market::{ForecastEngine, LocationResolver};
use kisan_agent_sources::MarketDataOrchestrator;

/// Immutable per-process state shared by all handlers. Every request is
/// an independent computation; nothing here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub resolver: Arc<LocationResolver>,
    pub orchestrator: Arc<MarketDataOrchestrator>,
    pub forecaster: Arc<ForecastEngine>,
}

impl AppState {
    pub fn from_settings(settings: Settings) -> Result<Self, SourceError> {
        let resolver = LocationResolver::from_config(&settings.market);
        let orchestrator = MarketDataOrchestrator::from_config(&settings)?;
        let forecaster = ForecastEngine::new(CommodityTable::default());

        Ok(Self {
            settings: Arc::new(settings),
            resolver: Arc::new(resolver),
            orchestrator: Arc::new(orchestrator),
            forecaster: Arc::new(forecaster),
        })
    }
}
