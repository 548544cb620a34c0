//! Data source orchestration
//!
//! Walks the live tiers in fixed priority order - custom scraper, then
//! the open-data API - and falls back to the price synthesizer, which
//! always answers. A tier that errors or comes back empty is abandoned
//! for this request (no retries) and the next tier is tried; tier
//! failures are logged and never surfaced to the caller.

use std::sync::Arc;

use chrono::{Datelike, Utc};

use kisan_agent_config::Settings;
use kisan_agent_core::{DataSource, MarketDataSource, MarketSnapshot, SourceError};
use kisan_agent_market::PriceSynthesizer;

use crate::agmarknet::OpenDataClient;
use crate::scraper::ScraperClient;

/// Fixed-priority market data chain.
pub struct MarketDataOrchestrator {
    tiers: Vec<Arc<dyn MarketDataSource>>,
    fallback: PriceSynthesizer,
}

impl MarketDataOrchestrator {
    /// Assemble from explicit tiers, for tests and custom wiring.
    pub fn new(tiers: Vec<Arc<dyn MarketDataSource>>, fallback: PriceSynthesizer) -> Self {
        Self { tiers, fallback }
    }

    /// Assemble the chain from settings. Unconfigured tiers are left
    /// out; the synthesizer is always present as the terminal tier.
    pub fn from_config(settings: &Settings) -> Result<Self, SourceError> {
        let fallback = PriceSynthesizer::from_config(&settings.market);
        let mut tiers: Vec<Arc<dyn MarketDataSource>> = Vec::new();

        if let Some(scraper) = ScraperClient::from_config(
            &settings.sources,
            &settings.market,
            fallback.commodities().clone(),
        )? {
            tiers.push(Arc::new(scraper));
        }

        if let Some(open_data) = OpenDataClient::from_config(
            &settings.sources,
            &settings.market,
            fallback.commodities().clone(),
        )? {
            tiers.push(Arc::new(open_data));
        }

        tracing::info!(
            live_tiers = tiers.len(),
            "Market data orchestrator assembled"
        );

        Ok(Self { tiers, fallback })
    }

    /// Produce a market snapshot for a resolved state.
    ///
    /// The first tier yielding at least one valid record wins and its
    /// tag goes on the snapshot; everything else falls through to the
    /// synthesizer, tagged as mock data.
    pub async fn snapshot(&self, state: &str, crops: &[String]) -> MarketSnapshot {
        for tier in &self.tiers {
            match tier.fetch_prices(state, crops).await {
                Ok(prices) if !prices.is_empty() => {
                    tracing::info!(
                        source = tier.tag().as_str(),
                        state,
                        count = prices.len(),
                        "Market data served from live tier"
                    );
                    return MarketSnapshot {
                        state: state.to_string(),
                        source: tier.tag(),
                        prices,
                    };
                }
                Ok(_) => {
                    tracing::warn!(
                        source = tier.tag().as_str(),
                        state,
                        "Tier returned no records, falling through"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        source = tier.tag().as_str(),
                        state,
                        error = %e,
                        "Tier unavailable, falling through"
                    );
                }
            }
        }

        let month = Utc::now().month();
        let prices = self.fallback.estimate(state, crops, month);
        MarketSnapshot {
            state: state.to_string(),
            source: DataSource::Mock,
            prices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kisan_agent_config::MarketConfig;
    use kisan_agent_core::{EstimatedPrice, MarketTrend};

    struct FailingSource(DataSource);

    #[async_trait]
    impl MarketDataSource for FailingSource {
        fn tag(&self) -> DataSource {
            self.0
        }

        async fn fetch_prices(
            &self,
            _state: &str,
            _crops: &[String],
        ) -> Result<Vec<EstimatedPrice>, SourceError> {
            Err(SourceError::Http("connection refused".to_string()))
        }
    }

    struct EmptySource(DataSource);

    #[async_trait]
    impl MarketDataSource for EmptySource {
        fn tag(&self) -> DataSource {
            self.0
        }

        async fn fetch_prices(
            &self,
            _state: &str,
            _crops: &[String],
        ) -> Result<Vec<EstimatedPrice>, SourceError> {
            Ok(Vec::new())
        }
    }

    struct StaticSource(DataSource, Vec<EstimatedPrice>);

    #[async_trait]
    impl MarketDataSource for StaticSource {
        fn tag(&self) -> DataSource {
            self.0
        }

        async fn fetch_prices(
            &self,
            _state: &str,
            _crops: &[String],
        ) -> Result<Vec<EstimatedPrice>, SourceError> {
            Ok(self.1.clone())
        }
    }

    fn sample_price() -> EstimatedPrice {
        EstimatedPrice {
            commodity: "Wheat".to_string(),
            price: 2600,
            msp: 2275,
            trend: MarketTrend::Stable,
            change_pct: Some(2.0),
            market: "Khanna".to_string(),
        }
    }

    fn fallback() -> PriceSynthesizer {
        PriceSynthesizer::from_config(&MarketConfig::default())
    }

    #[tokio::test]
    async fn test_all_tiers_down_falls_back_to_synthesizer() {
        let orchestrator = MarketDataOrchestrator::new(
            vec![
                Arc::new(FailingSource(DataSource::CustomApi)),
                Arc::new(EmptySource(DataSource::Agmarknet)),
            ],
            fallback(),
        );

        let snapshot = orchestrator.snapshot("Punjab", &[]).await;
        // Never mislabeled as a live source.
        assert_eq!(snapshot.source, DataSource::Mock);
        assert!(!snapshot.prices.is_empty());
        assert_eq!(snapshot.state, "Punjab");
    }

    #[tokio::test]
    async fn test_first_healthy_tier_wins() {
        let orchestrator = MarketDataOrchestrator::new(
            vec![
                Arc::new(FailingSource(DataSource::CustomApi)),
                Arc::new(StaticSource(DataSource::Agmarknet, vec![sample_price()])),
            ],
            fallback(),
        );

        let snapshot = orchestrator.snapshot("Punjab", &[]).await;
        assert_eq!(snapshot.source, DataSource::Agmarknet);
        assert_eq!(snapshot.prices.len(), 1);
        assert_eq!(snapshot.prices[0].commodity, "Wheat");
    }

    #[tokio::test]
    async fn test_priority_order_is_respected() {
        let orchestrator = MarketDataOrchestrator::new(
            vec![
                Arc::new(StaticSource(DataSource::CustomApi, vec![sample_price()])),
                Arc::new(StaticSource(DataSource::Agmarknet, vec![sample_price()])),
            ],
            fallback(),
        );

        let snapshot = orchestrator.snapshot("Punjab", &[]).await;
        assert_eq!(snapshot.source, DataSource::CustomApi);
    }

    #[tokio::test]
    async fn test_no_live_tiers_configured_is_always_mock() {
        let orchestrator = MarketDataOrchestrator::from_config(&Settings::default()).unwrap();
        let snapshot = orchestrator
            .snapshot("Maharashtra", &["Onion".to_string()])
            .await;
        assert_eq!(snapshot.source, DataSource::Mock);
        assert_eq!(snapshot.prices[0].commodity, "Onion");
        assert!(snapshot.prices.len() <= 8);
    }
}
