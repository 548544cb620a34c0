//! External scraper tier
//!
//! Talks to the self-hosted mandi scraper bridge: one GET
//! `{base}/request?commodity=X&state=Y` per selected crop, each
//! returning a JSON array of records with stringly-typed price fields.
//! The first record is the most recent quote. Per-crop requests run
//! concurrently (bounded) and are join-and-filtered: a slow or failing
//! crop never blocks or cancels the others.

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde_json::Value;

use kisan_agent_config::{CommodityTable, MarketConfig, SourcesConfig};
use kisan_agent_core::{
    DataSource, EstimatedPrice, MarketDataSource, MarketTrend, SourceError,
};
use kisan_agent_market::selection;

/// Price fields accepted in scraper records, in probe order. The bridge
/// emits "Model Prize" with a string value.
const PRICE_FIELDS: &[&str] = &["Model Prize", "Modal Price", "modal_price"];

/// Client for the configured scraper bridge.
pub struct ScraperClient {
    client: Client,
    base_url: String,
    concurrency: usize,
    max_queries: usize,
    commodities: CommodityTable,
}

impl ScraperClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        concurrency: usize,
        max_queries: usize,
        commodities: CommodityTable,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            concurrency: concurrency.max(1),
            max_queries: max_queries.max(1),
            commodities,
        })
    }

    /// Build from settings; `None` when no scraper URL is configured.
    pub fn from_config(
        sources: &SourcesConfig,
        market: &MarketConfig,
        commodities: CommodityTable,
    ) -> Result<Option<Self>, SourceError> {
        let Some(ref url) = sources.scraper_url else {
            return Ok(None);
        };
        Self::new(
            url.clone(),
            Duration::from_secs(sources.scraper_timeout_secs),
            sources.scraper_concurrency,
            market.max_listing,
            commodities,
        )
        .map(Some)
    }

    async fn fetch_one(&self, state: &str, commodity: &str) -> Result<EstimatedPrice, SourceError> {
        let url = format!("{}/request", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("commodity", commodity), ("state", state)])
            .send()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Http(format!(
                "scraper returned {} for {}",
                response.status(),
                commodity
            )));
        }

        let records: Vec<Value> = response
            .json()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))?;

        // First record is the most recent quote.
        let record = records.first().ok_or(SourceError::NoData)?;
        let price = extract_price(record).ok_or_else(|| {
            SourceError::InvalidResponse(format!("no parseable price for {}", commodity))
        })?;

        let market_label = record
            .get("City")
            .and_then(Value::as_str)
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(state)
            .to_string();

        Ok(self.to_estimate(commodity, price, market_label))
    }

    /// Attach change and trend against the static baseline when the
    /// commodity is known; otherwise the change field stays absent
    /// rather than carrying a fabricated 0.
    fn to_estimate(&self, commodity: &str, price: f64, market: String) -> EstimatedPrice {
        let rounded = price.round() as i64;
        match self.commodities.find(commodity) {
            Some(reference) => {
                let change_pct =
                    ((price - reference.base_price) / reference.base_price * 1000.0).round() / 10.0;
                EstimatedPrice {
                    commodity: reference.name.clone(),
                    price: rounded,
                    msp: reference.msp.round() as i64,
                    trend: MarketTrend::from_change_pct(change_pct),
                    change_pct: Some(change_pct),
                    market,
                }
            }
            None => EstimatedPrice {
                commodity: commodity.to_string(),
                price: rounded,
                msp: 0,
                trend: MarketTrend::Stable,
                change_pct: None,
                market,
            },
        }
    }
}

/// Probe the known price fields; values may be JSON numbers or strings.
fn extract_price(record: &Value) -> Option<f64> {
    for field in PRICE_FIELDS {
        if let Some(value) = record.get(*field) {
            let parsed = match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
                _ => None,
            };
            if let Some(price) = parsed.filter(|p| p.is_finite() && *p > 0.0) {
                return Some(price);
            }
        }
    }
    None
}

#[async_trait]
impl MarketDataSource for ScraperClient {
    fn tag(&self) -> DataSource {
        DataSource::CustomApi
    }

    async fn fetch_prices(
        &self,
        state: &str,
        crops: &[String],
    ) -> Result<Vec<EstimatedPrice>, SourceError> {
        // Same selection as the synthesizer: farmer crops first, table
        // backfill, capped.
        let names: Vec<String> = selection::select(&self.commodities, crops, self.max_queries)
            .into_iter()
            .map(|c| c.name.clone())
            .collect();

        // Bounded fan-out; wait for all, keep successes, drop failures.
        let mut results: Vec<(usize, EstimatedPrice)> = stream::iter(
            names
                .into_iter()
                .enumerate()
                .map(|(index, name)| async move {
                    (index, self.fetch_one(state, &name).await)
                }),
        )
        .buffer_unordered(self.concurrency)
        .filter_map(|(index, result)| async move {
            match result {
                Ok(price) => Some((index, price)),
                Err(e) => {
                    tracing::debug!(error = %e, "Scraper crop query discarded");
                    None
                }
            }
        })
        .collect()
        .await;

        if results.is_empty() {
            return Err(SourceError::NoData);
        }

        // Restore query order so farmer crops stay in front.
        results.sort_by_key(|(index, _)| *index);
        Ok(results.into_iter().map(|(_, price)| price).collect())
    }
}
