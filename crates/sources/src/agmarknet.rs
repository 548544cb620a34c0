//! Government open-data tier
//!
//! Queries the Agmarknet daily mandi price resource on data.gov.in with
//! a state filter, groups the returned records by commodity and takes
//! the median modal price per commodity. One request per snapshot.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use kisan_agent_config::{CommodityTable, MarketConfig, SourcesConfig};
use kisan_agent_core::{
    DataSource, EstimatedPrice, MarketDataSource, MarketTrend, SourceError,
};
use kisan_agent_market::selection::matches_name;

/// Client for the data.gov.in commodity price resource.
pub struct OpenDataClient {
    client: Client,
    base_url: String,
    api_key: String,
    record_limit: usize,
    max_listing: usize,
    commodities: CommodityTable,
}

#[derive(Debug, Deserialize)]
struct OpenDataResponse {
    #[serde(default)]
    records: Vec<OpenDataRecord>,
}

#[derive(Debug, Deserialize)]
struct OpenDataRecord {
    #[serde(default)]
    commodity: String,
    /// Modal price arrives as a string in most records.
    #[serde(default)]
    modal_price: Value,
    #[serde(default)]
    market: Option<String>,
}

impl OpenDataClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
        record_limit: usize,
        max_listing: usize,
        commodities: CommodityTable,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            record_limit: record_limit.max(1),
            max_listing: max_listing.max(1),
            commodities,
        })
    }

    /// Build from settings; `None` when no API key is configured.
    pub fn from_config(
        sources: &SourcesConfig,
        market: &MarketConfig,
        commodities: CommodityTable,
    ) -> Result<Option<Self>, SourceError> {
        let Some(ref key) = sources.agmarknet_api_key else {
            return Ok(None);
        };
        Self::new(
            sources.agmarknet_base_url.clone(),
            key.clone(),
            Duration::from_secs(sources.agmarknet_timeout_secs),
            sources.agmarknet_record_limit,
            market.max_listing,
            commodities,
        )
        .map(Some)
    }

    /// Group records by commodity (first-seen order) and reduce each
    /// group to its median modal price.
    fn group_and_reduce(&self, state: &str, records: Vec<OpenDataRecord>) -> Vec<EstimatedPrice> {
        let mut groups: Vec<(String, Option<String>, Vec<f64>)> = Vec::new();

        for record in records {
            let name = record.commodity.trim();
            if name.is_empty() {
                continue;
            }
            let Some(price) = parse_modal_price(&record.modal_price) else {
                continue;
            };
            match groups.iter().position(|(n, _, _)| n.eq_ignore_ascii_case(name)) {
                Some(index) => groups[index].2.push(price),
                None => groups.push((name.to_string(), record.market, vec![price])),
            }
        }

        groups
            .into_iter()
            .map(|(name, market, prices)| {
                let market = market
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| state.to_string());
                self.to_estimate(&name, median(prices), market)
            })
            .collect()
    }

    fn to_estimate(&self, commodity: &str, price: f64, market: String) -> EstimatedPrice {
        let rounded = price.round() as i64;
        match self.commodities.find(commodity) {
            Some(reference) => {
                let change_pct =
                    ((price - reference.base_price) / reference.base_price * 1000.0).round() / 10.0;
                EstimatedPrice {
                    commodity: commodity.to_string(),
                    price: rounded,
                    msp: reference.msp.round() as i64,
                    trend: MarketTrend::from_change_pct(change_pct),
                    change_pct: Some(change_pct),
                    market,
                }
            }
            // No static baseline: omit the change instead of faking 0%.
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

fn parse_modal_price(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|p| p.is_finite() && *p > 0.0)
}

/// Median of the collected modal prices.
fn median(mut prices: Vec<f64>) -> f64 {
    prices.sort_by(|a, b| a.partial_cmp(b).expect("prices are finite"));
    let mid = prices.len() / 2;
    if prices.len() % 2 == 1 {
        prices[mid]
    } else {
        (prices[mid - 1] + prices[mid]) / 2.0
    }
}

/// Farmer crops first, then the rest, truncated to the listing cap.
fn prioritize(mut prices: Vec<EstimatedPrice>, crops: &[String], cap: usize) -> Vec<EstimatedPrice> {
    prices.sort_by_key(|p| {
        let is_farmer_crop = crops.iter().any(|c| matches_name(&p.commodity, c));
        usize::from(!is_farmer_crop)
    });
    prices.truncate(cap);
    prices
}

#[async_trait]
impl MarketDataSource for OpenDataClient {
    fn tag(&self) -> DataSource {
        DataSource::Agmarknet
    }

    async fn fetch_prices(
        &self,
        state: &str,
        crops: &[String],
    ) -> Result<Vec<EstimatedPrice>, SourceError> {
        let limit = self.record_limit.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("api-key", self.api_key.as_str()),
                ("format", "json"),
                ("limit", limit.as_str()),
                ("filters[state]", state),
            ])
            .send()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Http(format!(
                "open-data API returned {}",
                response.status()
            )));
        }

        let body: OpenDataResponse = response
            .json()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))?;

        let prices = self.group_and_reduce(state, body.records);
        if prices.is_empty() {
            return Err(SourceError::NoData);
        }

        Ok(prioritize(prices, crops, self.max_listing))
    }
}
