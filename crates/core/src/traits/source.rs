//! Market data source trait

use async_trait::async_trait;

use crate::error::SourceError;
use crate::market::{DataSource, EstimatedPrice};

/// One tier of market price data.
///
/// Implementations must be stateless between requests; each fetch is an
/// independent computation against the current market.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Tag identifying this tier in responses. Must name the tier the
    /// data actually came from.
    fn tag(&self) -> DataSource;

    /// Fetch prices for a resolved state, farmer crops first.
    ///
    /// An empty result set must be reported as [`SourceError::NoData`]
    /// so the orchestrator can fall through to the next tier.
    async fn fetch_prices(
        &self,
        state: &str,
        crops: &[String],
    ) -> Result<Vec<EstimatedPrice>, SourceError>;
}
