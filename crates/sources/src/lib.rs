//! Live market data tiers for the kisan agent
//!
//! Two optional live tiers and the orchestrator that walks them:
//! - `scraper`: self-hosted mandi scraper bridge, queried per crop
//! - `agmarknet`: government open-data daily price resource
//! - `orchestrator`: fixed-priority fallback chain ending in the
//!   price synthesizer, which always answers
//!
//! Tier failures stay inside this crate; callers only ever see a
//! successful snapshot with a truthful source tag.

pub mod agmarknet;
pub mod orchestrator;
pub mod scraper;

pub use agmarknet::OpenDataClient;
pub use orchestrator::MarketDataOrchestrator;
pub use scraper::ScraperClient;
