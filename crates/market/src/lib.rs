//! Market engines for the kisan agent
//!
//! The five deterministic components behind market answers:
//! - Location resolution (free text -> canonical state)
//! - Seasonal factor assessment (commodity + month -> trend/adjustment)
//! - Crop selection (farmer crops first, table backfill, capped)
//! - Price synthesis (base x state x season x jitter, MSP floor)
//! - Forecasting (current trend x seasonal trend -> advisory)
//!
//! Everything here is a short-lived, stateless computation; the only
//! side effect is the jitter draw, isolated behind
//! [`kisan_agent_core::NoiseSource`].

pub mod forecast;
pub mod location;
pub mod noise;
pub mod seasonal;
pub mod selection;
pub mod synthesis;

pub use forecast::ForecastEngine;
pub use location::LocationResolver;
pub use noise::{FixedNoise, ThreadRngNoise};
pub use seasonal::{assess, SeasonalAssessment};
pub use synthesis::PriceSynthesizer;
