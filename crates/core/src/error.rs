//! Error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for market intelligence operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A required input is missing or malformed. Fails the whole request;
    /// required fields are never silently defaulted.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Failure of a live market-data tier.
///
/// These never reach the caller on their own: the orchestrator treats any
/// of them as "tier unavailable" and falls through to the next tier.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The tier has no endpoint/key configured and is skipped.
    #[error("source not configured")]
    NotConfigured,

    #[error("source configuration error: {0}")]
    Configuration(String),

    #[error("http error: {0}")]
    Http(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Well-formed but empty result set; treated the same as a failure.
    #[error("no usable records")]
    NoData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_wraps_into_error() {
        let err: Error = SourceError::NoData.into();
        assert!(matches!(err, Error::Source(SourceError::NoData)));
    }

    #[test]
    fn test_error_display() {
        let err = Error::InvalidRequest("location is required".to_string());
        assert_eq!(err.to_string(), "invalid request: location is required");
    }
}
