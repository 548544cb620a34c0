//! Prometheus metrics

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder. Call once at startup, before the
/// router starts serving.
pub fn init_metrics() -> Result<(), crate::ServerError> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| crate::ServerError::Internal(format!("Failed to install recorder: {}", e)))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| crate::ServerError::Internal("Metrics already initialized".to_string()))?;

    Ok(())
}

/// Render the metrics exposition for GET /metrics.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

/// Count a market-prices request, labelled by the tier that served it.
pub fn record_market_request(source: &str) {
    metrics::counter!("kisan_market_requests_total", "source" => source.to_string()).increment(1);
}

/// Count a forecast request, labelled by forecast direction.
pub fn record_forecast_request(direction: &str) {
    metrics::counter!("kisan_forecast_requests_total", "direction" => direction.to_string())
        .increment(1);
}
