//! HTTP Endpoints
//!
//! REST API for the market intelligence backend.

use std::time::Duration;

use axum::{
    extract::{Json, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use kisan_agent_core::{ForecastResult, MarketSnapshot, MarketTrend, Recommendation};

use crate::metrics::{metrics_handler, record_forecast_request, record_market_request};
use crate::state::AppState;
use crate::ServerError;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        &state.settings.server.cors_origins,
        state.settings.server.cors_enabled,
    );
    let request_timeout = Duration::from_secs(state.settings.server.request_timeout_secs);

    Router::new()
        // Market endpoints
        .route("/api/market/prices", post(market_prices))
        .route("/api/market/forecast", post(price_forecast))

        // Health check
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))

        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))

        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns permissive layer (for dev)
/// - If cors_origins is empty, defaults to localhost:3000 for safety
/// - Otherwise, uses the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    if origins.is_empty() {
        tracing::info!("No CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::error!("All configured CORS origins are invalid, falling back to localhost");
        return CorsLayer::new()
            .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(true)
}

/// Error envelope returned to the assistant frontend.
struct ApiError(ServerError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl From<ServerError> for ApiError {
    fn from(err: ServerError) -> Self {
        ApiError(err)
    }
}

/// Market prices request
#[derive(Debug, Deserialize)]
struct MarketPricesRequest {
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    crops: Vec<String>,
}

/// Market prices endpoint
async fn market_prices(
    State(state): State<AppState>,
    Json(request): Json<MarketPricesRequest>,
) -> Result<Json<MarketSnapshot>, ApiError> {
    // Missing location fails the request; it is never silently defaulted.
    let location = request
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .ok_or_else(|| ServerError::InvalidRequest("location is required".to_string()))?;

    let resolved = state.resolver.resolve(location);
    let snapshot = state.orchestrator.snapshot(resolved, &request.crops).await;

    record_market_request(snapshot.source.as_str());
    Ok(Json(snapshot))
}

/// Forecast request
#[derive(Debug, Deserialize)]
struct ForecastRequest {
    #[serde(default)]
    crop: Option<String>,
    /// Accepted for parity with the market endpoint; the forecast itself
    /// is location-independent.
    #[serde(default)]
    #[allow(dead_code)]
    location: Option<String>,
    #[serde(default)]
    current_price: Option<f64>,
    #[serde(default)]
    current_trend: Option<String>,
}

/// Forecast response
#[derive(Debug, Serialize)]
struct ForecastResponse {
    forecast: ForecastResult,
    recommendation: Recommendation,
}

/// Forecast endpoint
async fn price_forecast(
    State(state): State<AppState>,
    Json(request): Json<ForecastRequest>,
) -> Result<Json<ForecastResponse>, ApiError> {
    let crop = request
        .crop
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ServerError::InvalidRequest("crop is required".to_string()))?;

    // Advisory path: an unparseable trend degrades to the neutral
    // default instead of failing the request.
    let current_trend = request.current_trend.as_deref().and_then(MarketTrend::parse);
    let month = Utc::now().month();

    let (forecast, recommendation) =
        state
            .forecaster
            .forecast(crop, request.current_price, current_trend, month);

    record_forecast_request(forecast.direction.as_str());
    Ok(Json(ForecastResponse {
        forecast,
        recommendation,
    }))
}

/// Health check
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness check
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ready",
        "environment": format!("{:?}", state.settings.environment),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kisan_agent_config::Settings;

    #[test]
    fn test_router_creation() {
        let state = AppState::from_settings(Settings::default()).unwrap();
        let _ = create_router(state);
    }

    #[test]
    fn test_request_deserialization_tolerates_missing_fields() {
        let request: MarketPricesRequest = serde_json::from_str("{}").unwrap();
        assert!(request.location.is_none());
        assert!(request.crops.is_empty());

        let request: ForecastRequest = serde_json::from_str(
            r#"{"crop": "Wheat", "current_price": 2400, "current_trend": "up"}"#,
        )
        .unwrap();
        assert_eq!(request.crop.as_deref(), Some("Wheat"));
        assert_eq!(request.current_price, Some(2400.0));
    }
}
