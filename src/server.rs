//! Weather proxy: serves normalized forecasts and advisories over HTTP so
//! browser clients never see the upstream API key.

use crate::error::AgroCastError;
use crate::logic::{InsightReport, InsightService};
use crate::models::{ForecastDay, WeatherSnapshot};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub service: InsightService,
}

/// Raw query strings; parsed by `resolve_location` so malformed numbers get
/// the JSON error body
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub weather: &'static str,
}

#[derive(Serialize)]
pub struct WeatherResponse {
    pub current: WeatherSnapshot,
    pub forecast: Vec<ForecastDay>,
}

pub struct ApiError(AgroCastError);

impl From<AgroCastError> for ApiError {
    fn from(err: AgroCastError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AgroCastError::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
            AgroCastError::InvalidData(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::BAD_GATEWAY,
        };
        tracing::warn!(status = %status, error = %self.0, "Request failed");
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/weather", get(weather))
        .route("/api/insights", get(insights))
        .layer(cors)
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        weather: if state.service.is_configured() {
            "configured"
        } else {
            "unconfigured"
        },
    })
}

fn parse_coordinate(name: &str, value: Option<&str>) -> Result<Option<f64>, ApiError> {
    let Some(value) = value else {
        return Ok(None);
    };
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(Some(parsed)),
        _ => Err(AgroCastError::InvalidData(format!(
            "{} must be a number, got '{}'",
            name, value
        ))
        .into()),
    }
}

fn resolve_location(state: &AppState, query: &LocationQuery) -> Result<(f64, f64), ApiError> {
    let lat = parse_coordinate("lat", query.lat.as_deref())?;
    let lon = parse_coordinate("lon", query.lon.as_deref())?;

    match (lat, lon) {
        (Some(lat), Some(lon)) => {
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                return Err(AgroCastError::InvalidData(format!(
                    "coordinates out of range: {}, {}",
                    lat, lon
                ))
                .into());
            }
            Ok((lat, lon))
        }
        (None, None) => state.service.default_location().ok_or_else(|| {
            AgroCastError::Config("OpenWeatherMap is not configured".into()).into()
        }),
        _ => Err(AgroCastError::InvalidData("lat and lon must be given together".into()).into()),
    }
}

async fn weather(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<WeatherResponse>, ApiError> {
    let (lat, lon) = resolve_location(&state, &query)?;
    let (current, forecast) = state.service.weather(lat, lon).await?;
    Ok(Json(WeatherResponse { current, forecast }))
}

async fn insights(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<InsightReport>, ApiError> {
    let (lat, lon) = resolve_location(&state, &query)?;
    let report = state.service.report(lat, lon).await?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState {
            service: InsightService::new(&Config::default()),
        })
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_unconfigured() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["weather"], "unconfigured");
    }

    #[tokio::test]
    async fn insights_unavailable_without_config() {
        let (status, body) = get_json("/api/insights").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"].as_str().unwrap().contains("not configured"));

        let (status, _) = get_json("/api/weather?lat=1.0&lon=2.0").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn rejects_partial_or_invalid_coordinates() {
        let (status, _) = get_json("/api/insights?lat=1.0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get_json("/api/insights?lat=120.0&lon=2.0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_numeric_coordinates_get_json_error() {
        let (status, body) = get_json("/api/insights?lat=abc&lon=1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("lat must be a number"));

        let (status, body) = get_json("/api/weather?lat=1.0&lon=NaN").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("lon"));
    }
}
