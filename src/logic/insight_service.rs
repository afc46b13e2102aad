use crate::config::Config;
use crate::datasources::{OpenWeatherMapClient, RawForecast};
use crate::error::{AgroCastError, Result};
use crate::logic::forecast::normalize;
use crate::logic::rules::generate_insights;
use crate::models::{AgricultureInsight, ForecastDay, WeatherSnapshot};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Everything produced by one fetch: current conditions, the per-day
/// forecast and the advisories derived from them
#[derive(Debug, Clone, Serialize)]
pub struct InsightReport {
    pub location: String,
    pub generated_at: DateTime<Utc>,
    pub current: WeatherSnapshot,
    pub forecast: Vec<ForecastDay>,
    pub insights: Vec<AgricultureInsight>,
}

#[derive(Clone)]
pub struct InsightService {
    client: Option<Arc<OpenWeatherMapClient>>,
}

impl InsightService {
    pub fn new(config: &Config) -> Self {
        let client = config.weather().map(|c| {
            tracing::info!("OpenWeatherMap client configured for forecast data");
            Arc::new(OpenWeatherMapClient::new(c.clone()))
        });

        if client.is_none() {
            tracing::warn!("OpenWeatherMap not configured - live insights are unavailable");
        }

        Self { client }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Configured default coordinates
    pub fn default_location(&self) -> Option<(f64, f64)> {
        self.client
            .as_ref()
            .map(|c| (c.config().latitude, c.config().longitude))
    }

    fn client(&self) -> Result<&OpenWeatherMapClient> {
        self.client.as_deref().ok_or_else(|| {
            AgroCastError::Config("OpenWeatherMap is not configured. Run `agrocast init`.".into())
        })
    }

    /// Current conditions plus normalized forecast days
    pub async fn weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<(WeatherSnapshot, Vec<ForecastDay>)> {
        let client = self.client()?;
        let (current, raw) = tokio::try_join!(
            client.fetch_current(latitude, longitude),
            client.fetch_forecast(latitude, longitude)
        )?;
        let days = normalize(&raw.samples, raw.timezone_offset);
        Ok((current, days))
    }

    /// Fetch weather for the coordinates and derive advisories
    pub async fn report(&self, latitude: f64, longitude: f64) -> Result<InsightReport> {
        let (current, days) = self.weather(latitude, longitude).await?;
        Ok(self.build_report(current, days))
    }

    /// Derive advisories from a recorded forecast without touching the network
    pub fn analyze_recorded(&self, current: WeatherSnapshot, raw: &RawForecast) -> InsightReport {
        let days = normalize(&raw.samples, raw.timezone_offset);
        self.build_report(current, days)
    }

    fn build_report(&self, current: WeatherSnapshot, days: Vec<ForecastDay>) -> InsightReport {
        let insights = generate_insights(&current, &days);
        tracing::info!(
            location = %current.location,
            days = days.len(),
            insights = insights.len(),
            "Insights generated"
        );

        InsightReport {
            location: current.location.clone(),
            generated_at: Utc::now(),
            current,
            forecast: days,
            insights,
        }
    }

    pub async fn check_connection(&self) -> bool {
        match &self.client {
            Some(client) => client.test_connection().await.unwrap_or(false),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForecastSample, InsightKind};
    use chrono::{Duration, FixedOffset, TimeZone};

    fn recorded(days: usize) -> RawForecast {
        let start = Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();
        let samples = (0..days * 8)
            .map(|i| ForecastSample {
                timestamp: start + Duration::hours(3 * i as i64),
                temperature: 25.0,
                humidity: 65.0,
                wind_speed: 7.2,
                weather_code: 803,
                cloud_cover: 70.0,
                description: "broken clouds".into(),
            })
            .collect();

        RawForecast {
            location: "Arusha, TZ".into(),
            timezone_offset: FixedOffset::east_opt(3 * 3600).unwrap(),
            samples,
        }
    }

    #[test]
    fn unconfigured_service() {
        let service = InsightService::new(&Config::default());
        assert!(!service.is_configured());
        assert!(service.default_location().is_none());
    }

    #[tokio::test]
    async fn unconfigured_report_is_a_config_error() {
        let service = InsightService::new(&Config::default());
        let err = service.report(0.0, 0.0).await.unwrap_err();
        assert!(matches!(err, AgroCastError::Config(_)));
        assert!(!service.check_connection().await);
    }

    #[test]
    fn analyze_recorded_forecast() {
        let service = InsightService::new(&Config::default());
        let raw = recorded(5);
        let current = raw.first_sample_snapshot().unwrap();

        let report = service.analyze_recorded(current, &raw);
        assert_eq!(report.location, "Arusha, TZ");
        // Samples start at 03:00 local, so five UTC days span six local days
        assert_eq!(report.forecast.len(), 6);
        assert!(report
            .insights
            .iter()
            .any(|i| i.kind == InsightKind::Planting));

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["insights"].is_array());
        assert_eq!(json["forecast"].as_array().unwrap().len(), 6);
    }
}
