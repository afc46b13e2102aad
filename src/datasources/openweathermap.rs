use crate::config::OpenWeatherMapConfig;
use crate::error::{AgroCastError, Result};
use crate::logic::forecast::rain_chance;
use crate::models::{dew_point, ms_to_kmh, ForecastSample, WeatherSnapshot};
use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

/// Forecast samples as delivered, before grouping into days
#[derive(Debug, Clone)]
pub struct RawForecast {
    pub location: String,
    pub timezone_offset: FixedOffset,
    pub samples: Vec<ForecastSample>,
}

impl RawForecast {
    /// Build a current-conditions snapshot from the first sample, for
    /// recorded forecasts that come without a matching current reading
    pub fn first_sample_snapshot(&self) -> Option<WeatherSnapshot> {
        let first = self.samples.first()?;
        Some(WeatherSnapshot {
            location: self.location.clone(),
            observed_at: first.timestamp,
            temperature: first.temperature,
            feels_like: first.temperature,
            humidity: first.humidity,
            wind_speed: first.wind_speed,
            rain_chance: rain_chance(first.weather_code, first.cloud_cover),
            pressure: 0.0,
            visibility: 0.0,
            dew_point: dew_point(first.temperature, first.humidity),
            description: first.description.clone(),
        })
    }
}

// OpenWeatherMap API response structures. Missing or null fields coerce to
// their zero value.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    list: Vec<OwmForecastItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    city: OwmCity,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwmForecastItem {
    #[serde(deserialize_with = "null_as_default")]
    dt: i64,
    #[serde(deserialize_with = "null_as_default")]
    main: OwmMain,
    #[serde(deserialize_with = "null_as_default")]
    weather: Vec<OwmWeather>,
    #[serde(deserialize_with = "null_as_default")]
    clouds: OwmClouds,
    #[serde(deserialize_with = "null_as_default")]
    wind: OwmWind,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwmCurrentResponse {
    #[serde(deserialize_with = "null_as_default")]
    dt: i64,
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    #[serde(deserialize_with = "null_as_default")]
    main: OwmMain,
    #[serde(deserialize_with = "null_as_default")]
    weather: Vec<OwmWeather>,
    #[serde(deserialize_with = "null_as_default")]
    clouds: OwmClouds,
    #[serde(deserialize_with = "null_as_default")]
    wind: OwmWind,
    #[serde(deserialize_with = "null_as_default")]
    visibility: f64, // metres
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwmMain {
    #[serde(deserialize_with = "null_as_default")]
    temp: f64,
    #[serde(deserialize_with = "null_as_default")]
    feels_like: f64,
    #[serde(deserialize_with = "null_as_default")]
    humidity: f64,
    #[serde(deserialize_with = "null_as_default")]
    pressure: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwmWeather {
    #[serde(deserialize_with = "null_as_default")]
    id: u32,
    #[serde(deserialize_with = "null_as_default")]
    description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwmClouds {
    #[serde(deserialize_with = "null_as_default")]
    all: f64, // cloudiness percentage
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwmWind {
    #[serde(deserialize_with = "null_as_default")]
    speed: f64, // m/s with metric units
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwmCity {
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    #[serde(deserialize_with = "null_as_default")]
    country: String,
    #[serde(deserialize_with = "null_as_default")]
    timezone: i32, // seconds east of UTC
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &OpenWeatherMapConfig {
        &self.config
    }

    /// Fetch current conditions
    pub async fn fetch_current(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot> {
        let body = self.get("weather", latitude, longitude).await?;
        parse_current(&body)
    }

    /// Fetch the 5-day/3-hour forecast
    pub async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<RawForecast> {
        let body = self.get("forecast", latitude, longitude).await?;
        let forecast = parse_forecast(&body)?;
        tracing::debug!(
            location = %forecast.location,
            samples = forecast.samples.len(),
            "Forecast fetched"
        );
        Ok(forecast)
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self) -> Result<bool> {
        let url = self.url("weather", self.config.latitude, self.config.longitude);

        let response =
            self.client.get(&url).send().await.map_err(|e| {
                AgroCastError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        Ok(response.status().is_success())
    }

    fn url(&self, endpoint: &str, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/{}?lat={}&lon={}&appid={}&units=metric",
            API_BASE_URL, endpoint, latitude, longitude, self.config.api_key
        )
    }

    async fn get(&self, endpoint: &str, latitude: f64, longitude: f64) -> Result<String> {
        let url = self.url(endpoint, latitude, longitude);

        let response =
            self.client.get(&url).send().await.map_err(|e| {
                AgroCastError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgroCastError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        Ok(response.text().await?)
    }
}

/// Parse a `/forecast` response body
pub fn parse_forecast(body: &str) -> Result<RawForecast> {
    let response: OwmForecastResponse = serde_json::from_str(body)?;

    let timezone_offset = FixedOffset::east_opt(response.city.timezone).ok_or_else(|| {
        AgroCastError::InvalidData(format!("timezone offset {} out of range", response.city.timezone))
    })?;

    let location = if response.city.country.is_empty() {
        response.city.name
    } else {
        format!("{}, {}", response.city.name, response.city.country)
    };

    let samples = response
        .list
        .iter()
        .filter_map(|item| {
            let timestamp = (item.dt > 0)
                .then(|| DateTime::from_timestamp(item.dt, 0))
                .flatten();
            let Some(timestamp) = timestamp else {
                tracing::warn!(dt = item.dt, "Skipping forecast item with invalid timestamp");
                return None;
            };
            let weather = item.weather.first();
            Some(ForecastSample {
                timestamp,
                temperature: item.main.temp,
                humidity: item.main.humidity,
                wind_speed: ms_to_kmh(item.wind.speed),
                weather_code: weather.map(|w| w.id).unwrap_or(0),
                cloud_cover: item.clouds.all,
                description: weather.map(|w| w.description.clone()).unwrap_or_default(),
            })
        })
        .collect();

    Ok(RawForecast {
        location,
        timezone_offset,
        samples,
    })
}

/// Parse a `/weather` response body
pub fn parse_current(body: &str) -> Result<WeatherSnapshot> {
    let response: OwmCurrentResponse = serde_json::from_str(body)?;
    let weather = response.weather.first();
    let main = &response.main;

    Ok(WeatherSnapshot {
        location: response.name,
        observed_at: DateTime::from_timestamp(response.dt, 0).unwrap_or_else(Utc::now),
        temperature: main.temp,
        feels_like: main.feels_like,
        humidity: main.humidity,
        wind_speed: ms_to_kmh(response.wind.speed),
        rain_chance: rain_chance(weather.map(|w| w.id).unwrap_or(0), response.clouds.all),
        pressure: main.pressure,
        visibility: response.visibility / 1000.0,
        dew_point: dew_point(main.temp, main.humidity),
        description: weather.map(|w| w.description.clone()).unwrap_or_default(),
    })
}
