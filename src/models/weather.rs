use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions built from a single upstream response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: String,
    pub observed_at: DateTime<Utc>,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub wind_speed: f64, // km/h
    pub rain_chance: u8,
    pub pressure: f64, // hPa
    pub visibility: f64, // km
    pub dew_point: f64,
    pub description: String,
}

impl WeatherSnapshot {
    /// Snapshot with only the fields the insight rules read; everything else
    /// is derived or zeroed.
    #[cfg(test)]
    pub fn basic(location: impl Into<String>, temperature: f64, humidity: f64, rain_chance: u8) -> Self {
        Self {
            location: location.into(),
            observed_at: Utc::now(),
            temperature,
            feels_like: temperature,
            humidity,
            wind_speed: 0.0,
            rain_chance,
            pressure: 0.0,
            visibility: 0.0,
            dew_point: dew_point(temperature, humidity),
            description: String::new(),
        }
    }
}

/// Magnus approximation of the dew point in °C
pub fn dew_point(temp_c: f64, humidity_percent: f64) -> f64 {
    const A: f64 = 17.27;
    const B: f64 = 237.7;

    if humidity_percent <= 0.0 {
        return temp_c;
    }
    let rh = (humidity_percent / 100.0).min(1.0);
    let gamma = (A * temp_c) / (B + temp_c) + rh.ln();
    (B * gamma) / (A - gamma)
}

pub fn ms_to_kmh(speed_ms: f64) -> f64 {
    speed_ms * 3.6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dew_point_known_values() {
        // Saturated air: dew point equals air temperature
        assert!((dew_point(20.0, 100.0) - 20.0).abs() < 0.01);
        // 25°C at 60% RH is roughly 16.7°C
        assert!((dew_point(25.0, 60.0) - 16.7).abs() < 0.2);
        // Missing humidity falls back to the air temperature
        assert_eq!(dew_point(18.0, 0.0), 18.0);
    }

    #[test]
    fn dew_point_never_exceeds_temperature() {
        for humidity in [10.0, 35.0, 50.0, 75.0, 99.0] {
            assert!(dew_point(30.0, humidity) <= 30.0);
        }
    }

    #[test]
    fn wind_conversion() {
        assert!((ms_to_kmh(10.0) - 36.0).abs() < 0.001);
        assert_eq!(ms_to_kmh(0.0), 0.0);
    }
}
