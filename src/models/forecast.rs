use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single time-stamped reading from the upstream multi-day forecast feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64, // km/h
    pub weather_code: u32,
    pub cloud_cover: f64,
    pub description: String,
}

/// One calendar day's aggregated forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    /// Temperature of the sample closest to local midday
    pub temperature: f64,
    pub min_temp: f64,
    pub max_temp: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub description: String,
    pub rain_chance: u8,
}

impl ForecastDay {
    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }
}

/// Calendar month key. Keyed with the year so a forecast crossing a year
/// boundary never merges two different Decembers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("Unknown")
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Per-month samples contributed by every forecast day in that month.
/// The three vectors always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPattern {
    pub month: YearMonth,
    temps: Vec<f64>,
    rain: Vec<f64>,
    humidity: Vec<f64>,
}

impl MonthlyPattern {
    pub fn new(month: YearMonth) -> Self {
        Self {
            month,
            temps: Vec::new(),
            rain: Vec::new(),
            humidity: Vec::new(),
        }
    }

    pub fn push(&mut self, day: &ForecastDay) {
        self.temps.push(day.temperature);
        self.rain.push(f64::from(day.rain_chance));
        self.humidity.push(day.humidity);
    }

    pub fn len(&self) -> usize {
        self.temps.len()
    }

    pub fn avg_temp(&self) -> Option<f64> {
        mean(&self.temps)
    }

    pub fn avg_rain(&self) -> Option<f64> {
        mean(&self.rain)
    }

    pub fn avg_humidity(&self) -> Option<f64> {
        mean(&self.humidity)
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
