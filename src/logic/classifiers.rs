use crate::models::{CropMatch, ForecastDay, MonthlyPattern, PestRisk, RainfallTrend};

/// Average rain chance below this is a drought trend
pub const DROUGHT_RAIN: f64 = 30.0;
/// Average rain chance above this is a heavy-rain trend
pub const HEAVY_RAIN: f64 = 70.0;

pub const PEST_HUMIDITY: f64 = 80.0;
pub const PEST_TEMP: f64 = 25.0;

pub fn average_rain_chance(days: &[ForecastDay]) -> Option<f64> {
    if days.is_empty() {
        return None;
    }
    let total: f64 = days.iter().map(|d| f64::from(d.rain_chance)).sum();
    Some(total / days.len() as f64)
}

pub fn rainfall_trend(days: &[ForecastDay]) -> RainfallTrend {
    match average_rain_chance(days) {
        Some(avg_rain) if avg_rain < DROUGHT_RAIN => RainfallTrend::Drought { avg_rain },
        Some(avg_rain) if avg_rain > HEAVY_RAIN => RainfallTrend::Heavy { avg_rain },
        _ => RainfallTrend::Normal,
    }
}

/// Share of pest-favourable signals across the forecast, 0-100.
/// Each day contributes up to two signals: humid and warm.
pub fn pest_risk_percent(days: &[ForecastDay]) -> Option<f64> {
    if days.is_empty() {
        return None;
    }
    let humid = days.iter().filter(|d| d.humidity > PEST_HUMIDITY).count();
    let warm = days.iter().filter(|d| d.temperature > PEST_TEMP).count();
    Some((humid + warm) as f64 / (2 * days.len()) as f64 * 100.0)
}

pub fn pest_risk(days: &[ForecastDay]) -> PestRisk {
    match pest_risk_percent(days) {
        Some(percent) if percent > 70.0 => PestRisk::High { percent },
        Some(percent) if percent > 40.0 => PestRisk::Medium { percent },
        _ => PestRisk::Low,
    }
}

/// Crops suited to a month's mean temperature and rain chance.
/// Rules are independent, so a month can match several.
pub fn crop_matches(pattern: &MonthlyPattern) -> Vec<CropMatch> {
    let (Some(temp), Some(rain)) = (pattern.avg_temp(), pattern.avg_rain()) else {
        return Vec::new();
    };

    let mut matches = Vec::new();
    if (20.0..=30.0).contains(&temp) && rain >= 50.0 {
        matches.push(CropMatch::MaizeVegetables);
    }
    if temp >= 25.0 && rain >= 60.0 {
        matches.push(CropMatch::Rice);
    }
    if (20.0..=35.0).contains(&temp) && rain >= 40.0 {
        matches.push(CropMatch::CassavaYam);
    }
    matches
}
