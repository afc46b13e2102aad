use crate::models::{ForecastDay, ForecastSample, MonthlyPattern, YearMonth};
use chrono::{FixedOffset, NaiveDate, Timelike};
use std::collections::HashMap;

/// Planting window bands (inclusive)
const WINDOW_RAIN: std::ops::RangeInclusive<u8> = 40..=70;
const WINDOW_TEMP: std::ops::RangeInclusive<f64> = 20.0..=30.0;
const WINDOW_MIN_DAYS: u32 = 5;

/// Rain chance (0-100) from an OpenWeatherMap condition code and cloud cover.
/// A fixed lookup table, not a calibrated probability.
pub fn rain_chance(weather_code: u32, cloud_cover: f64) -> u8 {
    match weather_code {
        200..=299 => 90, // thunderstorm
        300..=399 => 70, // drizzle
        500..=599 => 85, // rain
        600..=699 => 80, // snow
        _ if cloud_cover > 80.0 => 60,
        _ if cloud_cover > 60.0 => 40,
        _ if cloud_cover > 30.0 => 20,
        _ => 10,
    }
}

/// Group raw samples into one `ForecastDay` per local calendar day, in the
/// order days are first encountered.
pub fn normalize(samples: &[ForecastSample], offset: FixedOffset) -> Vec<ForecastDay> {
    let mut order: Vec<NaiveDate> = Vec::new();
    let mut by_date: HashMap<NaiveDate, Vec<(u32, &ForecastSample)>> = HashMap::new();

    for sample in samples {
        let local = sample.timestamp.with_timezone(&offset);
        let date = local.date_naive();
        by_date
            .entry(date)
            .or_insert_with(|| {
                order.push(date);
                Vec::new()
            })
            .push((local.hour(), sample));
    }

    order
        .into_iter()
        .filter_map(|date| {
            let group = by_date.remove(&date)?;
            aggregate_day(date, &group)
        })
        .collect()
}

fn aggregate_day(date: NaiveDate, group: &[(u32, &ForecastSample)]) -> Option<ForecastDay> {
    // Strict comparison keeps the first sample on ties
    let mut representative = group.first()?;
    for entry in group.iter().skip(1) {
        if entry.0.abs_diff(12) < representative.0.abs_diff(12) {
            representative = entry;
        }
    }
    let rep = representative.1;

    let temps = group.iter().map(|(_, s)| s.temperature);
    let min_temp = temps.clone().fold(f64::INFINITY, f64::min);
    let max_temp = temps.fold(f64::NEG_INFINITY, f64::max);

    let count = group.len() as f64;
    let humidity = (group.iter().map(|(_, s)| s.humidity).sum::<f64>() / count).round();
    let wind_speed = (group.iter().map(|(_, s)| s.wind_speed).sum::<f64>() / count).round();

    Some(ForecastDay {
        date,
        temperature: rep.temperature,
        min_temp,
        max_temp,
        humidity,
        wind_speed,
        description: rep.description.clone(),
        rain_chance: rain_chance(rep.weather_code, rep.cloud_cover),
    })
}

/// Per-month aggregates, in first-seen month order
pub fn monthly_patterns(days: &[ForecastDay]) -> Vec<MonthlyPattern> {
    let mut patterns: Vec<MonthlyPattern> = Vec::new();

    for day in days {
        let month = day.month();
        match patterns.iter_mut().find(|p| p.month == month) {
            Some(pattern) => pattern.push(day),
            None => {
                let mut pattern = MonthlyPattern::new(month);
                pattern.push(day);
                patterns.push(pattern);
            }
        }
    }

    patterns
}

fn qualifies_for_window(day: &ForecastDay) -> bool {
    WINDOW_RAIN.contains(&day.rain_chance) && WINDOW_TEMP.contains(&day.temperature)
}

/// Months in which a run of at least five consecutive planting-friendly days
/// begins. Expects chronological input. A run is attributed to the month it
/// started in. Runs still shorter than five days when the list ends are not
/// reported.
pub fn planting_windows(days: &[ForecastDay]) -> Vec<YearMonth> {
    let mut windows: Vec<YearMonth> = Vec::new();
    let mut consecutive = 0u32;
    let mut run_start: Option<NaiveDate> = None;

    for day in days {
        if qualifies_for_window(day) {
            consecutive += 1;
            let start = *run_start.get_or_insert(day.date);

            if consecutive >= WINDOW_MIN_DAYS {
                let month = YearMonth::of(start);
                if !windows.contains(&month) {
                    windows.push(month);
                }
            }
        } else {
            consecutive = 0;
            run_start = None;
        }
    }

    windows
}
