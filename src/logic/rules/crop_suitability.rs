use super::{InsightContext, InsightRule};
use crate::logic::classifiers::crop_matches;
use crate::models::{AgricultureInsight, InsightKind, Priority};

/// Crop suitability rule - one recommendation per forecast month whose mean
/// temperature and rain chance suit at least one staple crop
pub struct CropSuitabilityRule;

impl InsightRule for CropSuitabilityRule {
    fn id(&self) -> &'static str {
        "crop_suitability"
    }

    fn name(&self) -> &'static str {
        "Crop Suitability"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Vec<AgricultureInsight> {
        ctx.monthly
            .iter()
            .filter_map(|pattern| {
                let crops = crop_matches(pattern);
                if crops.is_empty() {
                    return None;
                }

                let names = crops.iter().map(|c| c.as_str()).collect::<Vec<_>>().join(", ");
                let month = pattern.month.name();

                Some(
                    AgricultureInsight::new(
                        InsightKind::Planting,
                        Priority::Low,
                        format!("{} Crop Recommendations", month),
                        format!(
                            "{} averages {:.1}°C, {:.0}% rain chance and {:.0}% humidity over {} forecast days.",
                            month,
                            pattern.avg_temp().unwrap_or_default(),
                            pattern.avg_rain().unwrap_or_default(),
                            pattern.avg_humidity().unwrap_or_default(),
                            pattern.len()
                        ),
                    )
                    .with_recommendation(format!("Conditions suit {}.", names)),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForecastDay, WeatherSnapshot};
    use chrono::NaiveDate;

    fn days(start: NaiveDate, count: usize, temp: f64, rain: u8) -> Vec<ForecastDay> {
        start
            .iter_days()
            .take(count)
            .map(|date| ForecastDay {
                date,
                temperature: temp,
                min_temp: temp,
                max_temp: temp,
                humidity: 60.0,
                wind_speed: 0.0,
                description: String::new(),
                rain_chance: rain,
            })
            .collect()
    }

    #[test]
    fn one_insight_per_matching_month_in_first_seen_order() {
        let mut forecast = days(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(), 3, 26.0, 65);
        forecast.extend(days(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(), 3, 33.0, 45));
        forecast.extend(days(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(), 3, 12.0, 20));

        let current = WeatherSnapshot::basic("Lilongwe", 24.0, 70.0, 50);
        let insights = CropSuitabilityRule.evaluate(&InsightContext::new(&current, &forecast));

        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].title, "August Crop Recommendations");
        assert_eq!(
            insights[0].recommendation,
            "Conditions suit maize and vegetables, rice, cassava and yam."
        );
        assert_eq!(insights[1].title, "July Crop Recommendations");
        assert_eq!(insights[1].recommendation, "Conditions suit cassava and yam.");
        assert!(insights.iter().all(|i| i.kind == InsightKind::Planting));
    }
}
