use super::{InsightContext, InsightRule};
use crate::logic::classifiers::rainfall_trend;
use crate::models::{AgricultureInsight, InsightKind, Priority, RainfallTrend};

/// Rainfall trend rule - drought or heavy rain across the whole forecast
///
/// Average rain chance:
/// - below 30%: drought, high-priority water conservation advice
/// - above 70%: heavy rain, drainage and nutrient-loss advice
pub struct RainfallTrendRule;

impl InsightRule for RainfallTrendRule {
    fn id(&self) -> &'static str {
        "rainfall_trend"
    }

    fn name(&self) -> &'static str {
        "Rainfall Trend"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Vec<AgricultureInsight> {
        let trend = rainfall_trend(ctx.days);
        tracing::debug!(trend = trend.as_str(), days = ctx.days.len(), "Rainfall trend");

        let insight = match trend {
            RainfallTrend::Normal => return Vec::new(),
            RainfallTrend::Drought { avg_rain } => AgricultureInsight::new(
                InsightKind::Irrigation,
                Priority::High,
                "Drought Conditions Expected",
                format!(
                    "Average rain chance over the next {} days is only {:.0}%.",
                    ctx.days.len(),
                    avg_rain
                ),
            )
            .with_recommendation(
                "Conserve water: set up drip irrigation, mulch beds and favour \
                 drought-tolerant varieties such as sorghum, millet or cassava.",
            ),
            RainfallTrend::Heavy { avg_rain } => AgricultureInsight::new(
                InsightKind::Fertilizing,
                Priority::Medium,
                "Heavy Rainfall Expected",
                format!(
                    "Average rain chance over the next {} days is {:.0}%. \
                     Waterlogging and nutrient leaching are likely.",
                    ctx.days.len(),
                    avg_rain
                ),
            )
            .with_recommendation(
                "Clear drainage channels and build raised beds. Delay fertilizer \
                 application until the heavy rains ease to avoid wash-off.",
            ),
        };

        vec![insight]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForecastDay, WeatherSnapshot};
    use chrono::NaiveDate;

    fn evaluate(rain: u8) -> Vec<AgricultureInsight> {
        let days: Vec<ForecastDay> = NaiveDate::from_ymd_opt(2025, 9, 1)
            .unwrap()
            .iter_days()
            .take(5)
            .map(|date| ForecastDay {
                date,
                temperature: 23.0,
                min_temp: 19.0,
                max_temp: 27.0,
                humidity: 70.0,
                wind_speed: 9.0,
                description: String::new(),
                rain_chance: rain,
            })
            .collect();
        let current = WeatherSnapshot::basic("Mbale", 23.0, 70.0, 50);
        RainfallTrendRule.evaluate(&InsightContext::new(&current, &days))
    }

    #[test]
    fn heavy_rain_recommends_drainage() {
        let insights = evaluate(80);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Fertilizing);
        assert!(insights[0].description.contains("80%"));
        assert!(insights[0].recommendation.contains("drainage"));
    }

    #[test]
    fn drought_recommends_conservation() {
        let insights = evaluate(10);
        assert_eq!(insights[0].kind, InsightKind::Irrigation);
        assert_eq!(insights[0].priority, Priority::High);
        assert!(insights[0].recommendation.starts_with("Conserve water"));
    }

    #[test]
    fn normal_is_suppressed() {
        assert!(evaluate(50).is_empty());
    }
}
