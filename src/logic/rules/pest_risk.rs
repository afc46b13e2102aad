use super::{InsightContext, InsightRule};
use crate::logic::classifiers::pest_risk;
use crate::models::{AgricultureInsight, InsightKind, PestRisk, Priority};

/// Pest risk rule - warm, humid forecasts favour insects and fungal disease
///
/// Risk is the share of humid (>80%) and warm (>25°C) signals across all
/// forecast days:
/// - Medium: above 40%
/// - High: above 70%
pub struct PestRiskRule;

impl InsightRule for PestRiskRule {
    fn id(&self) -> &'static str {
        "pest_risk"
    }

    fn name(&self) -> &'static str {
        "Pest Risk"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Vec<AgricultureInsight> {
        let risk = pest_risk(ctx.days);
        tracing::debug!(risk = risk.as_str(), days = ctx.days.len(), "Pest risk");

        let insight = match risk {
            PestRisk::Low => return Vec::new(),
            PestRisk::High { percent } => AgricultureInsight::new(
                InsightKind::PestControl,
                Priority::High,
                "High Pest Risk",
                format!(
                    "Warm, humid conditions ({:.0}% risk) strongly favour pests and fungal disease.",
                    percent
                ),
            )
            .with_recommendation(
                "Inspect crops daily, set traps for fall armyworm and stem borers, and \
                 apply preventive treatments where outbreaks have occurred before.",
            ),
            PestRisk::Medium { percent } => AgricultureInsight::new(
                InsightKind::PestControl,
                Priority::Medium,
                "Moderate Pest Risk",
                format!(
                    "Forecast conditions ({:.0}% risk) are moderately favourable for pests.",
                    percent
                ),
            )
            .with_recommendation(
                "Scout fields twice a week and keep field margins weeded.",
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

    fn day(temp: f64, humidity: f64) -> ForecastDay {
        ForecastDay {
            date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            temperature: temp,
            min_temp: temp,
            max_temp: temp,
            humidity,
            wind_speed: 0.0,
            description: String::new(),
            rain_chance: 50,
        }
    }

    fn evaluate(days: &[ForecastDay]) -> Vec<AgricultureInsight> {
        let current = WeatherSnapshot::basic("Jos", 20.0, 70.0, 50);
        PestRiskRule.evaluate(&InsightContext::new(&current, days))
    }

    #[test]
    fn humid_cool_day_is_medium() {
        let insights = evaluate(&[day(10.0, 95.0)]);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].priority, Priority::Medium);
        assert!(insights[0].description.contains("50%"));
    }

    #[test]
    fn humid_warm_days_are_high() {
        let insights = evaluate(&[day(28.0, 90.0), day(27.0, 85.0)]);
        assert_eq!(insights[0].priority, Priority::High);
        assert_eq!(insights[0].kind, InsightKind::PestControl);
    }

    #[test]
    fn low_and_empty_are_suppressed() {
        assert!(evaluate(&[day(18.0, 50.0)]).is_empty());
        assert!(evaluate(&[]).is_empty());
    }
}
