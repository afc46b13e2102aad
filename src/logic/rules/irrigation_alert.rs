use super::{InsightContext, InsightRule};
use crate::models::{AgricultureInsight, InsightKind, Priority};

const MAX_RAIN_CHANCE: u8 = 30;
const MAX_HUMIDITY: f64 = 60.0;

/// Irrigation alert rule - flags dry current conditions
///
/// Conditions:
/// - Current rain chance below 30%
/// - Current humidity below 60%
pub struct IrrigationAlertRule;

impl InsightRule for IrrigationAlertRule {
    fn id(&self) -> &'static str {
        "irrigation_alert"
    }

    fn name(&self) -> &'static str {
        "Irrigation Alert"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Vec<AgricultureInsight> {
        let current = ctx.current;
        if current.rain_chance >= MAX_RAIN_CHANCE || current.humidity >= MAX_HUMIDITY {
            return Vec::new();
        }

        let insight = AgricultureInsight::new(
            InsightKind::Irrigation,
            Priority::High,
            "Irrigation Alert",
            format!(
                "Low rain chance ({}%) and dry air ({:.0}% humidity) in {}. \
                 Soil moisture will drop quickly.",
                current.rain_chance, current.humidity, current.location
            ),
        )
        .with_recommendation(
            "Irrigate early morning or late evening to limit evaporation. \
             Mulch around young plants to hold soil moisture.",
        );

        vec![insight]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeatherSnapshot;

    fn evaluate(rain: u8, humidity: f64) -> Vec<AgricultureInsight> {
        let current = WeatherSnapshot::basic("Eldoret", 26.0, humidity, rain);
        IrrigationAlertRule.evaluate(&InsightContext::new(&current, &[]))
    }

    #[test]
    fn fires_when_dry() {
        let insights = evaluate(20, 45.0);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Irrigation);
        assert_eq!(insights[0].priority, Priority::High);
        assert!(insights[0].description.contains("Eldoret"));
    }

    #[test]
    fn thresholds_are_strict() {
        assert!(evaluate(30, 45.0).is_empty());
        assert!(evaluate(20, 60.0).is_empty());
        assert_eq!(evaluate(29, 59.0).len(), 1);
    }
}
