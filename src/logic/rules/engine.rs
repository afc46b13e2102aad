use super::{
    crop_suitability::CropSuitabilityRule, irrigation_alert::IrrigationAlertRule,
    pest_risk::PestRiskRule, planting_window::PlantingWindowRule,
    rainfall_trend::RainfallTrendRule, InsightContext, InsightRule,
};
use crate::models::{AgricultureInsight, ForecastDay, WeatherSnapshot};

pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
}

impl InsightEngine {
    /// Rules run in this order and their output is concatenated as-is
    pub fn new() -> Self {
        let rules: Vec<Box<dyn InsightRule>> = vec![
            Box::new(IrrigationAlertRule),
            Box::new(PlantingWindowRule),
            Box::new(RainfallTrendRule),
            Box::new(PestRiskRule),
            Box::new(CropSuitabilityRule),
        ];

        Self { rules }
    }

    pub fn evaluate(
        &self,
        current: &WeatherSnapshot,
        days: &[ForecastDay],
    ) -> Vec<AgricultureInsight> {
        let ctx = InsightContext::new(current, days);
        self.rules
            .iter()
            .flat_map(|rule| {
                let insights = rule.evaluate(&ctx);
                tracing::trace!(rule = rule.id(), count = insights.len(), "Rule evaluated");
                insights
            })
            .collect()
    }

    /// `(id, name)` of every rule in evaluation order
    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Advisories for one snapshot and forecast using the default rule set
pub fn generate_insights(
    current: &WeatherSnapshot,
    days: &[ForecastDay],
) -> Vec<AgricultureInsight> {
    InsightEngine::new().evaluate(current, days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InsightKind, Priority};
    use chrono::NaiveDate;

    fn forecast(count: usize, temp: f64, humidity: f64, rain: u8) -> Vec<ForecastDay> {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .iter_days()
            .take(count)
            .map(|date| ForecastDay {
                date,
                temperature: temp,
                min_temp: temp - 4.0,
                max_temp: temp + 4.0,
                humidity,
                wind_speed: 8.0,
                description: "scattered clouds".into(),
                rain_chance: rain,
            })
            .collect()
    }

    #[test]
    fn dry_current_conditions_lead_with_irrigation_alert() {
        let current = WeatherSnapshot::basic("Nakuru", 27.0, 45.0, 20);
        let insights = generate_insights(&current, &forecast(5, 24.0, 60.0, 40));

        let first = insights.first().unwrap();
        assert_eq!(first.kind, InsightKind::Irrigation);
        assert_eq!(first.priority, Priority::High);
    }

    #[test]
    fn empty_forecast_and_neutral_snapshot_yield_nothing() {
        let current = WeatherSnapshot::basic("Nakuru", 22.0, 70.0, 50);
        assert!(generate_insights(&current, &[]).is_empty());
    }

    #[test]
    fn insights_follow_fixed_rule_order() {
        // Dry now, a wet warm humid week ahead: every rule fires
        let current = WeatherSnapshot::basic("Kumasi", 31.0, 40.0, 10);
        let days = forecast(7, 26.0, 90.0, 65);
        let insights = generate_insights(&current, &days);

        let kinds: Vec<_> = insights.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                InsightKind::Irrigation,  // current conditions
                InsightKind::Planting,    // window
                InsightKind::PestControl, // humid and warm
                InsightKind::Planting,    // June crops
            ]
        );
        assert_eq!(insights[2].priority, Priority::High);
    }

    #[test]
    fn output_is_deterministic() {
        let current = WeatherSnapshot::basic("Kumasi", 31.0, 40.0, 10);
        let days = forecast(10, 26.0, 85.0, 75);
        let engine = InsightEngine::new();

        let a = serde_json::to_string(&engine.evaluate(&current, &days)).unwrap();
        let b = serde_json::to_string(&engine.evaluate(&current, &days)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn list_rules_in_order() {
        let rules = InsightEngine::new().list_rules();
        assert_eq!(rules[0], ("irrigation_alert", "Irrigation Alert"));
        assert!(rules.iter().all(|(_, name)| !name.is_empty()));

        let ids: Vec<_> = rules.into_iter().map(|(id, _)| id).collect();
        assert_eq!(
            ids,
            vec![
                "irrigation_alert",
                "planting_window",
                "rainfall_trend",
                "pest_risk",
                "crop_suitability"
            ]
        );
    }
}
