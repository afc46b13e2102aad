pub mod crop_suitability;
pub mod engine;
pub mod irrigation_alert;
pub mod pest_risk;
pub mod planting_window;
pub mod rainfall_trend;

pub use engine::{generate_insights, InsightEngine};

use crate::logic::forecast::monthly_patterns;
use crate::models::{AgricultureInsight, ForecastDay, MonthlyPattern, WeatherSnapshot};

/// Inputs shared by every rule for one evaluation
pub struct InsightContext<'a> {
    pub current: &'a WeatherSnapshot,
    pub days: &'a [ForecastDay],
    pub monthly: Vec<MonthlyPattern>,
}

impl<'a> InsightContext<'a> {
    pub fn new(current: &'a WeatherSnapshot, days: &'a [ForecastDay]) -> Self {
        Self {
            current,
            days,
            monthly: monthly_patterns(days),
        }
    }
}

/// Trait for forecast-driven advisories
pub trait InsightRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule; an empty result means nothing to report
    fn evaluate(&self, ctx: &InsightContext<'_>) -> Vec<AgricultureInsight>;
}
