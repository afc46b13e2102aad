use super::{InsightContext, InsightRule};
use crate::logic::forecast::planting_windows;
use crate::models::{AgricultureInsight, InsightKind, Priority};

/// Planting window rule - reports months where a run of at least five
/// consecutive days has moderate rain (40-70%) and warmth (20-30°C)
pub struct PlantingWindowRule;

impl InsightRule for PlantingWindowRule {
    fn id(&self) -> &'static str {
        "planting_window"
    }

    fn name(&self) -> &'static str {
        "Optimal Planting Window"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Vec<AgricultureInsight> {
        let windows = planting_windows(ctx.days);
        if windows.is_empty() {
            return Vec::new();
        }

        let months = windows
            .iter()
            .map(|m| m.name())
            .collect::<Vec<_>>()
            .join(", ");

        let insight = AgricultureInsight::new(
            InsightKind::Planting,
            Priority::Medium,
            "Optimal Planting Window",
            format!(
                "Five or more consecutive days of moderate rain and warm temperatures expected in {}.",
                months
            ),
        )
        .with_recommendation(format!(
            "Prepare seedbeds and schedule planting for {}. Have seed and fertilizer on hand \
             before the window opens.",
            months
        ));

        vec![insight]
    }
}
