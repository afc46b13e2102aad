use crate::logic::InsightReport;
use crate::models::{Priority, Settings};
use crossterm::style::{Color, Stylize};
use std::fmt::Write;

struct Painter {
    color: bool,
}

impl Painter {
    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

fn priority_color(settings: &Settings, priority: Priority) -> Color {
    match priority {
        Priority::High => settings.theme.high(),
        Priority::Medium => settings.theme.medium(),
        Priority::Low => settings.theme.low(),
    }
}

/// Render a report for the terminal. Theme and role come from the caller's
/// settings; `color = false` yields plain text.
pub fn render(report: &InsightReport, settings: &Settings, color: bool) -> String {
    let p = Painter { color };
    let theme = settings.theme;
    let role = settings.role;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {}",
        p.bold(&format!("Weather insights for {}", report.location), role.accent_color()),
        p.paint(&format!("[{} view]", role.label()), theme.dim()),
    );

    let c = &report.current;
    let _ = writeln!(
        out,
        "{}",
        p.paint(
            &format!(
                "Now: {:.1}°C (feels {:.1}°C), {:.0}% humidity, wind {:.0} km/h, rain chance {}%, {}",
                c.temperature, c.feels_like, c.humidity, c.wind_speed, c.rain_chance, c.description
            ),
            theme.text(),
        )
    );
    let _ = writeln!(out);

    if !report.forecast.is_empty() {
        let _ = writeln!(out, "{}", p.bold("Forecast", theme.text()));
        for day in &report.forecast {
            let _ = writeln!(
                out,
                "  {}  {:>5.1}°C  ({:.1} - {:.1})  {:>3}% rain  {:>3.0}% hum  {}",
                day.date.format("%a %b %d"),
                day.temperature,
                day.min_temp,
                day.max_temp,
                day.rain_chance,
                day.humidity,
                p.paint(&day.description, theme.dim()),
            );
        }
        let _ = writeln!(out);
    }

    if report.insights.is_empty() {
        let _ = writeln!(out, "{}", p.paint("No advisories for this forecast.", theme.dim()));
        return out;
    }

    let _ = writeln!(out, "{}", p.bold("Advisories", theme.text()));
    for insight in &report.insights {
        let color_for = priority_color(settings, insight.priority);
        let _ = writeln!(
            out,
            "  {} {} {}",
            p.paint(insight.priority.symbol(), color_for),
            p.bold(&insight.title, color_for),
            p.paint(&format!("({})", insight.kind.label()), theme.dim()),
        );
        let _ = writeln!(out, "    {}", insight.description);
        if !insight.recommendation.is_empty() {
            let _ = writeln!(out, "    → {}", insight.recommendation);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgricultureInsight, InsightKind, Role, Theme, WeatherSnapshot};
    use chrono::Utc;

    fn report(insights: Vec<AgricultureInsight>) -> InsightReport {
        InsightReport {
            location: "Gulu, UG".into(),
            generated_at: Utc::now(),
            current: WeatherSnapshot::basic("Gulu, UG", 28.0, 40.0, 20),
            forecast: Vec::new(),
            insights,
        }
    }

    #[test]
    fn plain_render_lists_insights() {
        let insight = AgricultureInsight::new(
            InsightKind::Irrigation,
            Priority::High,
            "Irrigation Alert",
            "Dry conditions.",
        )
        .with_recommendation("Water early.");
        let settings = Settings {
            theme: Theme::Dark,
            role: Role::Investor,
        };

        let text = render(&report(vec![insight]), &settings, false);
        assert!(text.starts_with("Weather insights for Gulu, UG [Investor view]"));
        assert!(text.contains("⚠ Irrigation Alert (Irrigation)"));
        assert!(text.contains("→ Water early."));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn empty_insights_message() {
        let text = render(&report(Vec::new()), &Settings::default(), false);
        assert!(text.contains("No advisories"));
        assert!(text.contains("[Farmer view]"));
    }

    #[test]
    fn color_render_emits_escape_codes() {
        let text = render(&report(Vec::new()), &Settings::default(), true);
        assert!(text.contains('\u{1b}'));
    }
}
