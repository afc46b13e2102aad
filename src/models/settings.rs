use super::role::Role;
use crate::db::SettingsStore;
use crate::error::Result;
use crossterm::style::Color;
use serde::{Deserialize, Serialize};

const THEME_KEY: &str = "theme";
const ROLE_KEY: &str = "role";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    // Palette
    pub fn text(&self) -> Color {
        match self {
            Theme::Light => Color::Black,
            Theme::Dark => Color::White,
        }
    }

    pub fn dim(&self) -> Color {
        match self {
            Theme::Light => Color::DarkGrey,
            Theme::Dark => Color::Grey,
        }
    }

    pub fn high(&self) -> Color {
        match self {
            Theme::Light => Color::DarkRed,
            Theme::Dark => Color::Red,
        }
    }

    pub fn medium(&self) -> Color {
        match self {
            Theme::Light => Color::DarkYellow,
            Theme::Dark => Color::Yellow,
        }
    }

    pub fn low(&self) -> Color {
        match self {
            Theme::Light => Color::DarkCyan,
            Theme::Dark => Color::Cyan,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User preferences, loaded once and passed to whatever renders output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub theme: Theme,
    pub role: Role,
}

impl Settings {
    pub fn load(store: &dyn SettingsStore) -> Result<Self> {
        let mut settings = Settings::default();

        if let Some(value) = store.get(THEME_KEY)? {
            match Theme::from_str(&value) {
                Some(theme) => settings.theme = theme,
                None => tracing::warn!(theme = %value, "Unknown theme in settings, using default"),
            }
        }

        if let Some(value) = store.get(ROLE_KEY)? {
            match Role::from_str(&value) {
                Some(role) => settings.role = role,
                None => tracing::warn!(role = %value, "Unknown role in settings, using default"),
            }
        }

        Ok(settings)
    }

    pub fn save(&self, store: &dyn SettingsStore) -> Result<()> {
        store.set(THEME_KEY, self.theme.as_str())?;
        store.set(ROLE_KEY, self.role.as_str())?;
        Ok(())
    }
}
