use crossterm::style::Color;
use serde::{Deserialize, Serialize};

/// Marketplace participant. Every per-role concern is an exhaustive match
/// so adding a role forces each mapping to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    Investor,
    Landowner,
    #[default]
    Farmer,
    Buyer,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Investor, Role::Landowner, Role::Farmer, Role::Buyer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Investor => "investor",
            Role::Landowner => "landowner",
            Role::Farmer => "farmer",
            Role::Buyer => "buyer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Investor => "Investor",
            Role::Landowner => "Landowner",
            Role::Farmer => "Farmer",
            Role::Buyer => "Buyer",
        }
    }

    pub fn accent_color(&self) -> Color {
        match self {
            Role::Investor => Color::Blue,
            Role::Landowner => Color::DarkYellow,
            Role::Farmer => Color::Green,
            Role::Buyer => Color::Magenta,
        }
    }

    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Investor => "/investor/dashboard",
            Role::Landowner => "/landowner/dashboard",
            Role::Farmer => "/farmer/dashboard",
            Role::Buyer => "/buyer/dashboard",
        }
    }

    pub fn menu_items(&self) -> &'static [&'static str] {
        match self {
            Role::Investor => &["Dashboard", "Opportunities", "Portfolio", "Weather"],
            Role::Landowner => &["Dashboard", "My Land", "Applications", "Weather"],
            Role::Farmer => &["Dashboard", "My Farms", "Start a Farm", "Weather"],
            Role::Buyer => &["Dashboard", "Marketplace", "Orders", "Weather"],
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "investor" => Some(Role::Investor),
            "landowner" | "land owner" => Some(Role::Landowner),
            "farmer" | "youth" | "agripreneur" => Some(Role::Farmer),
            "buyer" | "business" => Some(Role::Buyer),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
