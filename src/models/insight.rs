use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Irrigation,
    Planting,
    Harvesting,
    PestControl,
    Fertilizing,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Irrigation => "irrigation",
            InsightKind::Planting => "planting",
            InsightKind::Harvesting => "harvesting",
            InsightKind::PestControl => "pest_control",
            InsightKind::Fertilizing => "fertilizing",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InsightKind::Irrigation => "Irrigation",
            InsightKind::Planting => "Planting",
            InsightKind::Harvesting => "Harvesting",
            InsightKind::PestControl => "Pest Control",
            InsightKind::Fertilizing => "Fertilizing",
        }
    }
}

impl std::fmt::Display for InsightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Informational only; the engine never sorts or filters on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Priority::Low => "ℹ",
            Priority::Medium => "→",
            Priority::High => "⚠",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgricultureInsight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub recommendation: String,
}

impl AgricultureInsight {
    pub fn new(
        kind: InsightKind,
        priority: Priority,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            priority,
            title: title.into(),
            description: description.into(),
            recommendation: String::new(),
        }
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = recommendation.into();
        self
    }
}

/// Outcome of the rainfall trend classifier, carrying the averaged rain chance
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RainfallTrend {
    Normal,
    Drought { avg_rain: f64 },
    Heavy { avg_rain: f64 },
}

impl RainfallTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            RainfallTrend::Normal => "normal",
            RainfallTrend::Drought { .. } => "drought",
            RainfallTrend::Heavy { .. } => "heavy",
        }
    }
}

/// Outcome of the pest risk classifier, carrying the risk percentage
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PestRisk {
    Low,
    Medium { percent: f64 },
    High { percent: f64 },
}

impl PestRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            PestRisk::Low => "low",
            PestRisk::Medium { .. } => "medium",
            PestRisk::High { .. } => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropMatch {
    MaizeVegetables,
    Rice,
    CassavaYam,
}

impl CropMatch {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropMatch::MaizeVegetables => "maize and vegetables",
            CropMatch::Rice => "rice",
            CropMatch::CassavaYam => "cassava and yam",
        }
    }
}
