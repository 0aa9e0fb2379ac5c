use super::boundary::Coordinate;
use super::soil::{SoilProperty, SoilPropertyRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Composite soil quality label, ordered worst to best. `Unknown` is used
/// only when a record has none of the scored properties.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum QualityCategory {
    #[default]
    Unknown,
    #[serde(rename = "Very Poor")]
    VeryPoor,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl QualityCategory {
    pub const RANKED: [QualityCategory; 5] = [
        QualityCategory::VeryPoor,
        QualityCategory::Poor,
        QualityCategory::Fair,
        QualityCategory::Good,
        QualityCategory::Excellent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityCategory::Unknown => "Unknown",
            QualityCategory::VeryPoor => "Very Poor",
            QualityCategory::Poor => "Poor",
            QualityCategory::Fair => "Fair",
            QualityCategory::Good => "Good",
            QualityCategory::Excellent => "Excellent",
        }
    }

    /// Map marker fill, brown to tan.
    pub fn color(&self) -> &'static str {
        match self {
            QualityCategory::Unknown => "#808080",
            QualityCategory::VeryPoor => "#8B4513",
            QualityCategory::Poor => "#A0522D",
            QualityCategory::Fair => "#CD853F",
            QualityCategory::Good => "#D2B48C",
            QualityCategory::Excellent => "#F4A460",
        }
    }
}

impl std::fmt::Display for QualityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityClassification {
    pub category: QualityCategory,
    /// 0-100
    pub percentage: f64,
    /// Parameter name to sub-score, e.g. `"pH" -> "5/5"`.
    pub breakdown: BTreeMap<String, String>,
}

impl QualityClassification {
    pub fn unknown() -> Self {
        Self {
            category: QualityCategory::Unknown,
            percentage: 0.0,
            breakdown: BTreeMap::new(),
        }
    }

    pub fn is_scored(&self) -> bool {
        self.category != QualityCategory::Unknown
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TextureClass {
    Clay,
    Sand,
    Silt,
    #[serde(rename = "Sandy Clay")]
    SandyClay,
    #[serde(rename = "Silty Clay")]
    SiltyClay,
    #[serde(rename = "Clay Loam")]
    ClayLoam,
    #[serde(rename = "Sandy Loam")]
    SandyLoam,
    #[serde(rename = "Silt Loam")]
    SiltLoam,
    Loam,
}

impl TextureClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextureClass::Clay => "Clay",
            TextureClass::Sand => "Sand",
            TextureClass::Silt => "Silt",
            TextureClass::SandyClay => "Sandy Clay",
            TextureClass::SiltyClay => "Silty Clay",
            TextureClass::ClayLoam => "Clay Loam",
            TextureClass::SandyLoam => "Sandy Loam",
            TextureClass::SiltLoam => "Silt Loam",
            TextureClass::Loam => "Loam",
        }
    }
}

impl std::fmt::Display for TextureClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Precision-agriculture zone, ordered lowest to highest potential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ManagementZone {
    #[serde(rename = "Improvement Zone")]
    Improvement,
    #[serde(rename = "Moderate Zone")]
    Moderate,
    #[serde(rename = "Good Production Zone")]
    GoodProduction,
    #[serde(rename = "Premium Zone")]
    Premium,
}

impl ManagementZone {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManagementZone::Premium => "Premium Zone",
            ManagementZone::GoodProduction => "Good Production Zone",
            ManagementZone::Moderate => "Moderate Zone",
            ManagementZone::Improvement => "Improvement Zone",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            ManagementZone::Premium => "Maintain current practices",
            ManagementZone::GoodProduction => "Minor nutrient adjustments and pH monitoring",
            ManagementZone::Moderate => "Targeted fertilization and organic matter additions",
            ManagementZone::Improvement => "Soil amendment program and corrective liming required",
        }
    }
}

impl std::fmt::Display for ManagementZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything derived for one sampled point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplePointResult {
    pub coordinate: Coordinate,
    pub properties: SoilPropertyRecord,
    pub quality: QualityClassification,
    /// Absent unless clay, sand and silt are all known.
    pub texture: Option<TextureClass>,
    pub nutrient_score: f64,
    pub zone: ManagementZone,
    pub recommendation: String,
}

impl SamplePointResult {
    /// Whether the nutrient score rests on any reading at all.
    pub fn has_nutrient_data(&self) -> bool {
        self.properties.get(SoilProperty::OrganicCarbon).is_some()
            || self.properties.get(SoilProperty::Nitrogen).is_some()
    }
}
