use super::boundary::BoundingBox;
use super::classification::{ManagementZone, QualityCategory, SamplePointResult, TextureClass};
use super::soil::SoilProperty;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Farm-level aggregate over all analysed sample points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FarmSummary {
    pub sample_count: usize,
    /// Every property is listed; `None` when no point reported it.
    pub averages: BTreeMap<SoilProperty, Option<f64>>,
    pub quality_distribution: BTreeMap<QualityCategory, usize>,
    pub zone_distribution: BTreeMap<ManagementZone, usize>,
    pub texture_distribution: BTreeMap<TextureClass, usize>,
    /// Mean quality percentage of the scored points.
    pub overall_score: Option<f64>,
    pub overall_category: QualityCategory,
    pub average_nutrient_score: Option<f64>,
}

impl FarmSummary {
    pub fn average(&self, property: SoilProperty) -> Option<f64> {
        self.averages.get(&property).copied().flatten()
    }

    pub fn count_for(&self, category: QualityCategory) -> usize {
        self.quality_distribution
            .get(&category)
            .copied()
            .unwrap_or(0)
    }
}

/// One complete analysis run over a farm boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmAnalysis {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub bounding_box: Option<BoundingBox>,
    pub area_hectares: f64,
    pub requested_points: usize,
    pub generated_points: usize,
    pub results: Vec<SamplePointResult>,
    pub summary: FarmSummary,
}

impl FarmAnalysis {
    /// Points that were sampled but could not be analysed.
    pub fn excluded_points(&self) -> usize {
        self.generated_points.saturating_sub(self.results.len())
    }
}
