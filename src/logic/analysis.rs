use super::nutrients::calculate_nutrient_score;
use super::quality::classify_soil_quality;
use super::sampling::generate_sample_points_seeded;
use super::summary::summarize;
use super::texture::texture_for_record;
use super::zones::classify_management_zone;
use crate::config::AnalysisConfig;
use crate::datasources::SoilPropertySource;
use crate::models::{
    Coordinate, FarmAnalysis, FarmBoundary, SamplePointResult, SoilProperty, SoilPropertyRecord,
};
use chrono::Utc;

/// Runs every classifier on one point's readings.
pub fn classify_point(coordinate: Coordinate, properties: SoilPropertyRecord) -> SamplePointResult {
    let quality = classify_soil_quality(&properties);
    let texture = texture_for_record(&properties);
    let nutrient_score = calculate_nutrient_score(&properties);
    let (zone, recommendation) =
        classify_management_zone(quality.percentage, properties.get(SoilProperty::Ph));

    SamplePointResult {
        coordinate,
        properties,
        quality,
        texture,
        nutrient_score,
        zone,
        recommendation: recommendation.to_string(),
    }
}

/// Sample, fetch, classify and summarise a farm.
pub struct FarmAnalyzer<S: SoilPropertySource> {
    source: S,
    sample_points: usize,
    seed: Option<u64>,
}

impl<S: SoilPropertySource> FarmAnalyzer<S> {
    pub fn new(source: S, config: &AnalysisConfig) -> Self {
        Self {
            source,
            sample_points: config.sample_points,
            seed: config.seed,
        }
    }

    pub async fn analyze(&self, boundary: &FarmBoundary) -> FarmAnalysis {
        let points = generate_sample_points_seeded(boundary, self.sample_points, self.seed);
        tracing::info!(
            "Analysing {} sample points with {}",
            points.len(),
            self.source.name()
        );

        let mut results = Vec::with_capacity(points.len());
        for point in &points {
            match self.source.fetch(*point).await {
                Ok(record) => {
                    let result = classify_point(*point, record);
                    tracing::debug!(
                        "{}: {} ({:.1}%), {}",
                        point,
                        result.quality.category,
                        result.quality.percentage,
                        result.zone
                    );
                    results.push(result);
                }
                Err(e) => {
                    tracing::warn!("Excluding point {} from analysis: {}", point, e);
                }
            }
        }

        let summary = summarize(&results);
        tracing::info!(
            "Analysed {}/{} points, overall {}",
            results.len(),
            points.len(),
            summary.overall_category
        );

        FarmAnalysis {
            generated_at: Utc::now(),
            source: self.source.name().to_string(),
            bounding_box: boundary.bounding_box(),
            area_hectares: boundary.area_hectares(),
            requested_points: self.sample_points,
            generated_points: points.len(),
            results,
            summary,
        }
    }
}
