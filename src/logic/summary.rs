use super::quality::category_for_percentage;
use crate::models::{FarmSummary, QualityCategory, SamplePointResult, SoilProperty};
use std::collections::BTreeMap;

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Farm-level summary over a complete result set.
///
/// Property means only include points where the property is known. The
/// overall score averages scored points; points classified `Unknown` are
/// counted in the distribution but not in the score. Likewise the nutrient
/// mean skips points with neither organic carbon nor nitrogen.
pub fn summarize(results: &[SamplePointResult]) -> FarmSummary {
    let averages = SoilProperty::ALL
        .iter()
        .map(|property| {
            let avg = mean(results.iter().filter_map(|r| r.properties.get(*property)));
            (*property, avg)
        })
        .collect();

    let mut quality_distribution = BTreeMap::new();
    let mut zone_distribution = BTreeMap::new();
    let mut texture_distribution = BTreeMap::new();

    for result in results {
        *quality_distribution
            .entry(result.quality.category)
            .or_insert(0) += 1;
        *zone_distribution.entry(result.zone).or_insert(0) += 1;
        if let Some(texture) = result.texture {
            *texture_distribution.entry(texture).or_insert(0) += 1;
        }
    }

    let overall_score = mean(
        results
            .iter()
            .filter(|r| r.quality.is_scored())
            .map(|r| r.quality.percentage),
    );

    let overall_category = overall_score
        .map(category_for_percentage)
        .unwrap_or(QualityCategory::Unknown);

    let average_nutrient_score = mean(
        results
            .iter()
            .filter(|r| r.has_nutrient_data())
            .map(|r| r.nutrient_score),
    );

    FarmSummary {
        sample_count: results.len(),
        averages,
        quality_distribution,
        zone_distribution,
        texture_distribution,
        overall_score,
        overall_category,
        average_nutrient_score,
    }
}
