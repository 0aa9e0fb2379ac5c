use crate::error::Result;
use crate::models::{FarmAnalysis, QualityCategory, SamplePointResult, SoilProperty};
use geojson::{Feature, FeatureCollection, GeoJson, JsonObject};
use serde_json::json;
use std::fmt::Write as _;
use std::path::Path;

fn point_feature(result: &SamplePointResult) -> Feature {
    let mut props = JsonObject::new();
    props.insert("quality_category".into(), json!(result.quality.category.as_str()));
    props.insert("quality_score".into(), json!(result.quality.percentage));
    props.insert("color".into(), json!(result.quality.category.color()));
    props.insert(
        "texture".into(),
        json!(result.texture.map(|t| t.as_str())),
    );
    props.insert("nutrient_score".into(), json!(result.nutrient_score));
    props.insert("management_zone".into(), json!(result.zone.as_str()));
    props.insert("recommendation".into(), json!(result.recommendation));
    props.insert("score_breakdown".into(), json!(result.quality.breakdown));
    for (property, value) in result.properties.present() {
        props.insert(property.key().into(), json!(value));
    }

    Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::from(
            &result.coordinate.to_point(),
        ))),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

/// One Point feature per analysed sample; run metadata and the farm
/// summary ride along as foreign members.
pub fn analysis_to_geojson(analysis: &FarmAnalysis) -> Result<FeatureCollection> {
    let features = analysis.results.iter().map(point_feature).collect();

    let mut foreign = JsonObject::new();
    foreign.insert("generated_at".into(), json!(analysis.generated_at.to_rfc3339()));
    foreign.insert("source".into(), json!(analysis.source));
    foreign.insert("area_hectares".into(), json!(analysis.area_hectares));
    foreign.insert("requested_points".into(), json!(analysis.requested_points));
    foreign.insert("generated_points".into(), json!(analysis.generated_points));
    foreign.insert("summary".into(), serde_json::to_value(&analysis.summary)?);

    Ok(FeatureCollection {
        bbox: analysis
            .bounding_box
            .map(|b| vec![b.min_lon, b.min_lat, b.max_lon, b.max_lat]),
        features,
        foreign_members: Some(foreign),
    })
}

pub fn write_geojson(collection: FeatureCollection, path: &Path) -> Result<()> {
    let geojson = GeoJson::FeatureCollection(collection);
    let content = serde_json::to_string_pretty(&geojson)?;
    std::fs::write(path, content)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

fn format_value(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if unit.is_empty() => format!("{:.2}", v),
        Some(v) => format!("{:.2} {}", v, unit),
        None => "n/a".to_string(),
    }
}

/// Plain-text report for the terminal.
pub fn render_summary(analysis: &FarmAnalysis) -> String {
    let summary = &analysis.summary;
    let mut out = String::new();

    let _ = writeln!(out, "Farm Soil Analysis");
    let _ = writeln!(out, "==================");
    let _ = writeln!(out, "Source:        {}", analysis.source);
    let _ = writeln!(
        out,
        "Generated:     {}",
        analysis.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(out, "Area:          {:.1} ha", analysis.area_hectares);
    if let Some(bbox) = analysis.bounding_box {
        let _ = writeln!(
            out,
            "Center:        {} (zoom {})",
            bbox.center(),
            bbox.suggested_zoom()
        );
    }
    let _ = writeln!(
        out,
        "Sample points: {} analysed / {} generated / {} requested",
        summary.sample_count, analysis.generated_points, analysis.requested_points
    );
    if analysis.excluded_points() > 0 {
        let _ = writeln!(
            out,
            "               {} excluded (no data)",
            analysis.excluded_points()
        );
    }
    let _ = writeln!(out);

    match summary.overall_score {
        Some(score) => {
            let _ = writeln!(
                out,
                "Overall quality: {} ({:.1}%)",
                summary.overall_category, score
            );
        }
        None => {
            let _ = writeln!(out, "Overall quality: {}", QualityCategory::Unknown);
        }
    }
    if let Some(nutrients) = summary.average_nutrient_score {
        let _ = writeln!(out, "Nutrient score:  {:.1}/100", nutrients);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Average properties");
    for property in SoilProperty::ALL {
        let _ = writeln!(
            out,
            "  {:<16} {}",
            property.as_str(),
            format_value(summary.average(property), property.unit())
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Quality distribution");
    for category in QualityCategory::RANKED.iter().rev() {
        let _ = writeln!(out, "  {:<16} {}", category.as_str(), summary.count_for(*category));
    }
    let unknown = summary.count_for(QualityCategory::Unknown);
    if unknown > 0 {
        let _ = writeln!(out, "  {:<16} {}", QualityCategory::Unknown.as_str(), unknown);
    }

    if !summary.zone_distribution.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Management zones");
        for (zone, count) in summary.zone_distribution.iter().rev() {
            let _ = writeln!(out, "  {:<22} {:>3}  {}", zone.as_str(), count, zone.recommendation());
        }
    }

    if !summary.texture_distribution.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Texture classes");
        for (texture, count) in &summary.texture_distribution {
            let _ = writeln!(out, "  {:<16} {}", texture.as_str(), count);
        }
    }

    out
}
