//! Illustrative reference layers positioned around a farm's extent.
//!
//! These are placeholders for real agronomic datasets: soil productivity
//! zones, water points, climate, input zones, elevation contours and slope
//! classes, laid out relative to the boundary's bounding box so they always
//! land on the farm being viewed.

use crate::models::BoundingBox;
use geo::{coord, LineString, Point, Polygon, Rect};
use geojson::{Feature, FeatureCollection, JsonObject};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Fraction of the extent added around the farm for regional layers.
const REGIONAL_BUFFER: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceLayer {
    SoilQualityZones,
    ClimateZones,
    ElevationContours,
    WaterSources,
    ManagementZones,
    SlopeAnalysis,
}

impl ReferenceLayer {
    pub const ALL: [ReferenceLayer; 6] = [
        ReferenceLayer::SoilQualityZones,
        ReferenceLayer::ClimateZones,
        ReferenceLayer::ElevationContours,
        ReferenceLayer::WaterSources,
        ReferenceLayer::ManagementZones,
        ReferenceLayer::SlopeAnalysis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceLayer::SoilQualityZones => "Soil Quality Zones",
            ReferenceLayer::ClimateZones => "Climate Zones",
            ReferenceLayer::ElevationContours => "Elevation Contours",
            ReferenceLayer::WaterSources => "Water Sources",
            ReferenceLayer::ManagementZones => "Field Management Zones",
            ReferenceLayer::SlopeAnalysis => "Slope Analysis",
        }
    }
}

impl std::fmt::Display for ReferenceLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which reference layers to produce. All off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerSelection {
    pub soil_quality_zones: bool,
    pub climate_zones: bool,
    pub elevation_contours: bool,
    pub water_sources: bool,
    pub management_zones: bool,
    pub slope_analysis: bool,
}

impl LayerSelection {
    pub fn all() -> Self {
        let mut selection = Self::default();
        for layer in ReferenceLayer::ALL {
            selection.set(layer, true);
        }
        selection
    }

    pub fn is_enabled(&self, layer: ReferenceLayer) -> bool {
        match layer {
            ReferenceLayer::SoilQualityZones => self.soil_quality_zones,
            ReferenceLayer::ClimateZones => self.climate_zones,
            ReferenceLayer::ElevationContours => self.elevation_contours,
            ReferenceLayer::WaterSources => self.water_sources,
            ReferenceLayer::ManagementZones => self.management_zones,
            ReferenceLayer::SlopeAnalysis => self.slope_analysis,
        }
    }

    pub fn set(&mut self, layer: ReferenceLayer, enabled: bool) {
        let flag = match layer {
            ReferenceLayer::SoilQualityZones => &mut self.soil_quality_zones,
            ReferenceLayer::ClimateZones => &mut self.climate_zones,
            ReferenceLayer::ElevationContours => &mut self.elevation_contours,
            ReferenceLayer::WaterSources => &mut self.water_sources,
            ReferenceLayer::ManagementZones => &mut self.management_zones,
            ReferenceLayer::SlopeAnalysis => &mut self.slope_analysis,
        };
        *flag = enabled;
    }

    pub fn any(&self) -> bool {
        ReferenceLayer::ALL.iter().any(|l| self.is_enabled(*l))
    }

    pub fn enabled(&self) -> Vec<ReferenceLayer> {
        ReferenceLayer::ALL
            .into_iter()
            .filter(|l| self.is_enabled(*l))
            .collect()
    }
}

/// Shorthand for positions within the farm extent.
struct Frame {
    bbox: BoundingBox,
    buffered: BoundingBox,
    center_lat: f64,
    center_lon: f64,
    lat_range: f64,
    lon_range: f64,
}

impl Frame {
    fn new(bbox: &BoundingBox) -> Self {
        let center = bbox.center();
        Self {
            bbox: *bbox,
            buffered: bbox.buffered(REGIONAL_BUFFER),
            center_lat: center.lat,
            center_lon: center.lon,
            lat_range: bbox.lat_range(),
            lon_range: bbox.lon_range(),
        }
    }
}

fn rect(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> Polygon<f64> {
    Rect::new(coord! { x: lon_a, y: lat_a }, coord! { x: lon_b, y: lat_b }).to_polygon()
}

fn feature(geometry: geojson::Value, layer: ReferenceLayer, properties: serde_json::Value) -> Feature {
    let mut props = JsonObject::new();
    props.insert("layer".into(), json!(layer.as_str()));
    if let serde_json::Value::Object(extra) = properties {
        props.extend(extra);
    }

    Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geometry)),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

fn soil_quality_zones(f: &Frame) -> Vec<Feature> {
    let b = &f.buffered;
    let layer = ReferenceLayer::SoilQualityZones;
    vec![
        feature(
            (&rect(
                b.min_lat,
                b.min_lon,
                b.min_lat + f.lat_range * 0.7,
                b.min_lon + f.lon_range * 0.6,
            ))
                .into(),
            layer,
            json!({"name": "High Productivity Zone", "quality": "High", "ph": "6.5-7.0", "organic_matter": "3.2%"}),
        ),
        feature(
            (&rect(
                f.center_lat - f.lat_range * 0.3,
                f.center_lon - f.lon_range * 0.2,
                f.center_lat + f.lat_range * 0.4,
                f.center_lon + f.lon_range * 0.5,
            ))
                .into(),
            layer,
            json!({"name": "Medium Productivity Zone", "quality": "Medium", "ph": "6.0-6.5", "organic_matter": "2.1%"}),
        ),
        feature(
            (&rect(
                b.max_lat - f.lat_range * 0.5,
                b.max_lon - f.lon_range * 0.7,
                b.max_lat,
                b.max_lon,
            ))
                .into(),
            layer,
            json!({"name": "Lower Productivity Zone", "quality": "Lower", "ph": "5.5-6.0", "organic_matter": "1.8%"}),
        ),
    ]
}

fn water_sources(f: &Frame) -> Vec<Feature> {
    let layer = ReferenceLayer::WaterSources;
    let point = |lat: f64, lon: f64| geojson::Value::from(&Point::new(lon, lat));
    vec![
        feature(
            point(f.center_lat + f.lat_range * 0.2, f.center_lon - f.lon_range * 0.3),
            layer,
            json!({"name": "Well #1", "type": "Borehole", "depth": "45m"}),
        ),
        feature(
            point(f.center_lat - f.lat_range * 0.1, f.center_lon + f.lon_range * 0.2),
            layer,
            json!({"name": "River Access", "type": "Surface Water", "flow": "Seasonal"}),
        ),
        feature(
            point(f.center_lat + f.lat_range * 0.1, f.center_lon + f.lon_range * 0.4),
            layer,
            json!({"name": "Reservoir", "type": "Storage", "capacity": "50,000L"}),
        ),
        feature(
            point(
                f.bbox.min_lat + f.lat_range * 0.3,
                f.bbox.min_lon + f.lon_range * 0.7,
            ),
            layer,
            json!({"name": "Irrigation Point", "type": "Irrigation", "pressure": "3.5 bar"}),
        ),
    ]
}

fn climate_zones(f: &Frame) -> Vec<Feature> {
    let b = &f.buffered;
    vec![feature(
        (&rect(b.min_lat, b.min_lon, b.max_lat, b.max_lon)).into(),
        ReferenceLayer::ClimateZones,
        json!({
            "name": "Local Climate Zone",
            "climate": "Mediterranean/Continental",
            "rainfall": "400-700mm",
            "temp_range": "0-40°C"
        }),
    )]
}

fn management_zones(f: &Frame) -> Vec<Feature> {
    let layer = ReferenceLayer::ManagementZones;
    let zone_width = f.lon_range / 3.0;
    let zone_height = f.lat_range / 2.0;
    let (min_lat, min_lon) = (f.bbox.min_lat, f.bbox.min_lon);

    let zone = |lat: f64, lon: f64, height: f64| rect(lat, lon, lat + height, lon + zone_width);

    vec![
        feature(
            (&zone(
                min_lat + f.lat_range * 0.1,
                min_lon + f.lon_range * 0.1,
                zone_height,
            ))
                .into(),
            layer,
            json!({"name": "Zone A - High Input", "zone": "A", "management": "High Input", "fertilizer": "200kg/ha", "yield_target": "8 t/ha"}),
        ),
        feature(
            (&zone(
                min_lat + f.lat_range * 0.4,
                min_lon + f.lon_range * 0.3,
                zone_height,
            ))
                .into(),
            layer,
            json!({"name": "Zone B - Standard", "zone": "B", "management": "Standard", "fertilizer": "150kg/ha", "yield_target": "6 t/ha"}),
        ),
        feature(
            (&zone(
                f.center_lat,
                f.center_lon + f.lon_range * 0.1,
                zone_height * 0.8,
            ))
                .into(),
            layer,
            json!({"name": "Zone C - Low Input", "zone": "C", "management": "Low Input", "fertilizer": "100kg/ha", "yield_target": "4 t/ha"}),
        ),
    ]
}

fn elevation_contours(f: &Frame) -> Vec<Feature> {
    let layer = ReferenceLayer::ElevationContours;
    let min_lat = f.bbox.min_lat;
    let contour = |start: f64, mid: f64, end: f64| {
        let line = LineString::from(vec![
            (f.buffered.min_lon, min_lat + f.lat_range * start),
            (f.center_lon, min_lat + f.lat_range * mid),
            (f.buffered.max_lon, min_lat + f.lat_range * end),
        ]);
        geojson::Value::from(&line)
    };

    vec![
        feature(
            contour(0.2, 0.3, 0.4),
            layer,
            json!({"name": "Lower elevation contour", "elevation": "Base level"}),
        ),
        feature(
            contour(0.6, 0.7, 0.8),
            layer,
            json!({"name": "Higher elevation contour", "elevation": "+20m"}),
        ),
    ]
}

fn slope_analysis(f: &Frame) -> Vec<Feature> {
    let layer = ReferenceLayer::SlopeAnalysis;
    let bbox = &f.bbox;
    vec![
        feature(
            (&rect(
                f.center_lat - f.lat_range * 0.2,
                f.center_lon - f.lon_range * 0.4,
                f.center_lat + f.lat_range * 0.1,
                f.center_lon + f.lon_range * 0.1,
            ))
                .into(),
            layer,
            json!({"name": "Flat Area (0-2%)", "slope": "0-2%", "suitability": "Excellent for machinery", "erosion_risk": "Low"}),
        ),
        feature(
            (&rect(
                bbox.min_lat + f.lat_range * 0.6,
                bbox.min_lon + f.lon_range * 0.5,
                bbox.min_lat + f.lat_range * 0.9,
                bbox.max_lon - f.lon_range * 0.1,
            ))
                .into(),
            layer,
            json!({"name": "Gentle Slope (2-8%)", "slope": "2-8%", "suitability": "Good for most crops", "erosion_risk": "Moderate"}),
        ),
        feature(
            (&rect(
                bbox.max_lat - f.lat_range * 0.3,
                bbox.min_lon + f.lon_range * 0.1,
                bbox.max_lat,
                bbox.min_lon + f.lon_range * 0.4,
            ))
                .into(),
            layer,
            json!({"name": "Steeper Area (8-15%)", "slope": "8-15%", "suitability": "Limited machinery access", "erosion_risk": "High"}),
        ),
    ]
}

/// Features for every enabled layer, in [`ReferenceLayer::ALL`] order.
pub fn build_reference_layers(bbox: &BoundingBox, selection: &LayerSelection) -> FeatureCollection {
    let frame = Frame::new(bbox);

    let features = selection
        .enabled()
        .into_iter()
        .flat_map(|layer| match layer {
            ReferenceLayer::SoilQualityZones => soil_quality_zones(&frame),
            ReferenceLayer::ClimateZones => climate_zones(&frame),
            ReferenceLayer::ElevationContours => elevation_contours(&frame),
            ReferenceLayer::WaterSources => water_sources(&frame),
            ReferenceLayer::ManagementZones => management_zones(&frame),
            ReferenceLayer::SlopeAnalysis => slope_analysis(&frame),
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn farm_bbox() -> BoundingBox {
        BoundingBox {
            min_lon: -3.75,
            min_lat: 40.40,
            max_lon: -3.70,
            max_lat: 40.45,
        }
    }

    fn layer_count(collection: &FeatureCollection, layer: ReferenceLayer) -> usize {
        collection
            .features
            .iter()
            .filter(|f| {
                f.properties
                    .as_ref()
                    .and_then(|p| p.get("layer"))
                    .and_then(|v| v.as_str())
                    == Some(layer.as_str())
            })
            .count()
    }

    #[test]
    fn nothing_enabled_by_default() {
        let selection = LayerSelection::default();
        assert!(!selection.any());
        let collection = build_reference_layers(&farm_bbox(), &selection);
        assert!(collection.features.is_empty());
    }

    #[test]
    fn all_layers_have_expected_feature_counts() {
        let collection = build_reference_layers(&farm_bbox(), &LayerSelection::all());
        assert_eq!(layer_count(&collection, ReferenceLayer::SoilQualityZones), 3);
        assert_eq!(layer_count(&collection, ReferenceLayer::WaterSources), 4);
        assert_eq!(layer_count(&collection, ReferenceLayer::ClimateZones), 1);
        assert_eq!(layer_count(&collection, ReferenceLayer::ManagementZones), 3);
        assert_eq!(layer_count(&collection, ReferenceLayer::ElevationContours), 2);
        assert_eq!(layer_count(&collection, ReferenceLayer::SlopeAnalysis), 3);
        assert_eq!(collection.features.len(), 16);
    }

    #[test]
    fn only_selected_layers_are_built() {
        let mut selection = LayerSelection::default();
        selection.set(ReferenceLayer::WaterSources, true);
        assert_eq!(selection.enabled(), vec![ReferenceLayer::WaterSources]);

        let collection = build_reference_layers(&farm_bbox(), &selection);
        assert_eq!(collection.features.len(), 4);
        assert_eq!(layer_count(&collection, ReferenceLayer::WaterSources), 4);
    }

    #[test]
    fn climate_zone_covers_buffered_extent() {
        let mut selection = LayerSelection::default();
        selection.set(ReferenceLayer::ClimateZones, true);
        let collection = build_reference_layers(&farm_bbox(), &selection);

        let geometry = collection.features[0].geometry.as_ref().unwrap();
        let polygon: Polygon<f64> = geometry.value.clone().try_into().unwrap();
        let rect = geo::BoundingRect::bounding_rect(&polygon).unwrap();
        assert!((rect.min().y - 40.39).abs() < 1e-9);
        assert!((rect.max().y - 40.46).abs() < 1e-9);
        assert!((rect.min().x - -3.76).abs() < 1e-9);
        assert!((rect.max().x - -3.69).abs() < 1e-9);
    }

    #[test]
    fn selection_deserializes_with_defaults() {
        let selection: LayerSelection =
            serde_yaml::from_str("water_sources: true\nslope_analysis: true\n").unwrap();
        assert!(selection.water_sources);
        assert!(selection.slope_analysis);
        assert!(!selection.climate_zones);
    }
}
