use crate::error::{Result, SoilZonesError};
use geo::{BoundingRect, Contains, GeodesicArea, Geometry, MultiPolygon, Point, Polygon};
use geojson::GeoJson;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A (latitude, longitude) pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lat: {:.4}, Lon: {:.4}", self.lat, self.lon)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn lat_range(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lon_range(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Map zoom level that frames the box.
    pub fn suggested_zoom(&self) -> u8 {
        let max_range = self.lat_range().max(self.lon_range());
        if max_range > 0.5 {
            10
        } else if max_range > 0.1 {
            12
        } else if max_range > 0.01 {
            14
        } else {
            16
        }
    }

    /// Grows each side by `fraction` of the box extent on that axis.
    pub fn buffered(&self, fraction: f64) -> Self {
        let lat_buffer = self.lat_range() * fraction;
        let lon_buffer = self.lon_range() * fraction;
        Self {
            min_lon: self.min_lon - lon_buffer,
            min_lat: self.min_lat - lat_buffer,
            max_lon: self.max_lon + lon_buffer,
            max_lat: self.max_lat + lat_buffer,
        }
    }

    pub fn is_finite(&self) -> bool {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Farm boundary as one or more polygons in (lon, lat) order.
#[derive(Debug, Clone, PartialEq)]
pub struct FarmBoundary {
    polygons: MultiPolygon<f64>,
}

impl FarmBoundary {
    pub fn new(polygons: MultiPolygon<f64>) -> Self {
        Self { polygons }
    }

    pub fn from_polygon(polygon: Polygon<f64>) -> Self {
        Self::new(MultiPolygon::new(vec![polygon]))
    }

    pub fn from_geojson_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_geojson_str(&content)
    }

    pub fn from_geojson_str(content: &str) -> Result<Self> {
        let geojson: GeoJson = content.parse()?;
        Self::from_geojson(&geojson)
    }

    /// Merges every Polygon and MultiPolygon found in the document; other
    /// geometry types are ignored.
    pub fn from_geojson(geojson: &GeoJson) -> Result<Self> {
        let collection: geo::GeometryCollection<f64> = geojson::quick_collection(geojson)?;

        let mut polygons = Vec::new();
        for geometry in collection {
            match geometry {
                Geometry::Polygon(polygon) => polygons.push(polygon),
                Geometry::MultiPolygon(multi) => polygons.extend(multi),
                other => {
                    tracing::debug!("Ignoring non-polygonal boundary geometry: {:?}", other);
                }
            }
        }

        if polygons.is_empty() {
            return Err(SoilZonesError::InvalidBoundary(
                "no Polygon or MultiPolygon geometry found".into(),
            ));
        }

        Ok(Self::new(MultiPolygon::new(polygons)))
    }

    pub fn polygons(&self) -> &MultiPolygon<f64> {
        &self.polygons
    }

    pub fn part_count(&self) -> usize {
        self.polygons.0.len()
    }

    /// `None` for a boundary with no coordinates.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.polygons.bounding_rect().map(|rect| BoundingBox {
            min_lon: rect.min().x,
            min_lat: rect.min().y,
            max_lon: rect.max().x,
            max_lat: rect.max().y,
        })
    }

    /// Strict interior test; points on an edge are outside.
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.polygons.contains(&coord.to_point())
    }

    pub fn area_hectares(&self) -> f64 {
        self.polygons.geodesic_area_unsigned() / 10_000.0
    }
}
