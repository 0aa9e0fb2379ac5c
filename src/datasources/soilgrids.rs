use super::SoilPropertySource;
use crate::config::SoilGridsConfig;
use crate::error::{Result, SoilZonesError};
use crate::models::{Coordinate, SoilProperty, SoilPropertyRecord};
use serde::Deserialize;
use std::time::Duration;

/// SoilGrids layer names; each resolves through [`SoilProperty::from_str`].
const LAYERS: [&str; 8] = [
    "phh2o", "soc", "clay", "sand", "silt", "nitrogen", "cec", "bdod",
];

// Probe point for `test_connection` (central Spain).
const PROBE: Coordinate = Coordinate {
    lat: 40.4637,
    lon: -3.7492,
};

pub struct SoilGridsClient {
    client: reqwest::Client,
    config: SoilGridsConfig,
}

// SoilGrids v2 properties/query response structures
#[derive(Debug, Deserialize)]
struct SgResponse {
    properties: SgProperties,
}

#[derive(Debug, Deserialize)]
struct SgProperties {
    #[serde(default)]
    layers: Vec<SgLayer>,
}

#[derive(Debug, Deserialize)]
struct SgLayer {
    name: String,
    unit_measure: SgUnitMeasure,
    #[serde(default)]
    depths: Vec<SgDepth>,
}

#[derive(Debug, Deserialize)]
struct SgUnitMeasure {
    d_factor: f64,
}

#[derive(Debug, Deserialize)]
struct SgDepth {
    label: String,
    values: SgValues,
}

#[derive(Debug, Deserialize)]
struct SgValues {
    #[serde(default)]
    mean: Option<f64>,
}

impl SoilGridsClient {
    pub fn new(config: SoilGridsConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn query_url(&self, coordinate: Coordinate) -> String {
        let properties: Vec<String> = LAYERS
            .iter()
            .map(|name| format!("property={}", name))
            .collect();

        format!(
            "{}?lon={}&lat={}&{}&depth={}&value=mean",
            self.config.base_url,
            coordinate.lon,
            coordinate.lat,
            properties.join("&"),
            self.config.depth
        )
    }

    fn convert_response(&self, response: SgResponse) -> SoilPropertyRecord {
        let mut record = SoilPropertyRecord::new();

        for layer in response.properties.layers {
            let Some(property) = SoilProperty::from_str(&layer.name) else {
                continue;
            };

            if layer.unit_measure.d_factor == 0.0 {
                tracing::warn!("SoilGrids layer {} has zero d_factor, skipping", layer.name);
                continue;
            }

            let mean = layer
                .depths
                .iter()
                .find(|d| d.label == self.config.depth)
                .and_then(|d| d.values.mean);

            // Dividing by d_factor yields the conventional unit
            // (pH, g/kg, %, cmol/kg, g/cm³), which is what records hold.
            record.set(property, mean.map(|raw| raw / layer.unit_measure.d_factor));
        }

        record
    }

    pub async fn test_connection(&self) -> Result<bool> {
        let response = self
            .client
            .get(self.query_url(PROBE))
            .send()
            .await
            .map_err(|e| SoilZonesError::DataSourceUnavailable(format!("SoilGrids: {}", e)))?;

        Ok(response.status().is_success())
    }
}

impl SoilPropertySource for SoilGridsClient {
    fn name(&self) -> &str {
        "ISRIC SoilGrids"
    }

    async fn fetch(&self, coordinate: Coordinate) -> Result<SoilPropertyRecord> {
        let url = self.query_url(coordinate);
        tracing::debug!("Fetching SoilGrids properties: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SoilZonesError::DataSourceUnavailable(format!("SoilGrids: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SoilZonesError::DataSourceUnavailable(format!(
                "SoilGrids returned {}: {}",
                status, body
            )));
        }

        let sg_response: SgResponse = response.json().await.map_err(|e| {
            SoilZonesError::DataSourceUnavailable(format!(
                "Failed to parse SoilGrids response: {}",
                e
            ))
        })?;

        Ok(self.convert_response(sg_response))
    }
}
