use super::SoilPropertySource;
use crate::error::Result;
use crate::models::{Coordinate, SoilProperty, SoilPropertyRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generates plausible soil readings for demos and offline runs.
///
/// Readings are derived from the seed and the coordinate, so the same point
/// always gets the same record regardless of fetch order. Each property is
/// dropped with probability `missing_rate` to mimic gaps in survey data.
pub struct SyntheticSoilSource {
    seed: u64,
    missing_rate: f64,
}

impl SyntheticSoilSource {
    pub fn new(seed: Option<u64>, missing_rate: f64) -> Self {
        Self {
            seed: seed.unwrap_or_else(rand::random),
            missing_rate: if missing_rate.is_finite() {
                missing_rate.clamp(0.0, 1.0)
            } else {
                0.0
            },
        }
    }

    fn rng_for(&self, coordinate: Coordinate) -> StdRng {
        let mixed = self.seed
            ^ coordinate.lat.to_bits().rotate_left(17)
            ^ coordinate.lon.to_bits().rotate_left(41);
        StdRng::seed_from_u64(mixed)
    }

    pub fn generate(&self, coordinate: Coordinate) -> SoilPropertyRecord {
        let mut rng = self.rng_for(coordinate);

        let clay: f64 = rng.gen_range(5.0..55.0);
        let sand: f64 = rng.gen_range(10.0..(95.0 - clay).max(10.5));
        let silt = (100.0 - clay - sand).max(0.0);
        let organic_carbon: f64 = rng.gen_range(2.0..30.0);
        // C:N ratios of roughly 8-12 are typical for agricultural topsoil.
        let nitrogen = organic_carbon / rng.gen_range(8.0..12.0);

        let readings = [
            (SoilProperty::Ph, rng.gen_range(4.5..8.5)),
            (SoilProperty::OrganicCarbon, organic_carbon),
            (SoilProperty::Clay, clay),
            (SoilProperty::Sand, sand),
            (SoilProperty::Silt, silt),
            (SoilProperty::Nitrogen, nitrogen),
            (SoilProperty::CationExchangeCapacity, rng.gen_range(5.0..35.0)),
            (SoilProperty::BulkDensity, rng.gen_range(1.1..1.7)),
        ];

        let mut record = SoilPropertyRecord::new();
        for (property, value) in readings {
            if !rng.gen_bool(self.missing_rate) {
                record.set(property, Some(round_to(value, 2)));
            }
        }
        record
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

impl SoilPropertySource for SyntheticSoilSource {
    fn name(&self) -> &str {
        "Synthetic"
    }

    async fn fetch(&self, coordinate: Coordinate) -> Result<SoilPropertyRecord> {
        Ok(self.generate(coordinate))
    }
}
