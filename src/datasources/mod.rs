pub mod soilgrids;
pub mod synthetic;

pub use soilgrids::SoilGridsClient;
pub use synthetic::SyntheticSoilSource;

use crate::config::{Config, SourceKind};
use crate::error::Result;
use crate::models::{Coordinate, SoilPropertyRecord};

/// Supplies raw soil readings for a coordinate.
///
/// A failed fetch only excludes that point from an analysis.
#[allow(async_fn_in_trait)]
pub trait SoilPropertySource {
    fn name(&self) -> &str;

    async fn fetch(&self, coordinate: Coordinate) -> Result<SoilPropertyRecord>;
}

/// Source selected at runtime from configuration.
pub enum ConfiguredSource {
    SoilGrids(SoilGridsClient),
    Synthetic(SyntheticSoilSource),
}

impl ConfiguredSource {
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.analysis.source {
            SourceKind::SoilGrids => {
                tracing::info!("Using SoilGrids at {}", config.soilgrids.base_url);
                Ok(Self::SoilGrids(SoilGridsClient::new(config.soilgrids.clone())?))
            }
            SourceKind::Synthetic => {
                tracing::info!("Using synthetic soil data - results are illustrative only");
                Ok(Self::Synthetic(SyntheticSoilSource::new(
                    config.analysis.seed,
                    config.synthetic.missing_rate,
                )))
            }
        }
    }

    /// Probe the source with a single request.
    pub async fn test_connection(&self) -> Result<bool> {
        match self {
            Self::SoilGrids(client) => client.test_connection().await,
            Self::Synthetic(_) => Ok(true),
        }
    }
}

impl SoilPropertySource for ConfiguredSource {
    fn name(&self) -> &str {
        match self {
            Self::SoilGrids(client) => client.name(),
            Self::Synthetic(source) => source.name(),
        }
    }

    async fn fetch(&self, coordinate: Coordinate) -> Result<SoilPropertyRecord> {
        match self {
            Self::SoilGrids(client) => client.fetch(coordinate).await,
            Self::Synthetic(source) => source.fetch(coordinate).await,
        }
    }
}
