use crate::config::SourceKind;
use crate::layers::ReferenceLayer;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "soilzones", version, about = "Farm soil quality zoning")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sample a farm boundary and classify its soil
    Analyze {
        /// GeoJSON file with the farm polygon(s)
        boundary: PathBuf,

        /// Number of sample points
        #[arg(short, long)]
        points: Option<usize>,

        /// Seed for reproducible sampling
        #[arg(short, long)]
        seed: Option<u64>,

        /// Soil data source
        #[arg(long, value_enum)]
        source: Option<SourceKind>,

        /// Write classified points as GeoJSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Emit reference layers around a farm boundary
    Layers {
        /// GeoJSON file with the farm polygon(s)
        boundary: PathBuf,

        /// Enable a layer in addition to those in config (repeatable)
        #[arg(short, long, value_enum)]
        enable: Vec<ReferenceLayer>,

        /// Enable every layer
        #[arg(long)]
        all: bool,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run interactive setup
    Init,
    /// Validate config and test the soil data source
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_analyze_flags() {
        let cli = Cli::parse_from([
            "soilzones",
            "-vv",
            "analyze",
            "farm.geojson",
            "--points",
            "20",
            "--seed",
            "7",
            "--source",
            "soilgrids",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Analyze {
                boundary,
                points,
                seed,
                source,
                output,
            } => {
                assert_eq!(boundary, PathBuf::from("farm.geojson"));
                assert_eq!(points, Some(20));
                assert_eq!(seed, Some(7));
                assert_eq!(source, Some(SourceKind::SoilGrids));
                assert!(output.is_none());
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn parses_repeated_layers() {
        let cli = Cli::parse_from([
            "soilzones",
            "layers",
            "farm.geojson",
            "-e",
            "water-sources",
            "-e",
            "slope-analysis",
        ]);
        match cli.command {
            Commands::Layers { enable, all, .. } => {
                assert_eq!(
                    enable,
                    vec![ReferenceLayer::WaterSources, ReferenceLayer::SlopeAnalysis]
                );
                assert!(!all);
            }
            _ => panic!("expected layers"),
        }
    }
}
