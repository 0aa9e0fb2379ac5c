use clap::Parser;
use soilzones::cli::{Cli, Commands};
use soilzones::config::Config;
use soilzones::datasources::ConfiguredSource;
use soilzones::error::{Result, SoilZonesError};
use soilzones::layers::{build_reference_layers, LayerSelection, ReferenceLayer};
use soilzones::logic::FarmAnalyzer;
use soilzones::models::FarmBoundary;
use soilzones::report;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init => {
            Config::setup_interactive(cli.config)?;
            Ok(())
        }
        Commands::Check => check(cli.config).await,
        Commands::Analyze {
            boundary,
            points,
            seed,
            source,
            output,
        } => {
            let mut config = Config::load(cli.config)?;
            if let Some(points) = points {
                config.analysis.sample_points = points;
            }
            if seed.is_some() {
                config.analysis.seed = seed;
            }
            if let Some(source) = source {
                config.analysis.source = source;
            }
            config.validate()?;

            analyze(&config, &boundary, output.as_deref()).await
        }
        Commands::Layers {
            boundary,
            enable,
            all,
            output,
        } => {
            let config = Config::load(cli.config)?;
            let mut selection = if all {
                LayerSelection::all()
            } else {
                config.layers
            };
            for layer in enable {
                selection.set(layer, true);
            }

            layers(&boundary, &selection, output.as_deref())
        }
    }
}

async fn analyze(config: &Config, boundary_path: &Path, output: Option<&Path>) -> Result<()> {
    let boundary = FarmBoundary::from_geojson_file(boundary_path)?;
    tracing::info!(
        "Loaded boundary with {} part(s), {:.1} ha",
        boundary.part_count(),
        boundary.area_hectares()
    );

    let source = ConfiguredSource::from_config(config)?;
    let analyzer = FarmAnalyzer::new(source, &config.analysis);
    let analysis = analyzer.analyze(&boundary).await;

    if analysis.results.is_empty() {
        tracing::warn!("No sample point could be analysed");
    }

    print!("{}", report::render_summary(&analysis));

    if let Some(path) = output {
        let collection = report::analysis_to_geojson(&analysis)?;
        report::write_geojson(collection, path)?;
        println!();
        println!("Results written to {}", path.display());
    }

    Ok(())
}

fn layers(boundary_path: &Path, selection: &LayerSelection, output: Option<&Path>) -> Result<()> {
    if !selection.any() {
        tracing::warn!(
            "No reference layers enabled; use --enable or --all (available: {})",
            ReferenceLayer::ALL
                .iter()
                .map(|l| l.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let boundary = FarmBoundary::from_geojson_file(boundary_path)?;
    let bbox = boundary
        .bounding_box()
        .ok_or_else(|| SoilZonesError::InvalidBoundary("boundary has no extent".into()))?;

    let collection = build_reference_layers(&bbox, selection);
    tracing::info!("Built {} reference features", collection.features.len());

    match output {
        Some(path) => report::write_geojson(collection, path),
        None => {
            let geojson = geojson::GeoJson::FeatureCollection(collection);
            println!("{}", serde_json::to_string_pretty(&geojson)?);
            Ok(())
        }
    }
}

async fn check(config_override: Option<PathBuf>) -> Result<()> {
    let found = Config::exists(config_override.as_ref());
    let config = Config::load(config_override)?;
    if found {
        println!("Config: OK");
    } else {
        println!("Config: not found, using defaults");
    }
    println!(
        "  source={} sample_points={} seed={}",
        config.analysis.source,
        config.analysis.sample_points,
        config
            .analysis
            .seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "random".into())
    );

    let source = ConfiguredSource::from_config(&config)?;
    match source.test_connection().await {
        Ok(true) => println!("Soil source: OK"),
        Ok(false) => println!("Soil source: FAILED"),
        Err(e) => println!("Soil source: ERROR ({})", e),
    }

    Ok(())
}
