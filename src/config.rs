use crate::error::{Result, SoilZonesError};
use crate::layers::LayerSelection;
use dialoguer::{Input, Select};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub soilgrids: SoilGridsConfig,
    pub synthetic: SyntheticConfig,
    pub layers: LayerSelection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Synthetic,
    #[value(name = "soilgrids")]
    SoilGrids,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Synthetic => "synthetic",
            SourceKind::SoilGrids => "soilgrids",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub sample_points: usize,
    /// Fixed seed for reproducible sampling and synthetic data.
    pub seed: Option<u64>,
    pub source: SourceKind,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_points: 12,
            seed: None,
            source: SourceKind::Synthetic,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SoilGridsConfig {
    pub base_url: String,
    /// Depth interval label, e.g. "0-5cm" or "5-15cm".
    pub depth: String,
    pub timeout_secs: u64,
}

impl Default for SoilGridsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://rest.isric.org/soilgrids/v2.0/properties/query".into(),
            depth: "0-5cm".into(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SyntheticConfig {
    /// Probability that any single property is left unmeasured.
    pub missing_rate: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self { missing_rate: 0.05 }
    }
}

const SOILGRIDS_DEPTHS: [&str; 6] = [
    "0-5cm", "5-15cm", "15-30cm", "30-60cm", "60-100cm", "100-200cm",
];

impl Config {
    /// Load from an explicit path or the standard locations.
    ///
    /// A missing file is not an error when no override is given; the
    /// defaults run the synthetic source.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(SoilZonesError::Config(format!(
                        "Config file not found at {:?}. Run `soilzones init` to set up.",
                        p
                    )));
                }
                p
            }
            None => {
                let p = Self::find_config_path()?;
                if !p.exists() {
                    tracing::debug!("No config at {:?}, using defaults", p);
                    return Ok(Self::default());
                }
                p
            }
        };

        tracing::debug!("Loading config from {:?}", config_path);
        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| SoilZonesError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    /// Parse YAML after `${VAR}` substitution, then validate.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| SoilZonesError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.analysis.sample_points == 0 {
            return Err(SoilZonesError::Config(
                "analysis.sample_points must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.synthetic.missing_rate) {
            return Err(SoilZonesError::Config(format!(
                "synthetic.missing_rate must be between 0 and 1, got {}",
                self.synthetic.missing_rate
            )));
        }
        if self.soilgrids.timeout_secs == 0 {
            return Err(SoilZonesError::Config(
                "soilgrids.timeout_secs must be positive".into(),
            ));
        }
        if !SOILGRIDS_DEPTHS.contains(&self.soilgrids.depth.as_str()) {
            return Err(SoilZonesError::Config(format!(
                "soilgrids.depth '{}' is not one of {}",
                self.soilgrids.depth,
                SOILGRIDS_DEPTHS.join(", ")
            )));
        }
        Ok(())
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        Self::default_config_path()
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/soilzones/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SoilZonesError::Config("Cannot determine config directory".into()))?
            .join("soilzones");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive(target: Option<PathBuf>) -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up soilzones!");
        println!();

        println!("Analysis");
        let sample_points: usize = Input::new()
            .with_prompt("  Sample points per farm")
            .default(12)
            .interact_text()
            .map_err(|e| SoilZonesError::Config(format!("Input error: {}", e)))?;

        let sources = [SourceKind::Synthetic, SourceKind::SoilGrids];
        let source_idx = Select::new()
            .with_prompt("  Soil data source")
            .items(&["Synthetic (offline demo data)", "ISRIC SoilGrids"])
            .default(0)
            .interact()
            .map_err(|e| SoilZonesError::Config(format!("Input error: {}", e)))?;
        let source = sources[source_idx];

        println!();

        let mut soilgrids = SoilGridsConfig::default();
        if source == SourceKind::SoilGrids {
            println!("SoilGrids");
            let depth_idx = Select::new()
                .with_prompt("  Depth interval")
                .items(&SOILGRIDS_DEPTHS)
                .default(0)
                .interact()
                .map_err(|e| SoilZonesError::Config(format!("Input error: {}", e)))?;
            soilgrids.depth = SOILGRIDS_DEPTHS[depth_idx].to_string();

            soilgrids.timeout_secs = Input::new()
                .with_prompt("  Request timeout (seconds)")
                .default(30)
                .interact_text()
                .map_err(|e| SoilZonesError::Config(format!("Input error: {}", e)))?;
            println!();
        }

        let config = Config {
            analysis: AnalysisConfig {
                sample_points,
                seed: None,
                source,
            },
            soilgrids,
            ..Default::default()
        };
        config.validate()?;

        let config_path = match target {
            Some(p) => p,
            None => Self::default_config_path()?,
        };
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| SoilZonesError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# soilzones configuration\n# Generated by `soilzones init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| SoilZonesError::Config(format!("Bad substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.analysis.sample_points, 12);
        assert_eq!(config.analysis.source, SourceKind::Synthetic);
        assert_eq!(config.analysis.seed, None);
        assert_eq!(config.soilgrids.depth, "0-5cm");
        assert_eq!(config.soilgrids.timeout_secs, 30);
        assert!(!config.layers.any());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let yaml = r#"
analysis:
  sample_points: 25
  source: soilgrids
soilgrids:
  depth: 5-15cm
layers:
  water_sources: true
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.analysis.sample_points, 25);
        assert_eq!(config.analysis.source, SourceKind::SoilGrids);
        assert_eq!(config.soilgrids.depth, "5-15cm");
        assert_eq!(config.soilgrids.timeout_secs, 30);
        assert!(config.layers.water_sources);
        assert!(!config.layers.slope_analysis);
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("SOILZONES_TEST_SEED", "4242");
        let config = Config::from_yaml("analysis:\n  seed: ${SOILZONES_TEST_SEED}\n").unwrap();
        assert_eq!(config.analysis.seed, Some(4242));
    }

    #[test]
    fn unset_env_vars_are_left_in_place() {
        let out = Config::substitute_env_vars("url: ${SOILZONES_SURELY_UNSET_VAR}").unwrap();
        assert_eq!(out, "url: ${SOILZONES_SURELY_UNSET_VAR}");
    }

    #[test]
    fn zero_sample_points_rejected() {
        let err = Config::from_yaml("analysis:\n  sample_points: 0\n").unwrap_err();
        assert!(matches!(err, SoilZonesError::Config(_)));
    }

    #[test]
    fn bad_missing_rate_rejected() {
        assert!(Config::from_yaml("synthetic:\n  missing_rate: 1.5\n").is_err());
    }

    #[test]
    fn unknown_depth_rejected() {
        assert!(Config::from_yaml("soilgrids:\n  depth: 0-10cm\n").is_err());
    }

    #[test]
    fn unknown_source_rejected() {
        assert!(Config::from_yaml("analysis:\n  source: satellite\n").is_err());
    }

    #[test]
    fn missing_override_file_is_an_error() {
        let missing = PathBuf::from("/nonexistent/soilzones/config.yaml");
        assert!(!Config::exists(Some(&missing)));
        assert!(Config::load(Some(missing)).is_err());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("soilzones-config-{}.yaml", std::process::id()));
        std::fs::write(&path, "analysis:\n  sample_points: 7\n").unwrap();
        let config = Config::load(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.analysis.sample_points, 7);
    }

    #[test]
    fn serialized_config_round_trips() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = Config::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.analysis.sample_points, config.analysis.sample_points);
        assert_eq!(parsed.soilgrids.base_url, config.soilgrids.base_url);
    }
}
