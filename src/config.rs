use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::fs;
use anyhow::{Context, Result};
use tracing::warn;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct InputConfig {
    pub businesses: PathBuf,
    pub neighborhoods: PathBuf, // .geojson/.json or .shp
    pub name_column: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            businesses: PathBuf::from("data/all_businesses.geojson"),
            neighborhoods: PathBuf::from("data/Haifa GeoJSON.geojson"),
            name_column: "SchName".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub neighborhood_data: PathBuf,
    pub node_dataset: PathBuf,
    pub neighborhood_geopoints: PathBuf,
    pub bi_dataset: PathBuf,
    pub write_node_dataset: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            neighborhood_data: PathBuf::from("neighborhood_data"),
            node_dataset: PathBuf::from("node_dataset.csv"),
            neighborhood_geopoints: PathBuf::from("neighborhood_geopoints"),
            bi_dataset: PathBuf::from("Haifa_dataset_to_BI.txt"),
            write_node_dataset: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMethod {
    Linear,
    /// ln(share + epsilon) against diversity
    #[default]
    Log,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AnalysisConfig {
    pub correlation: CorrelationMethod,
    pub epsilon: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            correlation: CorrelationMethod::Log,
            epsilon: 1e-6,
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to the built-in file layout.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            warn!(?path, "Config file not found, using default paths");
            Ok(Self::default())
        }
    }
}
