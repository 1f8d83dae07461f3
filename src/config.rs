use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::KMeans;
use crate::models::{RecommendationSettings, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub recommendation: RecommendationConfig,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 5000 }

#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_data_dir")]
    pub dir: String,
    #[serde(default = "default_listings_file")]
    pub listings_file: String,
    #[serde(default = "default_income_file")]
    pub income_file: String,
    #[serde(default = "default_transport_file")]
    pub transport_file: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            listings_file: default_listings_file(),
            income_file: default_income_file(),
            transport_file: default_transport_file(),
        }
    }
}

fn default_data_dir() -> String { "data".to_string() }
fn default_listings_file() -> String { "real_estate.csv".to_string() }
fn default_income_file() -> String { "income.csv".to_string() }
fn default_transport_file() -> String { "transport.csv".to_string() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_amenity_bonus")]
    pub amenity_bonus: f64,
    #[serde(default = "default_proximity_penalty")]
    pub proximity_penalty: f64,
    #[serde(default = "default_family_bonus")]
    pub family_bonus: f64,
    #[serde(default = "default_family_size_threshold")]
    pub family_size_threshold: u32,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            amenity_bonus: default_amenity_bonus(),
            proximity_penalty: default_proximity_penalty(),
            family_bonus: default_family_bonus(),
            family_size_threshold: default_family_size_threshold(),
        }
    }
}

fn default_amenity_bonus() -> f64 { 0.1 }
fn default_proximity_penalty() -> f64 { 0.01 }
fn default_family_bonus() -> f64 { 0.05 }
fn default_family_size_threshold() -> u32 { 4 }

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            amenity_bonus: config.amenity_bonus,
            proximity_penalty: config.proximity_penalty,
            family_bonus: config.family_bonus,
            family_size_threshold: config.family_size_threshold,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationConfig {
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    #[serde(default = "default_cluster_count")]
    pub cluster_count: usize,
    #[serde(default = "default_min_candidates")]
    pub min_candidates_for_clustering: usize,
    #[serde(default = "default_n_init")]
    pub n_init: usize,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            max_suggestions: default_max_suggestions(),
            cluster_count: default_cluster_count(),
            min_candidates_for_clustering: default_min_candidates(),
            n_init: default_n_init(),
            max_iterations: default_max_iterations(),
            seed: default_seed(),
        }
    }
}

fn default_max_suggestions() -> usize { 5 }
fn default_cluster_count() -> usize { 3 }
fn default_min_candidates() -> usize { 3 }
fn default_n_init() -> usize { 10 }
fn default_max_iterations() -> usize { 300 }
fn default_seed() -> u64 { 42 }

impl RecommendationConfig {
    pub fn selection(&self) -> RecommendationSettings {
        RecommendationSettings {
            max_suggestions: self.max_suggestions,
            cluster_count: self.cluster_count,
            min_candidates_for_clustering: self.min_candidates_for_clustering,
        }
    }

    pub fn kmeans(&self) -> KMeans {
        KMeans::new(self.n_init, self.max_iterations, self.seed)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with AREA_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., AREA__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("AREA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("AREA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply un-prefixed environment overrides
///
/// `DATA_DIR` replaces `data.dir` when set.
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(data_dir) = std::env::var("DATA_DIR") {
        builder = builder.set_override("data.dir", data_dir)?;
    }

    builder.build()
}
