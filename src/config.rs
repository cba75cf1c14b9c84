//! Configuration file support for ppi-network
//!
//! This module handles parsing `.ppi-network.toml` configuration files that
//! point the client at a STRING mirror, tune the layout, and pick the node
//! styling. Every key is optional; missing keys fall back to the public
//! service, human proteins and high-confidence interactions.
//!
//! ## Configuration File Format
//!
//! ```toml
//! # .ppi-network.toml
//!
//! [string_db]
//! base_url = "https://string-db.org/api"
//! # NCBI taxonomy id (9606 = human)
//! species = 9606
//! # Minimum combined score out of 1000
//! required_score = 900
//! # Give up on STRING after this many seconds (default: wait forever)
//! timeout_secs = 30
//!
//! [layout]
//! seed = 42
//! iterations = 300
//!
//! [chart]
//! node_size = 15
//! # "degree" colors nodes by connection count, "placeholder" colors all 0
//! node_color = "degree"
//!
//! [server]
//! port = 3000
//! default_proteins = "TP53, BRCA1, EGFR"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::chart::{ChartOptions, DEFAULT_NODE_SIZE, NodeColoring};
use crate::layout::{DEFAULT_ITERATIONS, DEFAULT_SEED, LayoutParams};
use crate::string_db::{HIGH_CONFIDENCE, HUMAN_SPECIES, STRING_API_URL};

/// Errors that can occur when loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// STRING endpoint and query scope
#[derive(Debug, Clone, Deserialize)]
pub struct StringDbConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// NCBI taxonomy id of the organism
    #[serde(default = "default_species")]
    pub species: u32,

    /// Minimum combined score (0..=1000) STRING applies server-side
    #[serde(default = "default_required_score")]
    pub required_score: u32,

    /// Request timeout; `None` waits indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    STRING_API_URL.to_string()
}

fn default_species() -> u32 {
    HUMAN_SPECIES
}

fn default_required_score() -> u32 {
    HIGH_CONFIDENCE
}

impl Default for StringDbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            species: default_species(),
            required_score: default_required_score(),
            timeout_secs: None,
        }
    }
}

impl StringDbConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Layout configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_iterations() -> usize {
    DEFAULT_ITERATIONS
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            iterations: default_iterations(),
        }
    }
}

impl LayoutConfig {
    pub fn params(&self) -> LayoutParams {
        LayoutParams {
            seed: self.seed,
            iterations: self.iterations,
        }
    }
}

/// Chart configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_node_size")]
    pub node_size: f64,

    #[serde(default)]
    pub node_color: NodeColoring,
}

fn default_node_size() -> f64 {
    DEFAULT_NODE_SIZE
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            node_size: default_node_size(),
            node_color: NodeColoring::default(),
        }
    }
}

impl ChartConfig {
    pub fn options(&self) -> ChartOptions {
        ChartOptions {
            node_size: self.node_size,
            node_color: self.node_color,
        }
    }
}

/// Web server configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Text pre-filled in the protein input field
    #[serde(default = "default_proteins")]
    pub default_proteins: String,
}

fn default_port() -> u16 {
    3000
}

fn default_proteins() -> String {
    "TP53, BRCA1, EGFR".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
            default_proteins: default_proteins(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PpiConfig {
    #[serde(default)]
    pub string_db: StringDbConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub server: ServerSettings,
}

impl PpiConfig {
    /// Reject values that parse but cannot work
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.string_db.required_score > 1000 {
            return Err(ConfigError::Invalid(format!(
                "required_score must be at most 1000, got {}",
                self.string_db.required_score
            )));
        }
        if self.string_db.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".into()));
        }
        if self.layout.iterations == 0 {
            return Err(ConfigError::Invalid(
                "layout iterations must be positive".into(),
            ));
        }
        if !(self.chart.node_size.is_finite() && self.chart.node_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "node_size must be a positive number, got {}",
                self.chart.node_size
            )));
        }
        Ok(())
    }
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str) -> Result<PpiConfig, ConfigError> {
    let config: PpiConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load a specific configuration file
pub fn load_config_file(path: &Path) -> Result<PpiConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Load configuration for the given directory
///
/// Searches for `.ppi-network.toml` in the given directory and parent
/// directories. No file found means defaults.
pub fn load_config(start_path: &Path) -> Result<PpiConfig, ConfigError> {
    match find_config_file(start_path) {
        Some(path) => load_config_file(&path),
        None => Ok(PpiConfig::default()),
    }
}

/// Find the config file by searching up the directory tree
pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
    let config_names = [".ppi-network.toml", "ppi-network.toml"];

    let mut current = if start_path.is_file() {
        start_path.parent()?.to_path_buf()
    } else {
        start_path.to_path_buf()
    };

    loop {
        for name in &config_names {
            let config_path = current.join(name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // Move to parent directory
        if let Some(parent) = current.parent() {
            current = parent.to_path_buf();
        } else {
            break;
        }
    }

    None
}
