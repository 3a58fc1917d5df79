use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::logging::LoggingConfig;
use crate::core::relationship_graph::{CacheConfig, LayoutConfig, LayoutError, PaletteConfig};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid layout config: {0}")]
    InvalidLayout(#[from] LayoutError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Force simulation constants.
    pub layout: LayoutConfig,
    /// Edge colors.
    pub palette: PaletteConfig,
    /// Memo cache sizing.
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

impl GraphConfig {
    /// Parse and validate a TOML document. Missing sections use defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.layout.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file.
    pub fn try_load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load configuration from `path`.
    /// Returns `Default` if the file is missing, unparseable or invalid.
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(config) => {
                log::info!("Loaded graph config from {}", path.display());
                config
            }
            Err(ConfigError::Io { .. }) => {
                log::debug!("No config file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!(
                    "Ignoring config at {}: {e}; using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Load configuration from `~/.config/oc-relgraph/config.toml`.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("oc-relgraph").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
