//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "./sanctuary.toml";
const ENV_PREFIX: &str = "SANCTUARY";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Falls back to the build-mode default when unset.
    #[serde(default)]
    pub level: Option<String>,

    /// File logging stays off when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_db_path() -> PathBuf {
    std::env::temp_dir().join("sanctuary.sqlite3")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# sanctuary configuration
# Every key can be overridden from the environment, e.g.
#   SANCTUARY__STORAGE__DB_PATH=/var/lib/sanctuary/content.sqlite3

[storage]
db_path = "./sanctuary.sqlite3"

[logging]
level = "info"  # trace, debug, info, warn, error
# Absolute directory for rolling log files; logging is off when omitted.
# dir = "/var/log/sanctuary"
"#
        .to_string()
    }
}
