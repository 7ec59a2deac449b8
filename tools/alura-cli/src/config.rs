//! CLI configuration.

use std::path::{Path, PathBuf};

use alura_app::StorefrontConfig;
use alura_observability::LoggingConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["alura.toml", ".alura.toml", "alura.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storefront behavior.
    #[serde(default)]
    pub storefront: StorefrontConfig,

    /// Where the cart is kept between runs.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };

        config
            .storefront
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Find and load the nearest config file, walking up from `start`.
    pub fn discover(start: &Path) -> Result<Option<(PathBuf, Self)>> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    let config = Self::load(&candidate)?;
                    return Ok(Some((candidate, config)));
                }
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Storage backend for the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key in `dir`.
    #[default]
    File,
    /// Nothing is kept between runs.
    Memory,
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Storage directory, relative to the config file's directory.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".alura")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            dir: default_storage_dir(),
        }
    }
}

/// Generate a default alura.toml config file.
pub fn generate_default_config() -> String {
    r#"# Alura storefront configuration

[storefront]
storage_key = "aluraCart"
tax_rate_bps = 500          # 5%
flat_shipping_cents = 750   # $7.50
notification_display_ms = 3000
notification_fade_ms = 300
checkout_redirect_ms = 100
# catalog_path = "products.json"

[storage]
backend = "file"
dir = ".alura"

[logging]
level = "warn"
format = "human"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alura_observability::{LogFormat, LogLevel};

    #[test]
    fn test_generated_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.storefront, StorefrontConfig::default());
        assert_eq!(config.storage, StorageConfig::default());
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert_eq!(config.logging.format, LogFormat::Human);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.storefront.tax_rate_bps = 750;
        config.storage.backend = StorageBackend::Memory;

        for name in ["alura.toml", "alura.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(CliConfig::load(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join("alura.toml"),
            "[storefront]\nstorage_key = \"testCart\"\n",
        )
        .unwrap();

        let (path, config) = CliConfig::discover(&nested).unwrap().unwrap();
        assert_eq!(path, dir.path().join("alura.toml"));
        assert_eq!(config.storefront.storage_key, "testCart");
    }

    #[test]
    fn test_invalid_storefront_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alura.toml");
        std::fs::write(&path, "[storefront]\nstorage_key = \" \"\n").unwrap();
        assert!(CliConfig::load(&path).is_err());
    }
}
