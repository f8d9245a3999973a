//! Configuration loading and resolution
//!
//! Tuning knobs for the catalog client and ingestion pipeline. Resolution
//! follows a fixed priority order:
//! 1. Command-line argument (highest priority)
//! 2. `MIXCUE_CONFIG` environment variable
//! 3. Platform config file (`<config dir>/mixcue/config.toml`)
//! 4. Compiled defaults (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a config file to load
pub const CONFIG_ENV_VAR: &str = "MIXCUE_CONFIG";

/// Catalog client and pipeline configuration
///
/// All fields have workable defaults; a config file may set any subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL of the remote catalog service
    pub base_url: String,
    /// Storefront used for catalog detail lookups
    pub storefront: String,
    /// Maximum identifiers returned per library listing page
    pub listing_page_limit: usize,
    /// Maximum identifiers accepted per catalog detail request
    pub detail_batch_limit: usize,
    /// Upper bound on concurrent detail requests (worker cap)
    pub max_concurrent_fetches: usize,
    /// Remote request budget, requests per second
    pub requests_per_second: u32,
    /// Total per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.music.apple.com".to_string(),
            storefront: "us".to_string(),
            listing_page_limit: 100,
            detail_batch_limit: 300,
            max_concurrent_fetches: 10,
            requests_per_second: 10,
            request_timeout_secs: 15,
            connect_timeout_secs: 5,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from a specific TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("cannot parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve configuration following the priority order above
    pub fn resolve(cli_path: Option<&Path>) -> Result<Self> {
        // Priority 1: command-line argument
        if let Some(path) = cli_path {
            return Self::from_file(path);
        }

        // Priority 2: environment variable
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }

        // Priority 3: platform config file, if present
        if let Some(path) = default_config_path() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        // Priority 4: compiled defaults
        Ok(Self::default())
    }

    fn validate(&self) -> Result<()> {
        if self.listing_page_limit == 0 {
            return Err(Error::Config("listing_page_limit must be positive".into()));
        }
        if self.detail_batch_limit == 0 {
            return Err(Error::Config("detail_batch_limit must be positive".into()));
        }
        if self.max_concurrent_fetches == 0 {
            return Err(Error::Config("max_concurrent_fetches must be positive".into()));
        }
        if self.requests_per_second == 0 {
            return Err(Error::Config("requests_per_second must be positive".into()));
        }
        Ok(())
    }
}

/// Platform config file path (`<config dir>/mixcue/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mixcue").join("config.toml"))
}
