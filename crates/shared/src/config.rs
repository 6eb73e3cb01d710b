//! Configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinageConfig {
    /// Currency registry configuration.
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// Where the currency registry reads its bootstrap data from.
///
/// With every field unset the registry uses the dataset compiled into
/// `coinage-core`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Replaces the bundled currency list (`CODE,NUMERIC,DECIMAL_PLACES`).
    pub currency_file: Option<PathBuf>,
    /// Replaces the bundled country list (`CC,CODE`).
    pub country_file: Option<PathBuf>,
    /// Additional currencies registered after the base data.
    pub currency_extension_file: Option<PathBuf>,
    /// Additional country mappings registered after the base data.
    pub country_extension_file: Option<PathBuf>,
}

impl RegistryConfig {
    /// Returns true if any data source differs from the bundled dataset.
    #[must_use]
    pub fn is_customized(&self) -> bool {
        self.currency_file.is_some()
            || self.country_file.is_some()
            || self.currency_extension_file.is_some()
            || self.country_extension_file.is_some()
    }
}

impl CoinageConfig {
    /// Loads configuration from config files and the environment.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `COINAGE__*` environment variables (e.g.
    /// `COINAGE__REGISTRY__CURRENCY_FILE`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("COINAGE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
