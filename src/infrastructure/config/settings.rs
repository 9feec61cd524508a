//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the Telegram bot token comes from
//! the `TELEGRAM_BOT_TOKEN` environment variable only.
//!
//! # Example
//!
//! ```no_run
//! use floatarb::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;

use super::logging::LoggingConfig;
use super::matching::MatchingConfig;
use super::schedule::ScheduleConfig;
use super::telegram::TelegramAppConfig;
use crate::adapter::outbound::catalog::CatalogItem;
use crate::adapter::outbound::csmoney::{CsmoneyConfig, CsmoneyWikiConfig};
use crate::adapter::outbound::http::HttpConfig;
use crate::adapter::outbound::steam::SteamConfig;
use crate::application::pipeline::OutputKind;
use crate::error::{ConfigError, Result};

/// Stream settings shared by every pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Buffer size of the fetch and result streams.
    #[serde(default = "default_stream_capacity")]
    pub stream_capacity: usize,
}

const fn default_stream_capacity() -> usize {
    64
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stream_capacity: default_stream_capacity(),
        }
    }
}

/// Per-marketplace endpoints and paging.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketsConfig {
    #[serde(default)]
    pub csmoney: CsmoneyConfig,
    #[serde(default)]
    pub csmoney_wiki: CsmoneyWikiConfig,
    #[serde(default)]
    pub steam: SteamConfig,
}

fn default_catalog_path() -> Option<PathBuf> {
    Some(PathBuf::from("catalog.json"))
}

/// Items the scheduled search draws from.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// JSON file holding recorded items. An empty path keeps them in memory.
    #[serde(default = "default_catalog_path")]
    pub path: Option<PathBuf>,
    /// Seed items merged into the stored catalog on start.
    #[serde(default)]
    pub items: Vec<CatalogItem>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            items: Vec::new(),
        }
    }
}

impl CatalogConfig {
    /// Configured file, if persistence is enabled.
    #[must_use]
    pub fn file(&self) -> Option<&Path> {
        self.path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

/// Main application configuration.
///
/// Every section is optional. Load from a TOML file using [`Config::load`] or
/// parse directly with [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Sources and acceptance rules of a matching round.
    #[serde(default)]
    pub matching: MatchingConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub markets: MarketsConfig,

    /// Scheduled search interval.
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Telegram notification configuration.
    #[serde(default)]
    pub telegram: TelegramAppConfig,

    /// Seed items for scheduled searches.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Bot token, populated from `TELEGRAM_BOT_TOKEN`.
    #[serde(skip)]
    pub telegram_token: Option<String>,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        // Secrets never come from the config file.
        config.telegram_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        let matching = &self.matching;
        for (field, id) in [("source_a", matching.source_a), ("source_b", matching.source_b)] {
            if id.output_kind() != OutputKind::Listings {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("pipeline '{id}' does not produce listings"),
                }
                .into());
            }
        }
        if !(0..=100).contains(&matching.threshold_percent) {
            return Err(ConfigError::InvalidValue {
                field: "threshold_percent",
                reason: "must be between 0 and 100".to_string(),
            }
            .into());
        }
        if matching.wear_digits == 0 || matching.wear_digits > 15 {
            return Err(ConfigError::InvalidValue {
                field: "wear_digits",
                reason: "must be between 1 and 15".to_string(),
            }
            .into());
        }
        if self.pipeline.stream_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "stream_capacity",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.schedule.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        let csmoney = &self.markets.csmoney;
        require_url("csmoney.listings_url", &csmoney.listings_url)?;
        require_url("csmoney.price_url", &csmoney.price_url)?;
        require_positive("csmoney.page_size", csmoney.page_size)?;
        require_positive("csmoney.max_pages", csmoney.max_pages)?;
        if csmoney.fee_percent < Decimal::ZERO || csmoney.fee_percent >= Decimal::ONE_HUNDRED {
            return Err(ConfigError::InvalidValue {
                field: "csmoney.fee_percent",
                reason: "must be at least 0 and below 100".to_string(),
            }
            .into());
        }
        validate_http("csmoney.http", &csmoney.http)?;

        let wiki = &self.markets.csmoney_wiki;
        require_url("csmoney_wiki.base_url", &wiki.base_url)?;
        validate_http("csmoney_wiki.http", &wiki.http)?;

        let steam = &self.markets.steam;
        require_url("steam.market_url", &steam.market_url)?;
        require_url("steam.inspect_url", &steam.inspect_url)?;
        require_positive("steam.page_size", steam.page_size)?;
        require_positive("steam.max_pages", steam.max_pages)?;
        validate_http("steam.http", &steam.http)?;

        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[allow(clippy::result_large_err)]
fn require_url(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingField { field }.into());
    }
    url::Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })?;
    Ok(())
}

#[allow(clippy::result_large_err)]
fn require_positive(field: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be greater than 0".to_string(),
        }
        .into());
    }
    Ok(())
}

#[allow(clippy::result_large_err)]
fn validate_http(field: &'static str, http: &HttpConfig) -> Result<()> {
    if http.timeout_ms == 0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "timeout_ms must be greater than 0".to_string(),
        }
        .into());
    }
    if http.retry_max_attempts == 0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "retry_max_attempts must be greater than 0".to_string(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::logging::LogFormat;
    use crate::application::pipeline::PipelineId;
    use crate::domain::Quality;
    use crate::error::Error;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.matching.source_a, PipelineId::Csmoney);
        assert_eq!(config.matching.source_b, PipelineId::SteamApi);
        assert_eq!(config.matching.threshold_percent, 15);
        assert_eq!(config.matching.wear_digits, 2);
        assert!(config.matching.resolve_names);
        assert_eq!(config.pipeline.stream_capacity, 64);
        assert_eq!(config.schedule.interval_secs, 420);
        assert_eq!(config.markets.csmoney.page_size, 60);
        assert_eq!(config.markets.steam.max_pages, 3);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn catalog_persists_to_file_unless_path_is_empty() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.catalog.file(), Some(Path::new("catalog.json")));

        let config = Config::parse_toml("[catalog]\npath = \"\"").unwrap();
        assert_eq!(config.catalog.file(), None);
    }

    #[test]
    fn parses_sections() {
        let toml = r#"
            [logging]
            level = "debug"
            format = "json"

            [matching]
            source_b = "steam-browser"
            threshold_percent = 20

            [markets.steam.http]
            timeout_ms = 2500

            [telegram]
            enabled = true
            recipients = [1, 2]

            [[catalog.items]]
            item_class = "AK-47"
            pattern = "Redline"
            qualities = ["Field-Tested", "Minimal Wear"]
        "#;
        let config = Config::parse_toml(toml).unwrap();

        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.matching.source_b, PipelineId::SteamBrowser);
        assert_eq!(config.matching.rules().threshold_percent, 20);
        assert_eq!(config.markets.steam.http.timeout_ms, 2500);
        assert_eq!(config.telegram.recipients, vec![1, 2]);
        assert_eq!(
            config.catalog.items[0].qualities,
            vec![Quality::FieldTested, Quality::MinimalWear]
        );
    }

    #[test]
    fn unknown_pipeline_is_rejected() {
        let err = Config::parse_toml("[matching]\nsource_a = \"buff163\"").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn identity_pipeline_cannot_be_a_source() {
        let err = Config::parse_toml("[matching]\nsource_a = \"csmoney-wiki\"").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "source_a", .. })
        ));
    }

    #[test]
    fn threshold_outside_percent_range_is_rejected() {
        let err = Config::parse_toml("[matching]\nthreshold_percent = 101").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "threshold_percent", .. })
        ));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = Config::parse_toml("[pipeline]\nstream_capacity = 0").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "stream_capacity", .. })
        ));
    }

    #[test]
    fn empty_url_is_a_missing_field() {
        let err = Config::parse_toml("[markets.csmoney_wiki]\nbase_url = \"\"").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField { field: "csmoney_wiki.base_url" })
        ));
    }
}
