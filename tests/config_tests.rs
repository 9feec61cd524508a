//! Loading configuration files from disk.

use std::io::Write;

use tempfile::NamedTempFile;

use floatarb::application::pipeline::PipelineId;
use floatarb::error::{ConfigError, Error};
use floatarb::infrastructure::config::settings::Config;

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn loads_a_full_file() {
    let file = write_temp_config(
        r#"
[logging]
level = "warn"
format = "json"

[matching]
source_a = "csmoney"
source_b = "steam-api"
threshold_percent = 18
wear_digits = 3
resolve_names = false

[pipeline]
stream_capacity = 16

[markets.csmoney]
page_size = 30
fee_percent = 7.5

[markets.steam]
max_pages = 5
currency = 3

[markets.steam.http]
retry_max_attempts = 5

[schedule]
interval_secs = 600

[telegram]
enabled = true
recipients = [42]
notify_no_matches = false

[[catalog.items]]
item_class = "AWP"
pattern = "Asiimov"
stattrak = true
qualities = ["Field-Tested", "Battle-Scarred"]
"#,
    );

    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.logging.level, "warn");
    let settings = config.matching.search_settings();
    assert_eq!(settings.source_a, PipelineId::Csmoney);
    assert_eq!(settings.rules.threshold_percent, 18);
    assert_eq!(settings.rules.wear_digits, 3);
    assert!(!settings.resolve_names);
    assert_eq!(config.pipeline.stream_capacity, 16);
    assert_eq!(config.markets.csmoney.page_size, 30);
    assert_eq!(config.markets.csmoney.fee_percent.to_string(), "7.5");
    assert_eq!(config.markets.steam.currency, 3);
    assert_eq!(config.markets.steam.http.retry_max_attempts, 5);
    assert_eq!(config.schedule.interval().as_secs(), 600);
    assert_eq!(config.telegram.recipients, vec![42]);
    assert!(!config.telegram.notify_no_matches);
    assert!(config.catalog.items[0].stattrak);
}

#[test]
fn missing_file_is_a_read_error() {
    let err = Config::load("/nonexistent/floatarb.toml").unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let file = write_temp_config("[matching\nsource_a = ");
    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    assert_eq!(err.category(), "configuration");
}

#[test]
fn zero_page_size_is_rejected() {
    let file = write_temp_config("[markets.steam]\npage_size = 0\n");
    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "steam.page_size",
            ..
        })
    ));
}

#[test]
fn unparseable_url_is_rejected() {
    let file = write_temp_config("[markets.csmoney]\nprice_url = \"not a url\"\n");
    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "csmoney.price_url",
            ..
        })
    ));
}

#[test]
fn fee_of_a_hundred_percent_is_rejected() {
    let file = write_temp_config("[markets.csmoney]\nfee_percent = 100\n");
    assert!(Config::load(file.path()).is_err());
}
