use std::fs;
use std::path::PathBuf;

use chrono::FixedOffset;
use tempfile::TempDir;

use ridebook::error::{ConfigError, Error};
use ridebook::infrastructure::config::settings::Config;

fn write_temp_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("ridebook.toml");
    fs::write(&path, contents).expect("write temp config");
    (dir, path)
}

#[test]
fn config_loads_full_file() {
    let toml = r#"
[logging]
level = "debug"
format = "json"

[ledger]
utc_offset = "+03:00"
currency_decimals = 2

[store]
snapshot = "exports/may.json"
"#;

    let (_dir, path) = write_temp_config(toml);
    let config = Config::parse_toml(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.ledger.currency_decimals, 2);
    assert_eq!(config.store.snapshot, "exports/may.json");
    assert_eq!(config.utc_offset(), FixedOffset::east_opt(3 * 3600));
}

#[test]
fn config_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::parse_toml("").unwrap();
    let loaded = Config::load(dir.path().join("absent.toml")).unwrap();

    assert_eq!(loaded.logging.level, config.logging.level);
    assert_eq!(loaded.ledger.currency_decimals, 0);
    assert!(loaded.utc_offset().is_none());
}

#[test]
fn config_rejects_too_many_decimals() {
    let toml = r#"
[ledger]
currency_decimals = 9
"#;

    let (_dir, path) = write_temp_config(toml);
    let result = Config::load(&path);

    match result {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "currency_decimals",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid decimals error, got {err}"),
        Ok(config) => panic!(
            "Expected decimals to be rejected, got {}",
            config.ledger.currency_decimals
        ),
    }
}

#[test]
fn config_rejects_bad_utc_offset() {
    for raw in ["Asia/Riyadh", "+25:00", "+03:75", "3"] {
        let toml = format!("[ledger]\nutc_offset = \"{raw}\"\n");
        match Config::parse_toml(&toml) {
            Err(Error::Config(ConfigError::InvalidValue {
                field: "utc_offset",
                ..
            })) => {}
            Err(err) => panic!("Expected invalid offset error for {raw}, got {err}"),
            Ok(_) => panic!("Expected offset {raw} to be rejected"),
        }
    }
}

#[test]
fn config_rejects_unknown_log_format() {
    let toml = r#"
[logging]
format = "yaml"
"#;

    match Config::parse_toml(toml) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "logging.format",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid format error, got {err}"),
        Ok(_) => panic!("Expected yaml format to be rejected"),
    }
}

#[test]
fn config_rejects_blank_snapshot_path() {
    let toml = r#"
[store]
snapshot = "  "
"#;

    match Config::parse_toml(toml) {
        Err(Error::Config(ConfigError::MissingField {
            field: "store.snapshot",
        })) => {}
        Err(err) => panic!("Expected missing snapshot error, got {err}"),
        Ok(_) => panic!("Expected blank snapshot to be rejected"),
    }
}

#[test]
fn config_reports_malformed_toml() {
    let (_dir, path) = write_temp_config("[ledger\nutc_offset = ");
    let err = Config::load(&path).unwrap_err();

    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    assert!(err.to_string().contains("failed to parse config"));
}

#[test]
fn snapshot_override_replaces_configured_path() {
    let mut config = Config::parse_toml("[store]\nsnapshot = \"a.json\"\n").unwrap();
    config.override_snapshot("b.json").unwrap();
    assert_eq!(config.store.snapshot, "b.json");

    assert!(config.override_snapshot("").is_err());
    assert_eq!(config.store.snapshot, "b.json");
}
