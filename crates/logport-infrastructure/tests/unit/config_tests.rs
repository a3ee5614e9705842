//! Tests for configuration loading

use logport_domain::{Error, VersionRange};
use logport_infrastructure::config::{AppConfig, ConfigBuilder, ConfigLoader, DiscoveryConfig};
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("logport.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.json_format);
    assert!(config.logging.file_output.is_none());
    assert!(config.discovery.eager_install);
    assert!(config.discovery.dynamic_install);
    assert_eq!(
        config.discovery.accepted_versions().unwrap(),
        VersionRange::default()
    );
}

#[test]
fn test_load_from_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[logging]
level = "debug"
json_format = true

[discovery]
eager_install = false
max_api_version = "0.3.0"
"#,
    );

    let config = ConfigLoader::new().with_config_path(&path).load().unwrap();

    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json_format);
    assert!(!config.discovery.eager_install);
    assert!(config.discovery.dynamic_install, "unset keys keep defaults");
    assert_eq!(config.discovery.max_api_version, "0.3.0");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let config = ConfigLoader::new()
        .with_config_path(dir.path().join("absent.toml"))
        .load()
        .unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_invalid_log_level_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[logging]\nlevel = \"loud\"\n");

    let err = ConfigLoader::new().with_config_path(&path).load().unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }), "{err}");
}

#[test]
fn test_empty_version_range_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "[discovery]\nmin_api_version = \"0.2.0\"\nmax_api_version = \"0.2.0\"\n",
    );

    let err = ConfigLoader::new().with_config_path(&path).load().unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }), "{err}");
}

#[test]
fn test_unparsable_version_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[discovery]\nmin_api_version = \"latest\"\n");

    assert!(ConfigLoader::new().with_config_path(&path).load().is_err());
}

#[test]
fn test_save_and_reload_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.toml");
    let config = ConfigBuilder::new()
        .with_log_level("warn")
        .with_discovery(DiscoveryConfig {
            dynamic_install: false,
            ..Default::default()
        })
        .build();

    let loader = ConfigLoader::new().with_config_path(&path);
    loader.save_to_file(&config, &path).unwrap();
    let reloaded = loader.load().unwrap();

    assert_eq!(reloaded, config);
}

#[test]
#[ignore = "mutates process environment; run with --ignored --test-threads=1"]
fn test_env_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[logging]\nlevel = \"debug\"\n");

    // SAFETY: ignored by default, run single-threaded
    unsafe {
        std::env::set_var("LOGPORT_LOGGING__LEVEL", "error");
        std::env::set_var("LOGPORT_DISCOVERY__EAGER_INSTALL", "false");
    }
    let result = ConfigLoader::new().with_config_path(&path).load();
    unsafe {
        std::env::remove_var("LOGPORT_LOGGING__LEVEL");
        std::env::remove_var("LOGPORT_DISCOVERY__EAGER_INSTALL");
    }

    let config = result.unwrap();
    assert_eq!(config.logging.level, "error");
    assert!(!config.discovery.eager_install);
}
