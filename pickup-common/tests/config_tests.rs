//! Tests for configuration loading and graceful degradation
//!
//! - Missing default config files fall back to built-in defaults
//! - An explicit config path must exist
//! - File values are layered under CLI/env overrides
//!
//! Tests that touch XDG_CONFIG_HOME are marked #[serial] so they don't race.

use pickup_common::config::{config_file_candidates, ConfigOrigin, ConfigOverrides, TomlConfig};
use pickup_common::Error;
use serial_test::serial;
use std::env;
use tempfile::TempDir;

#[test]
fn test_load_explicit_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pickup.toml");
    std::fs::write(
        &path,
        r#"
[mpd]
address = "jukebox:6600"
timeout_secs = 3

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let (config, origin) = TomlConfig::load(Some(&path)).unwrap();
    assert_eq!(origin, ConfigOrigin::File(path.clone()));
    assert_eq!(config.mpd.address, "jukebox:6600");
    assert_eq!(config.mpd.timeout_secs, 3);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.server.port, 8080);
}

#[test]
fn test_explicit_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    match TomlConfig::load(Some(&path)) {
        Err(Error::Config(msg)) => assert!(msg.contains("absent.toml")),
        other => panic!("expected Config error, got {:?}", other),
    }
}

#[test]
fn test_explicit_malformed_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[mpd\naddress = ").unwrap();

    assert!(matches!(TomlConfig::load(Some(&path)), Err(Error::Toml(_))));
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_user_config_dir_is_first_candidate() {
    let dir = TempDir::new().unwrap();
    env::set_var("XDG_CONFIG_HOME", dir.path());

    let candidates = config_file_candidates();
    assert_eq!(candidates[0], dir.path().join("pickup").join("config.toml"));

    env::remove_var("XDG_CONFIG_HOME");
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_user_config_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join("pickup");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[server]\nport = 7000\n").unwrap();
    env::set_var("XDG_CONFIG_HOME", dir.path());

    let (config, origin) = TomlConfig::load(None).unwrap();
    assert_eq!(config.server.port, 7000);
    assert_eq!(origin, ConfigOrigin::File(config_dir.join("config.toml")));

    env::remove_var("XDG_CONFIG_HOME");
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_missing_config_file_uses_defaults() {
    if std::path::Path::new("/etc/pickup/config.toml").exists() {
        eprintln!("Skipping test: system config present");
        return;
    }
    let dir = TempDir::new().unwrap();
    env::set_var("XDG_CONFIG_HOME", dir.path());

    let (config, origin) = TomlConfig::load(None).unwrap();
    assert_eq!(config, TomlConfig::default());
    assert_eq!(origin, ConfigOrigin::Defaults);

    env::remove_var("XDG_CONFIG_HOME");
}

#[test]
fn test_zero_timeout_in_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pickup.toml");
    std::fs::write(&path, "[mpd]\ntimeout_secs = 0\n").unwrap();

    assert!(matches!(TomlConfig::load(Some(&path)), Err(Error::Config(_))));
}

#[test]
fn test_overrides_layer_over_file() {
    let config = TomlConfig::from_toml_str("[mpd]\naddress = \"file-host:6600\"\n")
        .unwrap()
        .apply_overrides(ConfigOverrides {
            mpd_password: Some("hunter2".to_string()),
            log_level: Some("warn".to_string()),
            ..ConfigOverrides::default()
        });

    assert_eq!(config.mpd.address, "file-host:6600");
    assert_eq!(config.mpd.password.as_deref(), Some("hunter2"));
    assert_eq!(config.logging.level, "warn");
}
