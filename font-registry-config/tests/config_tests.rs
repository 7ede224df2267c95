use std::path::PathBuf;

use font_registry_config::{Config, ConfigError, LogLevel, MissPolicy};
use tempfile::TempDir;

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert!(config.load_system_fonts);
    assert!(config.font_dirs.is_empty());
    assert!(config.app_fonts.is_empty());
    assert!(config.preload.is_empty());
    assert!(config.fallback_families.is_empty());
    assert_eq!(config.miss_policy, MissPolicy::Coalesce);
    assert_eq!(config.log_level, LogLevel::Warn);
}

#[test]
fn test_config_builders() {
    let config = Config::new()
        .with_system_fonts(false)
        .with_font_dir("/opt/fonts")
        .with_app_font("assets/Brand-Regular.ttf")
        .with_preload("Brand-Regular")
        .with_miss_policy(MissPolicy::Race)
        .with_log_level(LogLevel::Debug);

    assert!(!config.load_system_fonts);
    assert_eq!(config.font_dirs, vec![PathBuf::from("/opt/fonts")]);
    assert_eq!(
        config.app_fonts,
        vec![PathBuf::from("assets/Brand-Regular.ttf")]
    );
    assert_eq!(config.preload, vec!["Brand-Regular".to_string()]);
    assert_eq!(config.miss_policy, MissPolicy::Race);
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn test_config_partial_yaml_uses_defaults() {
    let yaml = r#"
preload:
  - Roboto-Bold
  - Inter
miss_policy: race
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.preload, vec!["Roboto-Bold", "Inter"]);
    assert_eq!(config.miss_policy, MissPolicy::Race);
    assert!(config.load_system_fonts);
    assert_eq!(config.log_level, LogLevel::Warn);
}

#[test]
fn test_config_empty_yaml() {
    assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
}

#[test]
fn test_config_rejects_unknown_policy() {
    let err = Config::from_yaml("miss_policy: serialize\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_config_rejects_unknown_log_level() {
    let err = Config::from_yaml("log_level: verbose\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_config_rejects_invalid_fallback_name() {
    let err = Config::from_yaml("fallback_families: [\"\"]\n").unwrap_err();
    match err {
        ConfigError::Validation(msg) => assert!(msg.contains("fallback_families")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_config_save_and_load_roundtrip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("nested").join("config.yaml");

    let config = Config::new()
        .with_font_dir("~/fonts")
        .with_preload("Menlo")
        .with_log_level(LogLevel::Info);
    config.save_to(&path).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("yaml.tmp").exists());

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_load_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.yaml");
    match Config::load_from(&path) {
        Err(ConfigError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_config_parse_error_carries_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yaml");
    std::fs::write(&path, "preload: [unterminated\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { path: ref p, .. } if *p == path));
    assert!(err.to_string().contains("config.yaml"));
}

#[test]
fn test_resolved_paths_expand_home() {
    let config = Config::new()
        .with_font_dir("~/Library/Fonts")
        .with_app_font("/abs/Brand.otf");
    let dirs = config.resolved_font_dirs();
    assert!(!dirs[0].starts_with("~") || dirs::home_dir().is_none());
    assert_eq!(config.resolved_app_fonts()[0], PathBuf::from("/abs/Brand.otf"));
}
