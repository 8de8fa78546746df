use super::*;
use crate::primitives::ColorMode;

#[test]
fn test_config_loading_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.registry, "https://registry.npmjs.org");
    assert_eq!(config.fetch_timeout, 10);
    assert_eq!(config.build_budget, 30);
    assert_eq!(config.cache_ttl, 10);
    assert_eq!(config.log_level, 0);
    assert_eq!(config.color, ColorMode::Auto);
    assert!(config.workdir.is_none());
}

#[test]
fn test_config_merging() {
    let base = AppConfig::default();
    let override_config = AppConfig {
        log_level: 4,
        color: ColorMode::Always,
        registry: "http://localhost:4873".to_string(),
        ..AppConfig::default()
    };

    let merged = base.merge_with(override_config);
    assert_eq!(merged.log_level, 4);
    assert_eq!(merged.color, ColorMode::Always);
    assert_eq!(merged.registry, "http://localhost:4873");
    assert_eq!(merged.fetch_timeout, 10);
    assert_eq!(merged.build_budget, 30);
}

#[test]
fn test_merge_keeps_base_non_defaults() {
    let base = AppConfig {
        cache_ttl: 60,
        ..AppConfig::default()
    };

    // The other side is all defaults, so nothing is overridden
    let merged = base.merge_with(AppConfig::default());
    assert_eq!(merged.cache_ttl, 60);
}

#[test]
fn test_env_color_yields_to_explicit_cli_color() {
    // NO_COLOR lands on the defaults; a non-default CLI color wins the merge
    let mut config = AppConfig::default();
    let env = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };
    config.color = env.apply_color_config(config.color);
    assert_eq!(config.color, ColorMode::Never);

    let cli_side = AppConfig {
        color: ColorMode::Always,
        ..AppConfig::default()
    };
    let merged = config.merge_with(cli_side);
    assert_eq!(merged.color, ColorMode::Always);
}

#[test]
fn test_validate_fills_workdir() {
    let mut config = AppConfig::default();
    config.validate().unwrap();
    assert!(config.workdir.is_some());
}

#[test]
fn test_validate_rejects_missing_workdir() {
    let mut config = AppConfig {
        workdir: Some("/definitely/not/a/real/directory".into()),
        ..AppConfig::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidWorkDir { .. }));
}

#[test]
fn test_validate_rejects_zero_timeouts() {
    let mut config = AppConfig {
        fetch_timeout: 0,
        ..AppConfig::default()
    };
    assert!(matches!(
        config.validate().unwrap_err(),
        ConfigError::ValidationFailed { .. }
    ));

    let mut config = AppConfig {
        build_budget: 0,
        ..AppConfig::default()
    };
    assert!(matches!(
        config.validate().unwrap_err(),
        ConfigError::ValidationFailed { .. }
    ));
}

#[test]
fn test_logger_config_from_app_config() {
    let config = AppConfig {
        log_level: 3,
        color: ColorMode::Never,
        ..AppConfig::default()
    };

    let logger_config = config.to_logger_config();
    assert_eq!(logger_config.level, crate::primitives::LogLevel::Debug);
    assert!(!logger_config.ansi);
}
