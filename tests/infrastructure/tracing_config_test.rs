use anamnesis::infrastructure::observability::TracingConfig;
use anamnesis::presentation::config::{Environment, LoggingSettings};

#[test]
fn given_logging_settings_when_building_config_then_level_and_format_are_copied() {
    let logging = LoggingSettings {
        level: "warn".to_string(),
        enable_json: true,
    };

    let config = TracingConfig::from_settings(&logging, Environment::Prod);

    assert!(config.json_format);
    assert_eq!(config.environment, Environment::Prod);
    assert_eq!(config.default_directive(), "warn,anamnesis=warn,tower_http=debug");
}

#[test]
fn given_default_config_when_created_then_level_is_info() {
    let config = TracingConfig::default();
    assert_eq!(config.level, "info");
    assert_eq!(config.environment, Environment::Local);
}
