use std::time::Duration;

use anamnesis::application::services::DEFAULT_TEMPLATE;
use anamnesis::presentation::config::{DEFAULT_SYSTEM_PROMPT, Environment, Settings};

#[test]
fn given_no_settings_file_when_loading_then_defaults_apply() {
    let settings = Settings::load(Environment::Test).unwrap();

    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.llm.provider, "scripted");
    assert_eq!(settings.llm.request_timeout(), Duration::from_secs(30));
    assert_eq!(settings.llm.system_prompt, DEFAULT_SYSTEM_PROMPT);
    assert_eq!(settings.fallback.template, DEFAULT_TEMPLATE);
    assert_eq!(settings.fallback.pacing().intro_delay, Duration::from_millis(500));
    assert_eq!(settings.fallback.pacing().line_interval, Duration::from_millis(100));
    assert!(settings.llm.base_url.is_none());
    assert_eq!(settings.fallback.generator().pacing(), settings.fallback.pacing());
}

#[test]
fn given_environment_names_when_parsing_then_known_values_accepted() {
    assert_eq!(
        Environment::try_from("Production".to_string()),
        Ok(Environment::Prod)
    );
    assert_eq!(Environment::try_from("TEST".to_string()), Ok(Environment::Test));
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_environment_when_naming_settings_file_then_uses_lowercase_name() {
    assert_eq!(Environment::Local.settings_file(), "appsettings.local");
    assert_eq!(Environment::Prod.settings_file(), "appsettings.prod");
}
