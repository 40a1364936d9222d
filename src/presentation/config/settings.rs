use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::{DEFAULT_TEMPLATE, FallbackGenerator, FallbackPacing};

use super::Environment;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a clinical documentation assistant. \
Summarize the doctor-patient conversation for doctor {doctor_id} and patient {patient_id} \
into a medical record covering symptom details, vital signs, past medical history and \
current medications. Only use facts stated in the conversation.";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub fallback: FallbackSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    /// `openai`, `lmstudio`, `azure`, or `scripted` for the local scaffold.
    pub provider: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub azure_endpoint: Option<String>,
    pub api_key: String,
    pub chat_model: String,
    pub max_tokens: usize,
    pub temperature: f32,
    pub request_timeout_seconds: u64,
    pub sse_keep_alive_seconds: u64,
    pub system_prompt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FallbackSettings {
    pub intro_delay_ms: u64,
    pub line_interval_ms: u64,
    pub template: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Layers built-in defaults, `appsettings.<env>.*` (optional) and
    /// `APP_`-prefixed environment variables, e.g. `APP_LLM__API_KEY`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080_i64)?
            .set_default("llm.provider", "scripted")?
            .set_default("llm.api_key", "")?
            .set_default("llm.chat_model", "gpt-4o-mini")?
            .set_default("llm.max_tokens", 1024_i64)?
            .set_default("llm.temperature", 0.2_f64)?
            .set_default("llm.request_timeout_seconds", 30_i64)?
            .set_default("llm.sse_keep_alive_seconds", 15_i64)?
            .set_default("llm.system_prompt", DEFAULT_SYSTEM_PROMPT)?
            .set_default("fallback.intro_delay_ms", 500_i64)?
            .set_default("fallback.line_interval_ms", 100_i64)?
            .set_default("fallback.template", DEFAULT_TEMPLATE)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)?
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl LlmSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn sse_keep_alive(&self) -> Duration {
        Duration::from_secs(self.sse_keep_alive_seconds)
    }
}

impl FallbackSettings {
    pub fn pacing(&self) -> FallbackPacing {
        FallbackPacing {
            intro_delay: Duration::from_millis(self.intro_delay_ms),
            line_interval: Duration::from_millis(self.line_interval_ms),
        }
    }

    pub fn generator(&self) -> FallbackGenerator {
        FallbackGenerator::new(self.template.clone(), self.pacing())
    }
}
