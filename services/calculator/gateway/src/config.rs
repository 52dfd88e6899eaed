use serde::Deserialize;

use calculator_client::{Format, DEFAULT_MAX_PAYLOAD};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub format: Format,
    pub max_payload: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            host: "localhost".to_string(),
            port: 10011,
            format: Format::Json,
            max_payload: DEFAULT_MAX_PAYLOAD,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ::config::ConfigError> {
        ::config::Config::builder()
            .add_source(
                ::config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Address of the evaluator
    pub fn upstream(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
