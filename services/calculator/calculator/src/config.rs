use serde::Deserialize;

use calculator_client::{Format, DEFAULT_MAX_PAYLOAD};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub format: Format,
    /// Evaluate malformed trees with zero substitution instead of rejecting them
    pub lenient: bool,
    /// Service each connection on its own task
    pub concurrent: bool,
    pub max_payload: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            host: "0.0.0.0".to_string(),
            port: 10011,
            format: Format::Json,
            lenient: false,
            concurrent: false,
            max_payload: DEFAULT_MAX_PAYLOAD,
        }
    }
}

impl Config {
    /// Loads `APP_`-prefixed environment variables, e.g. `APP_PORT=10011`
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

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
