//! Geocode configuration parsed from environment variables.

use super::prompt::DEFAULT_TEMPERATURE;
use super::types::GeocodeError;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEOCODE_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEOCODE_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_GEOCODE_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SIMULATION_DELAY_MS: u64 = 1500;

/// Env vars checked, in order, for the upstream credential.
const API_KEY_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeocodeTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeConfig {
    /// `None` selects simulation mode.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub timeouts: GeocodeTimeouts,
    pub simulation_delay_ms: u64,
}

impl GeocodeConfig {
    /// Build typed geocode config from environment variables.
    ///
    /// Optional:
    /// - `API_KEY` / `GEMINI_API_KEY`: absent or blank selects simulation mode
    /// - `GEOCODE_MODEL`: default `gemini-2.5-flash`
    /// - `GEOCODE_BASE_URL`: default Gemini v1beta endpoint
    /// - `GEOCODE_TEMPERATURE`: default 0.1
    /// - `GEOCODE_REQUEST_TIMEOUT_SECS`: default 120
    /// - `GEOCODE_CONNECT_TIMEOUT_SECS`: default 10
    /// - `GEOCODE_SIMULATION_DELAY_MS`: default 1500
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::ConfigParse`] if the temperature is set but
    /// not a number in [0, 2].
    pub fn from_env() -> Result<Self, GeocodeError> {
        let api_key = API_KEY_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty());

        let model = std::env::var("GEOCODE_MODEL").unwrap_or_else(|_| DEFAULT_GEOCODE_MODEL.to_string());
        let base_url = std::env::var("GEOCODE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let temperature = parse_temperature(std::env::var("GEOCODE_TEMPERATURE").ok().as_deref())?;
        let timeouts = GeocodeTimeouts {
            request_secs: env_parse("GEOCODE_REQUEST_TIMEOUT_SECS", DEFAULT_GEOCODE_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse("GEOCODE_CONNECT_TIMEOUT_SECS", DEFAULT_GEOCODE_CONNECT_TIMEOUT_SECS),
        };
        let simulation_delay_ms = env_parse("GEOCODE_SIMULATION_DELAY_MS", DEFAULT_SIMULATION_DELAY_MS);

        Ok(Self { api_key, model, base_url, temperature, timeouts, simulation_delay_ms })
    }

    /// `true` when no credential is configured.
    #[must_use]
    pub fn is_simulated(&self) -> bool {
        self.api_key.is_none()
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_temperature(raw: Option<&str>) -> Result<f32, GeocodeError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_TEMPERATURE);
    };
    match raw.trim().parse::<f32>() {
        Ok(t) if (0.0..=2.0).contains(&t) => Ok(t),
        _ => Err(GeocodeError::ConfigParse(format!(
            "invalid GEOCODE_TEMPERATURE '{raw}' (expected a number in 0..=2)"
        ))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
