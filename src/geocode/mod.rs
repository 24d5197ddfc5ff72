//! Geocode — free-text Indian address to structured, geocoded record.
//!
//! DESIGN
//! ======
//! `GeocodeClient` dispatches to the Gemini `generateContent` client when a
//! credential is configured and to the local simulator otherwise. A missing
//! credential is a supported configuration, not a startup failure. Both
//! backends implement `AddressGeocoder`, which is the only thing the booking
//! workflow depends on.

pub mod config;
pub mod gemini;
pub mod map;
pub mod prompt;
pub mod simulated;
pub mod types;

use std::time::Duration;

use config::GeocodeConfig;
pub use map::MapPreview;
pub use types::{AddressGeocoder, ConfidenceTier, GeocodeError, ResolvedAddress};

use crate::rng::SharedRng;

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete geocoder that dispatches to Gemini or the simulator.
pub struct GeocodeClient {
    inner: GeocodeBackend,
    model: String,
}

enum GeocodeBackend {
    Gemini(gemini::GeminiClient),
    Simulated(simulated::SimulatedGeocoder),
}

/// Which backend a [`GeocodeClient`] resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocodeMode {
    Gemini,
    Simulated,
}

impl GeocodeClient {
    /// Build a geocode client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a config value is malformed or the HTTP client fails.
    pub fn from_env(rng: SharedRng) -> Result<Self, GeocodeError> {
        let config = GeocodeConfig::from_env()?;
        Self::from_config(config, rng)
    }

    /// Build a geocode client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the Gemini HTTP client fails to build.
    pub fn from_config(config: GeocodeConfig, rng: SharedRng) -> Result<Self, GeocodeError> {
        let model = config.model.clone();
        tracing::debug!(model = %model, simulated = config.is_simulated(), "geocode: building client");
        let inner = match config.api_key {
            Some(api_key) => GeocodeBackend::Gemini(gemini::GeminiClient::new(
                api_key,
                config.base_url,
                config.model,
                config.temperature,
                config.timeouts,
            )?),
            None => GeocodeBackend::Simulated(simulated::SimulatedGeocoder::new(
                rng,
                Duration::from_millis(config.simulation_delay_ms),
            )),
        };
        Ok(Self { inner, model })
    }

    /// Return the configured model name (e.g. `"gemini-2.5-flash"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn mode(&self) -> GeocodeMode {
        match self.inner {
            GeocodeBackend::Gemini(_) => GeocodeMode::Gemini,
            GeocodeBackend::Simulated(_) => GeocodeMode::Simulated,
        }
    }
}

#[async_trait::async_trait]
impl AddressGeocoder for GeocodeClient {
    async fn resolve(&self, query: &str) -> Result<ResolvedAddress, GeocodeError> {
        match &self.inner {
            GeocodeBackend::Gemini(c) => c.resolve(query).await,
            GeocodeBackend::Simulated(c) => c.resolve(query).await,
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
