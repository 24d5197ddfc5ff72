//! Simulation-mode geocoder.
//!
//! DESIGN
//! ======
//! Used when no upstream credential is configured. Never touches the
//! network: after an artificial delay it synthesizes an address jittered
//! around central New Delhi so the booking workflow behaves exactly as it
//! would against the real model, including the loading state.

use std::time::Duration;

use rand::Rng;
use tracing::info;

use super::types::{AddressGeocoder, GeocodeError, ResolvedAddress, validate_query};
use crate::rng::{SharedRng, with_rng};

/// Reference point all simulated coordinates are jittered around.
pub const REFERENCE_LATITUDE: f64 = 28.6139;
pub const REFERENCE_LONGITUDE: f64 = 77.2090;

/// Maximum jitter in degrees on each axis.
pub const JITTER_DEGREES: f64 = 0.05;

pub const MIN_SIMULATED_CONFIDENCE: f64 = 0.7;
pub const MAX_SIMULATED_CONFIDENCE: f64 = 0.95;

const SIMULATED_EXPLANATION: &str =
    "Simulated response: Interpreted landmarks and nearby areas to generate coordinates.";

pub struct SimulatedGeocoder {
    rng: SharedRng,
    delay: Duration,
}

impl SimulatedGeocoder {
    #[must_use]
    pub fn new(rng: SharedRng, delay: Duration) -> Self {
        Self { rng, delay }
    }
}

#[async_trait::async_trait]
impl AddressGeocoder for SimulatedGeocoder {
    async fn resolve(&self, query: &str) -> Result<ResolvedAddress, GeocodeError> {
        let query = validate_query(query)?;
        info!(query_len = query.len(), delay_ms = self.delay.as_millis(), "geocode: simulating resolution");

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(with_rng(&self.rng, |rng| simulate(query, rng)))
    }
}

/// Synthesize a resolved address for `query`. Pure apart from `rng`.
pub fn simulate<R: Rng>(query: &str, rng: &mut R) -> ResolvedAddress {
    ResolvedAddress {
        normalized_address: format!("(Simulated) {query}, New Delhi, 110001, India"),
        latitude: REFERENCE_LATITUDE + rng.random_range(-JITTER_DEGREES..=JITTER_DEGREES),
        longitude: REFERENCE_LONGITUDE + rng.random_range(-JITTER_DEGREES..=JITTER_DEGREES),
        confidence_score: rng.random_range(MIN_SIMULATED_CONFIDENCE..=MAX_SIMULATED_CONFIDENCE),
        parsing_explanation: SIMULATED_EXPLANATION.into(),
    }
}

#[cfg(test)]
#[path = "simulated_test.rs"]
mod tests;
