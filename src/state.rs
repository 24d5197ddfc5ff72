//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the geocoder, the shipment store, the open booking forms, the
//! admin dashboard counters and the status tracker.
//! Booking forms live in `BookingSessions` and expire when idle. Every lock is a tokio
//! `RwLock` and none is held across a geocoder call.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::geocode::{AddressGeocoder, MapPreview};
use crate::rng::SharedRng;
use crate::services::dashboard::AdminState;
use crate::services::sessions::{BookingSessions, SessionLimits};
use crate::services::tracker::{ProgressionIntervals, Tracker};
use crate::store::ShipmentStore;

// =============================================================================
// APP STATE
// =============================================================================

/// Everything a SwiftMile handler touches. Cloned once per request, so each
/// field is a shared handle onto the one geocoder, store and session table.
#[derive(Clone)]
pub struct AppState {
    pub geocoder: Arc<dyn AddressGeocoder>,
    pub store: Arc<RwLock<ShipmentStore>>,
    /// Open booking forms, expired by the session sweeper.
    pub bookings: Arc<RwLock<BookingSessions>>,
    pub admin: Arc<RwLock<AdminState>>,
    pub tracker: Arc<Tracker>,
    pub rng: SharedRng,
    pub map: MapPreview,
}

impl AppState {
    /// Build state around a store seeded with the demo fixtures.
    #[must_use]
    pub fn new(
        geocoder: Arc<dyn AddressGeocoder>,
        rng: SharedRng,
        map: MapPreview,
        intervals: ProgressionIntervals,
        idle_ttl: Duration,
    ) -> Self {
        let store = Arc::new(RwLock::new(ShipmentStore::seeded()));
        let tracker = Arc::new(Tracker::new(store.clone(), rng.clone(), intervals));
        Self {
            geocoder,
            store,
            bookings: Arc::new(RwLock::new(BookingSessions::new(idle_ttl))),
            admin: Arc::new(RwLock::new(AdminState::seeded())),
            tracker,
            rng,
            map,
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
