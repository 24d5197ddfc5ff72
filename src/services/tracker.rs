//! Tracker service — simulated shipment status progression.
//!
//! DESIGN
//! ======
//! Each watched shipment gets one background task that sleeps a random
//! interval, then advances the status one step along
//! `PENDING_PICKUP → IN_TRANSIT → OUT_FOR_DELIVERY → DELIVERED`. The task
//! ends when the shipment reaches a status with no successor, which also
//! covers shipments diverted to `EXCEPTION` or `PENDING_RESOLUTION` while
//! watched.
//!
//! TEARDOWN
//! ========
//! `ProgressionHandle` aborts its task on `cancel()` and on drop, so no
//! progression outlives the handle that owns it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use rand::Rng;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::geocode::config::env_parse;
use crate::rng::{SharedRng, with_rng};
use crate::store::{ShipmentStatus, ShipmentStore};

const DEFAULT_STATUS_MIN_INTERVAL_MS: u64 = 5_000;
const DEFAULT_STATUS_MAX_INTERVAL_MS: u64 = 20_000;

/// Successor in the simulated lifecycle, `None` for terminal or diverted statuses.
#[must_use]
pub fn next_status(status: ShipmentStatus) -> Option<ShipmentStatus> {
    match status {
        ShipmentStatus::PendingPickup => Some(ShipmentStatus::InTransit),
        ShipmentStatus::InTransit => Some(ShipmentStatus::OutForDelivery),
        ShipmentStatus::OutForDelivery => Some(ShipmentStatus::Delivered),
        ShipmentStatus::Delivered | ShipmentStatus::Exception | ShipmentStatus::PendingResolution => None,
    }
}

// =============================================================================
// INTERVALS
// =============================================================================

/// Half-open range `[min, max)` the delay between steps is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressionIntervals {
    min: Duration,
    max: Duration,
}

impl Default for ProgressionIntervals {
    fn default() -> Self {
        Self::from_millis(DEFAULT_STATUS_MIN_INTERVAL_MS, DEFAULT_STATUS_MAX_INTERVAL_MS)
    }
}

impl ProgressionIntervals {
    /// A `max` at or below `min` collapses to a fixed `min` delay.
    #[must_use]
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self { min: Duration::from_millis(min_ms), max: Duration::from_millis(max_ms.max(min_ms)) }
    }

    /// Reads `STATUS_MIN_INTERVAL_MS` and `STATUS_MAX_INTERVAL_MS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_millis(
            env_parse("STATUS_MIN_INTERVAL_MS", DEFAULT_STATUS_MIN_INTERVAL_MS),
            env_parse("STATUS_MAX_INTERVAL_MS", DEFAULT_STATUS_MAX_INTERVAL_MS),
        )
    }

    #[must_use]
    pub fn min(&self) -> Duration {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Duration {
        self.max
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        rng.random_range(self.min..self.max)
    }
}

// =============================================================================
// PROGRESSION TASK
// =============================================================================

/// Owns one progression task. Dropping the handle aborts the task.
#[derive(Debug)]
pub struct ProgressionHandle {
    shipment_id: String,
    task: JoinHandle<()>,
}

impl ProgressionHandle {
    #[must_use]
    pub fn shipment_id(&self) -> &str {
        &self.shipment_id
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for ProgressionHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Spawn a task that walks shipment `id` forward until it has no successor.
///
/// An unknown id ends the task after its first delay.
pub fn spawn_progression(
    store: Arc<RwLock<ShipmentStore>>,
    id: String,
    rng: SharedRng,
    intervals: ProgressionIntervals,
) -> ProgressionHandle {
    let shipment_id = id.clone();
    let task = tokio::spawn(async move {
        loop {
            let delay = with_rng(&rng, |r| intervals.sample(r));
            tokio::time::sleep(delay).await;

            let mut store = store.write().await;
            let Some(current) = store.get(&id).map(|s| s.status) else {
                warn!(%id, "tracker: shipment vanished; stopping progression");
                return;
            };
            let Some(next) = next_status(current) else {
                debug!(%id, status = ?current, "tracker: no successor; stopping progression");
                return;
            };
            if store.set_status(&id, next).is_err() {
                return;
            }
            info!(%id, from = ?current, to = ?next, "tracker: status advanced");
            if next_status(next).is_none() {
                return;
            }
        }
    });
    ProgressionHandle { shipment_id, task }
}

// =============================================================================
// TRACKER
// =============================================================================

/// Registry of progression tasks keyed by shipment id.
pub struct Tracker {
    store: Arc<RwLock<ShipmentStore>>,
    rng: SharedRng,
    intervals: ProgressionIntervals,
    handles: Mutex<HashMap<String, ProgressionHandle>>,
}

impl Tracker {
    #[must_use]
    pub fn new(store: Arc<RwLock<ShipmentStore>>, rng: SharedRng, intervals: ProgressionIntervals) -> Self {
        Self { store, rng, intervals, handles: Mutex::new(HashMap::new()) }
    }

    #[must_use]
    pub fn intervals(&self) -> ProgressionIntervals {
        self.intervals
    }

    /// Start progressing shipment `id`, replacing (and aborting) any existing task for it.
    pub fn watch(&self, id: &str) {
        let handle = spawn_progression(self.store.clone(), id.to_string(), self.rng.clone(), self.intervals);
        let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        handles.retain(|_, h| !h.is_finished());
        if let Some(replaced) = handles.insert(id.to_string(), handle) {
            debug!(id = replaced.shipment_id(), "tracker: replaced running progression");
        }
    }

    /// Stop progressing shipment `id`. Returns `false` if it was not watched.
    pub fn unwatch(&self, id: &str) -> bool {
        let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        handles.remove(id).is_some()
    }

    /// Number of progressions still running.
    #[must_use]
    pub fn active(&self) -> usize {
        let handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        handles.values().filter(|h| !h.is_finished()).count()
    }

    /// Abort every progression.
    pub fn shutdown(&self) {
        let drained: Vec<ProgressionHandle> = {
            let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
            handles.drain().map(|(_, h)| h).collect()
        };
        info!(count = drained.len(), "tracker: shutting down progressions");
        drop(drained);
    }
}

#[cfg(test)]
#[path = "tracker_test.rs"]
mod tests;
