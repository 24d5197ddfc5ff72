//! Open booking forms keyed by id, with idle expiry.
//!
//! DESIGN
//! ======
//! A form stays open after a successful submit so the shipper can still see
//! what was booked. It is freed when the client deletes it, or by the
//! background sweeper once nobody has modified it for the idle TTL. Reads do
//! not count as activity; every mutable access does.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use super::booking::BookingForm;
use crate::geocode::config::env_parse;

const DEFAULT_BOOKING_IDLE_TTL_SECS: u64 = 1800;
const DEFAULT_BOOKING_SWEEP_INTERVAL_SECS: u64 = 60;

/// Idle TTL and sweep cadence, loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Forms untouched for this long are evicted.
    pub idle_ttl: Duration,
    /// How often the sweeper runs.
    pub sweep_interval: Duration,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::from_secs(DEFAULT_BOOKING_IDLE_TTL_SECS),
            sweep_interval: Duration::from_secs(DEFAULT_BOOKING_SWEEP_INTERVAL_SECS),
        }
    }
}

impl SessionLimits {
    /// Reads `BOOKING_IDLE_TTL_SECS` and `BOOKING_SWEEP_INTERVAL_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            idle_ttl: Duration::from_secs(env_parse(
                "BOOKING_IDLE_TTL_SECS",
                DEFAULT_BOOKING_IDLE_TTL_SECS,
            )),
            sweep_interval: Duration::from_secs(env_parse(
                "BOOKING_SWEEP_INTERVAL_SECS",
                DEFAULT_BOOKING_SWEEP_INTERVAL_SECS,
            )),
        }
    }
}

// =============================================================================
// SESSIONS
// =============================================================================

struct OpenForm {
    form: BookingForm,
    touched: Instant,
}

pub struct BookingSessions {
    forms: HashMap<Uuid, OpenForm>,
    idle_ttl: Duration,
}

impl BookingSessions {
    #[must_use]
    pub fn new(idle_ttl: Duration) -> Self {
        Self { forms: HashMap::new(), idle_ttl }
    }

    /// Register `form` and return its id.
    pub fn insert(&mut self, form: BookingForm) -> Uuid {
        let id = form.id();
        self.forms.insert(id, OpenForm { form, touched: Instant::now() });
        id
    }

    #[must_use]
    pub fn get(&self, id: &Uuid) -> Option<&BookingForm> {
        self.forms.get(id).map(|open| &open.form)
    }

    /// Mutable access; marks the form as active.
    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut BookingForm> {
        self.forms.get_mut(id).map(|open| {
            open.touched = Instant::now();
            &mut open.form
        })
    }

    pub fn remove(&mut self, id: &Uuid) -> Option<BookingForm> {
        self.forms.remove(id).map(|open| open.form)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Drop every form idle for at least the TTL as of `now`. Returns how many went.
    pub fn evict_idle(&mut self, now: Instant) -> usize {
        let before = self.forms.len();
        let ttl = self.idle_ttl;
        self.forms.retain(|_, open| now.saturating_duration_since(open.touched) < ttl);
        before - self.forms.len()
    }
}

/// Spawn the background idle-form sweeper. Returns a handle for shutdown.
pub fn spawn_session_sweeper(sessions: Arc<RwLock<BookingSessions>>, interval: Duration) -> JoinHandle<()> {
    info!(interval_ms = interval.as_millis(), "booking session sweeper configured");
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            let mut sessions = sessions.write().await;
            let evicted = sessions.evict_idle(Instant::now());
            if evicted > 0 {
                info!(evicted, open = sessions.len(), "booking: evicted idle forms");
            } else {
                debug!(open = sessions.len(), "booking: no idle forms");
            }
        }
    })
}

#[cfg(test)]
#[path = "sessions_test.rs"]
mod tests;
