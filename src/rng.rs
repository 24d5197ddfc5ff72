//! Shared seedable random source.
//!
//! Placeholder ids, prices, simulated coordinates and status-progression
//! delays all draw from one injected `StdRng`. A fixed seed makes a whole run
//! reproducible; tests always seed.

use std::sync::{Arc, Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;

pub type SharedRng = Arc<Mutex<StdRng>>;

/// Build a shared RNG, seeded when `seed` is given, from OS entropy otherwise.
#[must_use]
pub fn shared_rng(seed: Option<u64>) -> SharedRng {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    Arc::new(Mutex::new(rng))
}

/// Run `f` with exclusive access to the RNG. Never hold across an await.
pub fn with_rng<T>(rng: &SharedRng, f: impl FnOnce(&mut StdRng) -> T) -> T {
    let mut guard = rng.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}
