//! Address resolver — the per-slot resolve/confirm workflow.
//!
//! DESIGN
//! ======
//! State machine `Idle → Resolving → Resolved → Confirmed`, with
//! `Resolving → Idle` on error. Resolution is split into `begin_resolve`
//! and `complete` so callers holding the resolver behind a lock can release
//! it while the geocoder runs. Each attempt is stamped with a generation;
//! `complete` drops any outcome whose generation is no longer current, so a
//! slow earlier response can never overwrite a newer one.
//!
//! Only `Confirmed` exposes an address to the booking form. Leaving
//! `Confirmed` (edit, or a new resolve) retracts it.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::ErrorCode;
use crate::geocode::types::EMPTY_ADDRESS_MESSAGE;
use crate::geocode::{ConfidenceTier, GeocodeError, MapPreview, ResolvedAddress};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverPhase {
    Idle,
    Resolving,
    Resolved,
    Confirmed,
}

#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    #[error("{}", EMPTY_ADDRESS_MESSAGE)]
    EmptyAddress,
    #[error("a resolution is already in progress")]
    InFlight,
    #[error("address is confirmed; edit it before resolving again")]
    AlreadyConfirmed,
    #[error("no resolved address to confirm")]
    NothingToConfirm,
    #[error("address is not confirmed")]
    NotConfirmed,
    /// The geocoder failed; carries the user-facing message.
    #[error("{0}")]
    Resolution(String),
}

impl ErrorCode for ResolverError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyAddress => "E_EMPTY_ADDRESS",
            Self::InFlight => "E_RESOLUTION_IN_FLIGHT",
            Self::AlreadyConfirmed => "E_ALREADY_CONFIRMED",
            Self::NothingToConfirm => "E_NOTHING_TO_CONFIRM",
            Self::NotConfirmed => "E_NOT_CONFIRMED",
            Self::Resolution(_) => "E_RESOLUTION_FAILED",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::InFlight | Self::Resolution(_))
    }
}

/// Proof that a resolution was started. Hand it back to [`AddressResolver::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveTicket {
    generation: u64,
    query: String,
}

impl ResolveTicket {
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Whether a completed resolution was applied or discarded as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

/// Serializable snapshot of a resolver for the booking view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverView {
    pub phase: ResolverPhase,
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<ResolvedAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_tier: Option<ConfidenceTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_percent: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_preview_url: Option<String>,
}

// =============================================================================
// RESOLVER
// =============================================================================

#[derive(Debug, Clone)]
pub struct AddressResolver {
    phase: ResolverPhase,
    input: String,
    resolved: Option<ResolvedAddress>,
    error: Option<String>,
    generation: u64,
}

impl Default for AddressResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressResolver {
    #[must_use]
    pub fn new() -> Self {
        Self { phase: ResolverPhase::Idle, input: String::new(), resolved: None, error: None, generation: 0 }
    }

    #[must_use]
    pub fn phase(&self) -> ResolverPhase {
        self.phase
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The latest result, whether or not it has been confirmed.
    #[must_use]
    pub fn resolved(&self) -> Option<&ResolvedAddress> {
        self.resolved.as_ref()
    }

    /// The address the booking form may use. `Some` only when confirmed.
    #[must_use]
    pub fn confirmed(&self) -> Option<&ResolvedAddress> {
        match self.phase {
            ResolverPhase::Confirmed => self.resolved.as_ref(),
            _ => None,
        }
    }

    /// Start resolving `query`.
    ///
    /// Discards any previous result and retracts a confirmed address.
    ///
    /// # Errors
    ///
    /// - [`ResolverError::EmptyAddress`] for blank input; the resolver stays
    ///   `Idle` and shows the error.
    /// - [`ResolverError::InFlight`] while another resolution is running.
    /// - [`ResolverError::AlreadyConfirmed`] while confirmed.
    pub fn begin_resolve(&mut self, query: &str) -> Result<ResolveTicket, ResolverError> {
        match self.phase {
            ResolverPhase::Resolving => return Err(ResolverError::InFlight),
            ResolverPhase::Confirmed => return Err(ResolverError::AlreadyConfirmed),
            ResolverPhase::Idle | ResolverPhase::Resolved => {}
        }

        self.input = query.to_string();
        if query.trim().is_empty() {
            self.error = Some(EMPTY_ADDRESS_MESSAGE.to_string());
            return Err(ResolverError::EmptyAddress);
        }

        self.generation += 1;
        self.phase = ResolverPhase::Resolving;
        self.resolved = None;
        self.error = None;
        debug!(generation = self.generation, "resolver: resolving");

        Ok(ResolveTicket { generation: self.generation, query: query.to_string() })
    }

    /// Apply the outcome of the resolution identified by `ticket`.
    ///
    /// Outcomes for superseded tickets are dropped and leave state untouched.
    pub fn complete(
        &mut self,
        ticket: &ResolveTicket,
        outcome: Result<ResolvedAddress, GeocodeError>,
    ) -> Completion {
        if ticket.generation() != self.generation || self.phase != ResolverPhase::Resolving {
            info!(
                ticket = ticket.generation(),
                current = self.generation,
                "resolver: discarding stale resolution"
            );
            return Completion::Stale;
        }

        match outcome {
            Ok(address) => {
                self.resolved = Some(address);
                self.phase = ResolverPhase::Resolved;
            }
            Err(e) => {
                self.error = Some(e.user_message());
                self.phase = ResolverPhase::Idle;
            }
        }
        Completion::Applied
    }

    /// Accept the resolved address. Returns the address now emitted to the form.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::NothingToConfirm`] unless in `Resolved`.
    pub fn confirm(&mut self) -> Result<&ResolvedAddress, ResolverError> {
        if self.phase != ResolverPhase::Resolved {
            return Err(ResolverError::NothingToConfirm);
        }
        self.phase = ResolverPhase::Confirmed;
        self.resolved().ok_or(ResolverError::NothingToConfirm)
    }

    /// Reopen a confirmed address for editing, retracting it from the form.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::NotConfirmed`] unless in `Confirmed`.
    pub fn edit(&mut self) -> Result<(), ResolverError> {
        if self.phase != ResolverPhase::Confirmed {
            return Err(ResolverError::NotConfirmed);
        }
        self.phase = ResolverPhase::Idle;
        self.resolved = None;
        self.error = None;
        Ok(())
    }

    #[must_use]
    pub fn view(&self, map: &MapPreview) -> ResolverView {
        let resolved = self.resolved.clone();
        ResolverView {
            phase: self.phase,
            input: self.input().to_string(),
            error: self.error.clone(),
            confidence_tier: resolved.as_ref().map(ResolvedAddress::confidence_tier),
            confidence_percent: resolved.as_ref().map(ResolvedAddress::confidence_percent),
            map_preview_url: resolved.as_ref().map(|r| map.url(r.latitude, r.longitude)),
            resolved,
        }
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
