//! Dashboard service — read models for the shipper, agent, admin and partner views.
//!
//! DESIGN
//! ======
//! Every overview is computed from the live `ShipmentStore` on request.
//! The admin view layers the simulated learning curve on top: each
//! `simulate_learning` call appends a month of accuracy and promotes a fixed
//! number of ambiguous addresses to resolved. Those counters are display
//! values only; no shipment changes.

use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::store::{LearningMetric, Shipment, ShipmentStatus, ShipmentStore, StoreError};

/// Delivery confidence above which a shipment counts as resolved.
pub const RESOLVED_CONFIDENCE_THRESHOLD: f64 = 0.7;
/// Ambiguous addresses promoted to resolved per simulated learning cycle.
pub const PROMOTED_PER_CYCLE: usize = 5;
pub const MAX_ACCURACY: f64 = 99.5;

const MIN_ACCURACY_GAIN: f64 = 0.5;
const MAX_ACCURACY_GAIN: f64 = 2.0;

pub const PARTNER_MESSAGE: &str =
    "Feature in development: available loads, fleet management and revenue analytics are coming soon.";

// =============================================================================
// ROLES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    MsmeShipper,
    DeliveryAgent,
    CarrierPartner,
    Admin,
}

impl UserRole {
    pub const ALL: [Self; 4] = [Self::MsmeShipper, Self::DeliveryAgent, Self::CarrierPartner, Self::Admin];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::MsmeShipper => "Shipper",
            Self::DeliveryAgent => "Delivery Agent",
            Self::CarrierPartner => "Carrier Partner",
            Self::Admin => "Admin",
        }
    }

    /// API path serving this role's view.
    #[must_use]
    pub fn overview_path(self) -> &'static str {
        match self {
            Self::MsmeShipper => "/api/shipments",
            Self::DeliveryAgent => "/api/agent/tasks",
            Self::CarrierPartner => "/api/partner/overview",
            Self::Admin => "/api/admin/overview",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleEntry {
    pub role: UserRole,
    pub label: &'static str,
    pub overview_path: &'static str,
}

#[must_use]
pub fn roles() -> Vec<RoleEntry> {
    UserRole::ALL
        .into_iter()
        .map(|role| RoleEntry { role, label: role.label(), overview_path: role.overview_path() })
        .collect()
}

// =============================================================================
// ADMIN
// =============================================================================

/// Mutable admin-dashboard state: the accuracy series and promotions so far.
#[derive(Debug, Clone)]
pub struct AdminState {
    learning: Vec<LearningMetric>,
    promoted: usize,
}

impl Default for AdminState {
    fn default() -> Self {
        Self::seeded()
    }
}

impl AdminState {
    /// Starts from the six seeded months.
    #[must_use]
    pub fn seeded() -> Self {
        Self { learning: crate::fixtures::learning_metrics(), promoted: 0 }
    }

    #[must_use]
    pub fn learning(&self) -> &[LearningMetric] {
        &self.learning
    }

    /// Append one simulated month and promote a batch of ambiguous addresses.
    pub fn simulate_learning<R: Rng>(&mut self, rng: &mut R) -> &LearningMetric {
        let last = self.learning.last().map_or(0.0, |m| m.accuracy);
        let gain = rng.random_range(MIN_ACCURACY_GAIN..MAX_ACCURACY_GAIN);
        let accuracy = round_one_decimal((last + gain).min(MAX_ACCURACY));
        let month = format!("Month {}", self.learning.len() + 1);
        info!(%month, accuracy, "dashboard: simulated learning cycle");

        self.learning.push(LearningMetric { month, accuracy });
        self.promoted += PROMOTED_PER_CYCLE;
        &self.learning[self.learning.len() - 1]
    }
}

fn round_one_decimal(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub resolved: usize,
    pub ambiguous: usize,
    pub learning: Vec<LearningMetric>,
    /// Shipments awaiting driver validation, for manual review.
    pub pending_resolution: Vec<Shipment>,
}

#[must_use]
pub fn admin_overview(store: &ShipmentStore, admin: &AdminState) -> AdminOverview {
    let resolved = store
        .list()
        .filter(|s| s.resolved_delivery.as_ref().is_some_and(|d| d.confidence_score > RESOLVED_CONFIDENCE_THRESHOLD))
        .count();
    let ambiguous = store.len() - resolved;

    AdminOverview {
        resolved: resolved + admin.promoted,
        ambiguous: ambiguous.saturating_sub(admin.promoted),
        learning: admin.learning().to_vec(),
        pending_resolution: store.filter_status(&[ShipmentStatus::PendingResolution]),
    }
}

// =============================================================================
// AGENT
// =============================================================================

/// The delivery agent's queue: shipments out for delivery or awaiting validation.
#[must_use]
pub fn agent_tasks(store: &ShipmentStore) -> Vec<Shipment> {
    store.filter_status(&[ShipmentStatus::OutForDelivery, ShipmentStatus::PendingResolution])
}

/// Record an on-site validation by the agent.
///
/// # Errors
///
/// Propagates [`StoreError`] from [`ShipmentStore::validate_delivery`].
pub fn validate(store: &mut ShipmentStore, id: &str) -> Result<Shipment, StoreError> {
    let shipment = store.validate_delivery(id)?;
    info!(%id, "dashboard: delivery location validated by agent");
    Ok(shipment)
}

// =============================================================================
// PARTNER
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: ShipmentStatus,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PartnerOverview {
    pub message: &'static str,
    pub statuses: Vec<StatusCount>,
}

#[must_use]
pub fn partner_overview(store: &ShipmentStore) -> PartnerOverview {
    let statuses = ShipmentStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            label: status.label(),
            count: store.list().filter(|s| s.status == status).count(),
        })
        .collect();
    PartnerOverview { message: PARTNER_MESSAGE, statuses }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
