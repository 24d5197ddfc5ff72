//! Shipment model and the in-memory shipment store.
//!
//! DESIGN
//! ======
//! `ShipmentStore` is an explicit object held in `AppState` behind an
//! `RwLock`; there is no module-level singleton. Shipments are kept
//! newest-first. Nothing is ever deleted and nothing is persisted: a restart
//! reseeds from `fixtures`.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::geocode::ResolvedAddress;

/// Pickup confidence recorded after a driver validates a location on site.
pub const DRIVER_VALIDATED_CONFIDENCE: f64 = 0.99;

// =============================================================================
// SHIPMENT
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentStatus {
    PendingPickup,
    InTransit,
    OutForDelivery,
    Delivered,
    Exception,
    PendingResolution,
}

impl ShipmentStatus {
    pub const ALL: [Self; 6] = [
        Self::PendingPickup,
        Self::InTransit,
        Self::OutForDelivery,
        Self::Delivered,
        Self::Exception,
        Self::PendingResolution,
    ];

    /// Human-readable label shown on status badges.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::PendingPickup => "Pending Pickup",
            Self::InTransit => "In Transit",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
            Self::Exception => "Exception",
            Self::PendingResolution => "Pending Resolution",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub l: f64,
    pub w: f64,
    pub h: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: String,
    pub pickup_address: String,
    pub delivery_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_pickup: Option<ResolvedAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_delivery: Option<ResolvedAddress>,
    pub status: ShipmentStatus,
    pub weight_kg: f64,
    pub dimensions_cm: Dimensions,
    /// Whole rupees.
    pub price: u32,
    pub eta: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
}

/// Point on the admin dashboard's model-accuracy series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningMetric {
    pub month: String,
    pub accuracy: f64,
}

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("shipment not found: {0}")]
    NotFound(String),
    #[error("shipment {id} is {status:?}, expected {expected:?}")]
    InvalidStatus { id: String, status: ShipmentStatus, expected: ShipmentStatus },
}

impl crate::error::ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_SHIPMENT_NOT_FOUND",
            Self::InvalidStatus { .. } => "E_INVALID_STATUS",
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

#[derive(Debug, Default)]
pub struct ShipmentStore {
    shipments: VecDeque<Shipment>,
}

impl ShipmentStore {
    /// Store preloaded with the demo fixtures.
    #[must_use]
    pub fn seeded() -> Self {
        Self { shipments: crate::fixtures::shipments().into() }
    }

    /// Insert as the newest shipment.
    pub fn insert_front(&mut self, shipment: Shipment) {
        self.shipments.push_front(shipment);
    }

    /// All shipments, newest first.
    pub fn list(&self) -> impl Iterator<Item = &Shipment> {
        self.shipments.iter()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Shipment> {
        self.shipments.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shipments.len()
    }

    /// Shipments whose status is one of `statuses`, newest first.
    #[must_use]
    pub fn filter_status(&self, statuses: &[ShipmentStatus]) -> Vec<Shipment> {
        self.shipments
            .iter()
            .filter(|s| statuses.contains(&s.status))
            .cloned()
            .collect()
    }

    /// Overwrite a shipment's status. Returns the previous status.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    pub fn set_status(&mut self, id: &str, status: ShipmentStatus) -> Result<ShipmentStatus, StoreError> {
        let shipment = self.get_mut(id)?;
        Ok(std::mem::replace(&mut shipment.status, status))
    }

    /// Manually divert a shipment to `Exception`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    pub fn flag_exception(&mut self, id: &str) -> Result<Shipment, StoreError> {
        let shipment = self.get_mut(id)?;
        shipment.status = ShipmentStatus::Exception;
        Ok(shipment.clone())
    }

    /// Record a driver's on-site validation of an ambiguous address: the
    /// shipment goes back out for delivery and its pickup confidence becomes
    /// [`DRIVER_VALIDATED_CONFIDENCE`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id, or
    /// [`StoreError::InvalidStatus`] unless the shipment is pending resolution.
    pub fn validate_delivery(&mut self, id: &str) -> Result<Shipment, StoreError> {
        let shipment = self.get_mut(id)?;
        if shipment.status != ShipmentStatus::PendingResolution {
            return Err(StoreError::InvalidStatus {
                id: id.to_string(),
                status: shipment.status,
                expected: ShipmentStatus::PendingResolution,
            });
        }
        shipment.status = ShipmentStatus::OutForDelivery;
        if let Some(pickup) = shipment.resolved_pickup.as_mut() {
            pickup.confidence_score = DRIVER_VALIDATED_CONFIDENCE;
        }
        Ok(shipment.clone())
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Shipment, StoreError> {
        self.shipments
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
