//! Booking form — two confirmed addresses plus package details become a shipment.
//!
//! DESIGN
//! ======
//! The form owns one `AddressResolver` per slot and reads addresses only
//! through `AddressResolver::confirmed`, so an address that was never
//! confirmed, or was retracted by an edit, can never reach the store.
//! Placeholder fields (id, price) come from the injected RNG; they are not
//! security- or money-relevant.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::resolver::{AddressResolver, ResolverView};
use crate::geocode::MapPreview;
use crate::store::{Dimensions, Shipment, ShipmentStatus, ShipmentStore};

pub const MIN_PRICE: u32 = 300;
pub const MAX_PRICE: u32 = 1500;
pub const DEFAULT_ETA: &str = "3 days";
pub const UNASSIGNED_DRIVER: &str = "Unassigned";

const DEFAULT_WEIGHT_KG: f64 = 5.0;
const DEFAULT_SIDE_CM: f64 = 10.0;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressSlot {
    Pickup,
    Delivery,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDetails {
    pub weight_kg: f64,
    pub dimensions_cm: Dimensions,
}

impl Default for PackageDetails {
    fn default() -> Self {
        Self {
            weight_kg: DEFAULT_WEIGHT_KG,
            dimensions_cm: Dimensions { l: DEFAULT_SIDE_CM, w: DEFAULT_SIDE_CM, h: DEFAULT_SIDE_CM },
        }
    }
}

impl PackageDetails {
    /// Weight and every dimension must be finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidPackage`] naming the offending value.
    pub fn validate(&self) -> Result<(), BookingError> {
        let Dimensions { l, w, h } = self.dimensions_cm;
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.weight_kg) {
            return Err(BookingError::InvalidPackage(format!("weight must be positive, got {}", self.weight_kg)));
        }
        if !(positive(l) && positive(w) && positive(h)) {
            return Err(BookingError::InvalidPackage(format!("dimensions must be positive, got {l}x{w}x{h}")));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Please resolve both pickup and delivery addresses.")]
    Unresolved,
    #[error("invalid package details: {0}")]
    InvalidPackage(String),
}

impl crate::error::ErrorCode for BookingError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unresolved => "E_ADDRESSES_UNRESOLVED",
            Self::InvalidPackage(_) => "E_INVALID_PACKAGE",
        }
    }
}

/// Serializable snapshot of a booking form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    pub id: Uuid,
    pub pickup: ResolverView,
    pub delivery: ResolverView,
    pub package: PackageDetails,
    pub bookable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// =============================================================================
// FORM
// =============================================================================

#[derive(Debug, Clone)]
pub struct BookingForm {
    id: Uuid,
    pickup: AddressResolver,
    delivery: AddressResolver,
    package: PackageDetails,
    error: Option<String>,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingForm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            pickup: AddressResolver::new(),
            delivery: AddressResolver::new(),
            package: PackageDetails::default(),
            error: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn resolver(&self, slot: AddressSlot) -> &AddressResolver {
        match slot {
            AddressSlot::Pickup => &self.pickup,
            AddressSlot::Delivery => &self.delivery,
        }
    }

    pub fn resolver_mut(&mut self, slot: AddressSlot) -> &mut AddressResolver {
        match slot {
            AddressSlot::Pickup => &mut self.pickup,
            AddressSlot::Delivery => &mut self.delivery,
        }
    }

    pub fn set_package(&mut self, package: PackageDetails) {
        self.package = package;
    }

    /// `true` once both slots hold a confirmed address.
    #[must_use]
    pub fn is_bookable(&self) -> bool {
        self.pickup.confirmed().is_some() && self.delivery.confirmed().is_some()
    }

    /// Create a shipment from the confirmed addresses and insert it newest-first.
    ///
    /// The form keeps its fields after a successful booking.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Unresolved`] unless both slots are confirmed.
    /// - [`BookingError::InvalidPackage`] for non-positive weight or dimensions.
    ///
    /// The store is untouched on error.
    pub fn submit<R: Rng>(&mut self, store: &mut ShipmentStore, rng: &mut R) -> Result<Shipment, BookingError> {
        let result = self.build_shipment(store, rng);
        match &result {
            Ok(shipment) => {
                self.error = None;
                store.insert_front(shipment.clone());
                info!(id = %shipment.id, price = shipment.price, form = %self.id, "booking: shipment created");
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        result
    }

    fn build_shipment<R: Rng>(&self, store: &ShipmentStore, rng: &mut R) -> Result<Shipment, BookingError> {
        let (Some(pickup), Some(delivery)) = (self.pickup.confirmed(), self.delivery.confirmed()) else {
            return Err(BookingError::Unresolved);
        };
        self.package.validate()?;

        Ok(Shipment {
            id: generate_shipment_id(store, rng),
            pickup_address: pickup.normalized_address.clone(),
            delivery_address: delivery.normalized_address.clone(),
            resolved_pickup: Some(pickup.clone()),
            resolved_delivery: Some(delivery.clone()),
            status: ShipmentStatus::PendingPickup,
            weight_kg: self.package.weight_kg,
            dimensions_cm: self.package.dimensions_cm,
            price: rng.random_range(MIN_PRICE..=MAX_PRICE),
            eta: DEFAULT_ETA.into(),
            driver: Some(UNASSIGNED_DRIVER.into()),
        })
    }

    #[must_use]
    pub fn view(&self, map: &MapPreview) -> BookingView {
        BookingView {
            id: self.id,
            pickup: self.pickup.view(map),
            delivery: self.delivery.view(map),
            package: self.package,
            bookable: self.is_bookable(),
            error: self.error.clone(),
        }
    }
}

/// `SM` followed by five digits, redrawn on collision with an existing id.
fn generate_shipment_id<R: Rng>(store: &ShipmentStore, rng: &mut R) -> String {
    loop {
        let id = format!("SM{}", rng.random_range(10_000..=99_999u32));
        if !store.contains(&id) {
            return id;
        }
    }
}

#[cfg(test)]
#[path = "booking_test.rs"]
mod tests;
