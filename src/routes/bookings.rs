//! Booking session routes: per-slot resolve/confirm/edit, package details,
//! submit and close. A submitted form stays open until it is deleted or the
//! session sweeper expires it.
//!
//! A slot resolution is split in two lock scopes: `begin_resolve` under the
//! bookings lock, then the geocoder call with no lock held, then `complete`
//! under the lock again. The geocoder call and the completion run in a
//! spawned task so a client that disconnects mid-request cannot strand the
//! slot in `Resolving`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::ApiError;
use super::resolve::ResolveBody;
use crate::rng::with_rng;
use crate::services::booking::{AddressSlot, BookingForm, BookingView, PackageDetails};
use crate::services::resolver::{Completion, ResolverError, ResolverPhase};
use crate::state::AppState;
use crate::store::Shipment;

/// `POST /api/bookings` — open a new booking form.
pub async fn create_booking(State(state): State<AppState>) -> (StatusCode, Json<BookingView>) {
    let form = BookingForm::new();
    let view = form.view(&state.map);
    state.bookings.write().await.insert(form);
    info!(id = %view.id, "booking: form opened");
    (StatusCode::CREATED, Json(view))
}

/// `GET /api/bookings/:id` — current form view.
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingView>, ApiError> {
    let bookings = state.bookings.read().await;
    let form = bookings.get(&id).ok_or_else(|| ApiError::booking_not_found(id))?;
    Ok(Json(form.view(&state.map)))
}

/// `DELETE /api/bookings/:id` — close a booking form.
pub async fn delete_booking(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    let removed = state.bookings.write().await.remove(&id);
    removed.ok_or_else(|| ApiError::booking_not_found(id))?;
    info!(%id, "booking: form closed");
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/bookings/:id/:slot/resolve` — resolve one address slot.
pub async fn resolve_slot(
    State(state): State<AppState>,
    Path((id, slot)): Path<(Uuid, AddressSlot)>,
    Json(body): Json<ResolveBody>,
) -> Result<Json<BookingView>, ApiError> {
    let ticket = {
        let mut bookings = state.bookings.write().await;
        let form = bookings.get_mut(&id).ok_or_else(|| ApiError::booking_not_found(id))?;
        form.resolver_mut(slot).begin_resolve(&body.query)?
    };
    debug!(%id, ?slot, generation = ticket.generation(), "booking: slot resolution started");

    let task_state = state.clone();
    let completion = tokio::spawn(async move {
        let outcome = task_state.geocoder.resolve(ticket.query()).await;
        let mut bookings = task_state.bookings.write().await;
        bookings.get_mut(&id).map(|form| form.resolver_mut(slot).complete(&ticket, outcome))
    })
    .await
    .map_err(|e| ApiError::internal(format!("resolution task failed: {e}")))?;

    let bookings = state.bookings.read().await;
    let form = bookings.get(&id).ok_or_else(|| ApiError::booking_not_found(id))?;
    let resolver = form.resolver(slot);
    match completion {
        Some(Completion::Applied) if resolver.phase() == ResolverPhase::Idle => {
            let message = resolver.error().unwrap_or_default().to_string();
            warn!(%id, ?slot, "booking: slot resolution failed");
            Err(ResolverError::Resolution(message).into())
        }
        _ => Ok(Json(form.view(&state.map))),
    }
}

/// `POST /api/bookings/:id/:slot/confirm` — accept the resolved address.
pub async fn confirm_slot(
    State(state): State<AppState>,
    Path((id, slot)): Path<(Uuid, AddressSlot)>,
) -> Result<Json<BookingView>, ApiError> {
    let mut bookings = state.bookings.write().await;
    let form = bookings.get_mut(&id).ok_or_else(|| ApiError::booking_not_found(id))?;
    form.resolver_mut(slot).confirm()?;
    Ok(Json(form.view(&state.map)))
}

/// `POST /api/bookings/:id/:slot/edit` — reopen a confirmed address.
pub async fn edit_slot(
    State(state): State<AppState>,
    Path((id, slot)): Path<(Uuid, AddressSlot)>,
) -> Result<Json<BookingView>, ApiError> {
    let mut bookings = state.bookings.write().await;
    let form = bookings.get_mut(&id).ok_or_else(|| ApiError::booking_not_found(id))?;
    form.resolver_mut(slot).edit()?;
    Ok(Json(form.view(&state.map)))
}

/// `PATCH /api/bookings/:id/package` — replace weight and dimensions.
pub async fn update_package(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(package): Json<PackageDetails>,
) -> Result<Json<BookingView>, ApiError> {
    package.validate()?;
    let mut bookings = state.bookings.write().await;
    let form = bookings.get_mut(&id).ok_or_else(|| ApiError::booking_not_found(id))?;
    form.set_package(package);
    Ok(Json(form.view(&state.map)))
}

/// `POST /api/bookings/:id/submit` — create the shipment and start tracking it.
pub async fn submit_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<Shipment>), ApiError> {
    let shipment = {
        let mut bookings = state.bookings.write().await;
        let form = bookings.get_mut(&id).ok_or_else(|| ApiError::booking_not_found(id))?;
        let mut store = state.store.write().await;
        with_rng(&state.rng, |rng| form.submit(&mut store, rng))?
    };
    state.tracker.watch(&shipment.id);
    Ok((StatusCode::CREATED, Json(shipment)))
}

#[cfg(test)]
#[path = "bookings_test.rs"]
mod tests;
