//! Shipment list and detail routes (the shipper dashboard).

use axum::extract::{Path, State};
use axum::response::Json;
use tracing::info;

use super::ApiError;
use crate::state::AppState;
use crate::store::{Shipment, StoreError};

/// `GET /api/shipments` — all shipments, newest first.
pub async fn list_shipments(State(state): State<AppState>) -> Json<Vec<Shipment>> {
    let store = state.store.read().await;
    Json(store.list().cloned().collect())
}

/// `GET /api/shipments/:id` — one shipment.
pub async fn get_shipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Shipment>, ApiError> {
    let store = state.store.read().await;
    let shipment = store.get(&id).cloned().ok_or(StoreError::NotFound(id))?;
    Ok(Json(shipment))
}

/// `POST /api/shipments/:id/exception` — manually flag a shipment and stop its progression.
pub async fn flag_exception(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Shipment>, ApiError> {
    let shipment = state.store.write().await.flag_exception(&id)?;
    state.tracker.unwatch(&id);
    info!(%id, "shipment: flagged as exception");
    Ok(Json(shipment))
}

#[cfg(test)]
#[path = "shipments_test.rs"]
mod tests;
