//! Role dashboards: admin learning curve, agent task queue, partner placeholder.

use axum::extract::{Path, State};
use axum::response::Json;

use super::ApiError;
use crate::rng::with_rng;
use crate::services::dashboard::{self, AdminOverview, PartnerOverview, RoleEntry};
use crate::state::AppState;
use crate::store::{LearningMetric, Shipment};

/// `GET /api/roles` — the switchable views.
pub async fn list_roles() -> Json<Vec<RoleEntry>> {
    Json(dashboard::roles())
}

/// `GET /api/admin/overview`
pub async fn admin_overview(State(state): State<AppState>) -> Json<AdminOverview> {
    let store = state.store.read().await;
    let admin = state.admin.read().await;
    Json(dashboard::admin_overview(&store, &admin))
}

/// `POST /api/admin/simulate-learning` — run one simulated retraining cycle.
pub async fn simulate_learning(State(state): State<AppState>) -> Json<LearningMetric> {
    let mut admin = state.admin.write().await;
    let metric = with_rng(&state.rng, |rng| admin.simulate_learning(rng).clone());
    Json(metric)
}

/// `GET /api/agent/tasks`
pub async fn agent_tasks(State(state): State<AppState>) -> Json<Vec<Shipment>> {
    Json(dashboard::agent_tasks(&*state.store.read().await))
}

/// `POST /api/agent/tasks/:id/validate` — driver confirms the location on site.
///
/// The shipment lands in `OUT_FOR_DELIVERY` and is not tracked, the same as a
/// seeded out-for-delivery shipment.
pub async fn validate_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Shipment>, ApiError> {
    let shipment = dashboard::validate(&mut *state.store.write().await, &id)?;
    Ok(Json(shipment))
}

/// `GET /api/partner/overview`
pub async fn partner_overview(State(state): State<AppState>) -> Json<PartnerOverview> {
    Json(dashboard::partner_overview(&*state.store.read().await))
}

#[cfg(test)]
#[path = "dashboards_test.rs"]
mod tests;
