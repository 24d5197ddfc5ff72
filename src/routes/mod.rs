//! Router assembly and the JSON error envelope.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every endpoint is JSON under `/api`, plus `/healthz`. Handlers return
//! `Result<_, ApiError>`; service errors convert into `ApiError` through
//! their `ErrorCode` impls, so every failure renders as
//! `{ "code": "E_…", "message": "…", "retryable": bool }`.

pub mod bookings;
pub mod dashboards;
pub mod resolve;
pub mod shipments;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, patch, post};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ErrorCode;
use crate::geocode::GeocodeError;
use crate::services::booking::BookingError;
use crate::services::resolver::ResolverError;
use crate::state::AppState;
use crate::store::StoreError;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/roles", get(dashboards::list_roles))
        .route("/api/resolve", post(resolve::resolve_address))
        .route("/api/bookings", post(bookings::create_booking))
        .route("/api/bookings/{id}", get(bookings::get_booking).delete(bookings::delete_booking))
        .route("/api/bookings/{id}/{slot}/resolve", post(bookings::resolve_slot))
        .route("/api/bookings/{id}/{slot}/confirm", post(bookings::confirm_slot))
        .route("/api/bookings/{id}/{slot}/edit", post(bookings::edit_slot))
        .route("/api/bookings/{id}/package", patch(bookings::update_package))
        .route("/api/bookings/{id}/submit", post(bookings::submit_booking))
        .route("/api/shipments", get(shipments::list_shipments))
        .route("/api/shipments/{id}", get(shipments::get_shipment))
        .route("/api/shipments/{id}/exception", post(shipments::flag_exception))
        .route("/api/admin/overview", get(dashboards::admin_overview))
        .route("/api/admin/simulate-learning", post(dashboards::simulate_learning))
        .route("/api/agent/tasks", get(dashboards::agent_tasks))
        .route("/api/agent/tasks/{id}/validate", post(dashboards::validate_task))
        .route("/api/partner/overview", get(dashboards::partner_overview))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// ERROR ENVELOPE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    pub retryable: bool,
}

/// An HTTP status plus the JSON error body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    fn from_code(status: StatusCode, err: &impl ErrorCode) -> Self {
        Self {
            status,
            body: ErrorBody { code: err.error_code(), message: err.user_message(), retryable: err.retryable() },
        }
    }

    #[must_use]
    pub fn booking_not_found(id: uuid::Uuid) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: ErrorBody { code: "E_BOOKING_NOT_FOUND", message: format!("booking not found: {id}"), retryable: false },
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody { code: "E_INTERNAL", message: message.into(), retryable: true },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<GeocodeError> for ApiError {
    fn from(err: GeocodeError) -> Self {
        let status = if err.is_validation() { StatusCode::BAD_REQUEST } else { StatusCode::BAD_GATEWAY };
        Self::from_code(status, &err)
    }
}

impl From<ResolverError> for ApiError {
    fn from(err: ResolverError) -> Self {
        let status = match err {
            ResolverError::EmptyAddress => StatusCode::BAD_REQUEST,
            ResolverError::InFlight
            | ResolverError::AlreadyConfirmed
            | ResolverError::NothingToConfirm
            | ResolverError::NotConfirmed => StatusCode::CONFLICT,
            ResolverError::Resolution(_) => StatusCode::BAD_GATEWAY,
        };
        Self::from_code(status, &err)
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        Self::from_code(StatusCode::UNPROCESSABLE_ENTITY, &err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let status = match err {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::InvalidStatus { .. } => StatusCode::CONFLICT,
        };
        Self::from_code(status, &err)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
