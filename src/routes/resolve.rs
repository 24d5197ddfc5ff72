//! Stateless address resolution.

use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;

use super::ApiError;
use crate::geocode::ResolvedAddress;
use crate::geocode::types::validate_query;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResolveBody {
    pub query: String,
}

/// `POST /api/resolve` — resolve a free-text address without touching any booking.
pub async fn resolve_address(
    State(state): State<AppState>,
    Json(body): Json<ResolveBody>,
) -> Result<Json<ResolvedAddress>, ApiError> {
    let query = validate_query(&body.query)?;
    let resolved = state.geocoder.resolve(query).await?;
    Ok(Json(resolved))
}

#[cfg(test)]
#[path = "resolve_test.rs"]
mod tests;
