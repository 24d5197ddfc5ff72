//! Geocode types — the resolved address record, confidence tiers and errors.
//!
//! Shared by the Gemini client and the simulator so the rest of the system
//! never sees which backend produced an address.

use serde::{Deserialize, Serialize};

/// Message shown to the user for every upstream resolution failure.
pub const RESOLUTION_FAILED_MESSAGE: &str = "Failed to resolve address. The AI model may be temporarily unavailable.";

/// Message shown to the user when the query is blank.
pub const EMPTY_ADDRESS_MESSAGE: &str = "Address cannot be empty.";

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by address resolution.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The query was empty or whitespace-only. Raised before any upstream call.
    #[error("address query is empty")]
    EmptyQuery,

    /// The HTTP request to the upstream model failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The upstream model returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The upstream response, or the address JSON inside it, was malformed.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl GeocodeError {
    /// `true` for input problems the user can fix by editing the query.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyQuery)
    }
}

impl crate::error::ErrorCode for GeocodeError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::EmptyQuery => "E_EMPTY_ADDRESS",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }

    fn user_message(&self) -> String {
        match self {
            Self::EmptyQuery => EMPTY_ADDRESS_MESSAGE.to_string(),
            _ => RESOLUTION_FAILED_MESSAGE.to_string(),
        }
    }
}

/// Reject blank queries. Returns the query unchanged otherwise.
///
/// # Errors
///
/// Returns [`GeocodeError::EmptyQuery`] for empty or whitespace-only input.
pub fn validate_query(query: &str) -> Result<&str, GeocodeError> {
    if query.trim().is_empty() {
        return Err(GeocodeError::EmptyQuery);
    }
    Ok(query)
}

// =============================================================================
// RESOLVED ADDRESS
// =============================================================================

/// Structured, geocoded output of an address resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAddress {
    pub normalized_address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Model-reported confidence in [0, 1].
    pub confidence_score: f64,
    pub parsing_explanation: String,
}

impl ResolvedAddress {
    /// Check the invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::ApiParse`] for out-of-range confidence,
    /// non-finite coordinates or a blank normalized address.
    pub fn validate(self) -> Result<Self, GeocodeError> {
        if !(0.0..=1.0).contains(&self.confidence_score) {
            return Err(GeocodeError::ApiParse(format!("confidenceScore out of range: {}", self.confidence_score)));
        }
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(GeocodeError::ApiParse(format!("latitude out of range: {}", self.latitude)));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(GeocodeError::ApiParse(format!("longitude out of range: {}", self.longitude)));
        }
        if self.normalized_address.trim().is_empty() {
            return Err(GeocodeError::ApiParse("normalizedAddress is empty".into()));
        }
        Ok(self)
    }

    #[must_use]
    pub fn confidence_tier(&self) -> ConfidenceTier {
        ConfidenceTier::from_score(self.confidence_score)
    }

    /// Confidence as a whole percentage, as shown on the confidence badge.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence_score.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

// =============================================================================
// CONFIDENCE TIER
// =============================================================================

/// Display treatment for a confidence score. Has no business effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > 0.85 {
            Self::High
        } else if score > 0.6 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

// =============================================================================
// GEOCODER TRAIT
// =============================================================================

/// Backend-neutral async trait for address resolution. Enables mocking in tests.
#[async_trait::async_trait]
pub trait AddressGeocoder: Send + Sync {
    /// Resolve one free-text address. A single attempt, no retries.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::EmptyQuery`] for blank input, or a resolution
    /// error if the upstream call fails or returns malformed data.
    async fn resolve(&self, query: &str) -> Result<ResolvedAddress, GeocodeError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
