//! Gemini `generateContent` client for address resolution.
//!
//! Thin HTTP wrapper around one endpoint. The request carries a response
//! schema so the model answers with a bare JSON object; pure parsing lives in
//! `parse_response` for testability.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::config::GeocodeTimeouts;
use super::prompt::{SYSTEM_INSTRUCTION, address_schema, user_prompt};
use super::types::{AddressGeocoder, GeocodeError, ResolvedAddress, validate_query};

const RESPONSE_MIME_TYPE: &str = "application/json";

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

impl GeminiClient {
    /// Build a client against `base_url` (no trailing slash).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::HttpClientBuild`] if reqwest cannot build the client.
    pub fn new(
        api_key: String,
        base_url: String,
        model: String,
        temperature: f32,
        timeouts: GeocodeTimeouts,
    ) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| GeocodeError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url, model, temperature })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn generate(&self, query: &str) -> Result<ResolvedAddress, GeocodeError> {
        let prompt = user_prompt(query);
        let body = build_request(&prompt, self.temperature);

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GeocodeError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| GeocodeError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(GeocodeError::ApiResponse { status, body: text });
        }

        parse_response(&text)
    }
}

#[async_trait::async_trait]
impl AddressGeocoder for GeminiClient {
    async fn resolve(&self, query: &str) -> Result<ResolvedAddress, GeocodeError> {
        let query = validate_query(query)?;
        info!(model = %self.model, query_len = query.len(), "geocode: resolving via gemini");

        match self.generate(query).await {
            Ok(address) => {
                info!(confidence = address.confidence_score, "geocode: resolved");
                Ok(address)
            }
            Err(e) => {
                warn!(error = %e, "geocode: resolution failed");
                Err(e)
            }
        }
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    contents: Vec<ApiContent<'a>>,
    system_instruction: ApiContent<'a>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct ApiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<ApiPart<'a>>,
}

#[derive(Serialize)]
struct ApiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

fn build_request(prompt: &str, temperature: f32) -> ApiRequest<'_> {
    ApiRequest {
        contents: vec![ApiContent { role: Some("user"), parts: vec![ApiPart { text: prompt }] }],
        system_instruction: ApiContent { role: None, parts: vec![ApiPart { text: SYSTEM_INSTRUCTION }] },
        generation_config: GenerationConfig {
            temperature,
            response_mime_type: RESPONSE_MIME_TYPE,
            response_schema: address_schema(),
        },
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Extract the first candidate's text, trim it, and parse it as an address.
fn parse_response(json: &str) -> Result<ResolvedAddress, GeocodeError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| GeocodeError::ApiParse(e.to_string()))?;

    let text: String = api
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect()
        })
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(GeocodeError::ApiParse("response contained no text".into()));
    }

    parse_address_json(text)
}

fn parse_address_json(text: &str) -> Result<ResolvedAddress, GeocodeError> {
    let address: ResolvedAddress =
        serde_json::from_str(text).map_err(|e| GeocodeError::ApiParse(format!("address json: {e}")))?;
    address.validate()
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
