//! Prompt text and response schema for address resolution.

/// Fixed system instruction sent with every resolution request.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert logistics AI for India. Your task is to take highly \
unstructured, informal Indian addresses and convert them into a precise, structured JSON format with accurate \
latitude/longitude coordinates. Handle common notations like 'near', 'opposite', 'gali no', and local landmarks.";

/// Sampling temperature used unless overridden by config.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Wrap a raw address query in the user instruction.
#[must_use]
pub fn user_prompt(query: &str) -> String {
    format!("Parse and geocode the following unstructured Indian address: \"{query}\"")
}

/// Response schema in the upstream's OpenAPI-subset dialect.
///
/// Field names match [`super::types::ResolvedAddress`] on the wire.
#[must_use]
pub fn address_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "normalizedAddress": {
                "type": "STRING",
                "description": "The cleaned, standardized, and complete address string. e.g., 'E-506, Street Number 78, Uttam Vihar, Block D, New Delhi, Delhi 110059, India'"
            },
            "latitude": {
                "type": "NUMBER",
                "description": "The precise latitude coordinate for the address."
            },
            "longitude": {
                "type": "NUMBER",
                "description": "The precise longitude coordinate for the address."
            },
            "confidenceScore": {
                "type": "NUMBER",
                "description": "A score from 0.0 to 1.0 indicating the model's confidence in the geocoding accuracy. 1.0 is highest confidence."
            },
            "parsingExplanation": {
                "type": "STRING",
                "description": "A brief, one-sentence explanation of how the unstructured address was interpreted, including any assumptions made about landmarks or localities."
            }
        },
        "required": ["normalizedAddress", "latitude", "longitude", "confidenceScore", "parsingExplanation"]
    })
}

#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;
