use super::*;
use crate::rng::shared_rng;
use config::{DEFAULT_GEMINI_BASE_URL, GeocodeTimeouts};

fn config(api_key: Option<&str>) -> GeocodeConfig {
    GeocodeConfig {
        api_key: api_key.map(str::to_string),
        model: "gemini-2.5-flash".into(),
        base_url: DEFAULT_GEMINI_BASE_URL.into(),
        temperature: 0.1,
        timeouts: GeocodeTimeouts { request_secs: 5, connect_secs: 5 },
        simulation_delay_ms: 0,
    }
}

#[test]
fn no_credential_selects_simulation() {
    let client = GeocodeClient::from_config(config(None), shared_rng(Some(1))).unwrap();
    assert_eq!(client.mode(), GeocodeMode::Simulated);
    assert_eq!(client.model(), "gemini-2.5-flash");
}

#[test]
fn credential_selects_gemini() {
    let client = GeocodeClient::from_config(config(Some("key")), shared_rng(Some(1))).unwrap();
    assert_eq!(client.mode(), GeocodeMode::Gemini);
}

#[tokio::test]
async fn simulated_client_resolves_without_network() {
    let client = GeocodeClient::from_config(config(None), shared_rng(Some(1))).unwrap();
    let addr = client.resolve("e-506 street 78 uttam vihar").await.unwrap();
    assert!(addr.normalized_address.starts_with("(Simulated)"));
    assert!((0.7..=0.95).contains(&addr.confidence_score));
}

#[tokio::test]
async fn dispatch_rejects_blank_query_in_both_modes() {
    for key in [None, Some("key")] {
        let client = GeocodeClient::from_config(config(key), shared_rng(Some(1))).unwrap();
        assert!(matches!(client.resolve("  ").await, Err(GeocodeError::EmptyQuery)));
    }
}

#[tokio::test]
async fn gemini_client_uses_configured_base_url() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-2.5-flash:generateContent")
        .with_status(200)
        .with_body(
            serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": "{\"normalizedAddress\":\"MG Road\"}" }] } }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut cfg = config(Some("key"));
    cfg.base_url = server.url();
    let client = GeocodeClient::from_config(cfg, shared_rng(Some(1))).unwrap();

    // Upstream answered with an object missing four required fields.
    let err = client.resolve("mg road").await.unwrap_err();
    mock.assert_async().await;
    assert!(matches!(err, GeocodeError::ApiParse(_)));
}
