use super::*;
use crate::state::test_helpers::test_app_state;

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn geocode_validation_is_bad_request() {
    let err = ApiError::from(GeocodeError::EmptyQuery);
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.body.code, "E_EMPTY_ADDRESS");
    assert!(!err.body.retryable);
}

#[test]
fn geocode_upstream_failure_is_bad_gateway_and_retryable() {
    let err = ApiError::from(GeocodeError::ApiResponse { status: 503, body: "busy".into() });
    assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    assert!(err.body.retryable);
    assert!(!err.body.message.contains("busy"), "upstream body must not leak");
}

#[test]
fn resolver_errors_map_to_statuses() {
    assert_eq!(ApiError::from(ResolverError::EmptyAddress).status, StatusCode::BAD_REQUEST);
    assert_eq!(ApiError::from(ResolverError::InFlight).status, StatusCode::CONFLICT);
    assert_eq!(ApiError::from(ResolverError::NotConfirmed).status, StatusCode::CONFLICT);
    assert_eq!(ApiError::from(ResolverError::Resolution("x".into())).status, StatusCode::BAD_GATEWAY);
}

#[test]
fn store_and_booking_errors_map_to_statuses() {
    assert_eq!(ApiError::from(StoreError::NotFound("SM1".into())).status, StatusCode::NOT_FOUND);
    assert_eq!(ApiError::from(BookingError::Unresolved).status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn error_renders_json_envelope() {
    let response = ApiError::from(StoreError::NotFound("SM1".into())).into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "E_SHIPMENT_NOT_FOUND");
    assert_eq!(json["retryable"], false);
    assert_eq!(json["message"], "shipment not found: SM1");
}

// =============================================================================
// Router
// =============================================================================

/// Serve the router on an ephemeral port and return its base URL.
async fn serve() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(test_app_state())).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn healthz_is_ok() {
    let base = serve().await;
    let response = reqwest::get(format!("{base}/healthz")).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn resolve_route_rejects_blank_query() {
    let base = serve().await;
    let response = reqwest::Client::new()
        .post(format!("{base}/api/resolve"))
        .json(&serde_json::json!({ "query": "  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["message"], "Address cannot be empty.");
}

#[tokio::test]
async fn unknown_slot_is_rejected_by_path_extractor() {
    let base = serve().await;
    let response = reqwest::Client::new()
        .post(format!("{base}/api/bookings/{}/billing/confirm", uuid::Uuid::new_v4()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn booking_round_trip_over_http() {
    let base = serve().await;
    let client = reqwest::Client::new();
    let view: serde_json::Value = client.post(format!("{base}/api/bookings")).send().await.unwrap().json().await.unwrap();
    let id = view["id"].as_str().unwrap().to_string();

    for (slot, query) in [("pickup", "e-506 street 78 uttam vihar"), ("delivery", "hadapsar, pune")] {
        let resolved = client
            .post(format!("{base}/api/bookings/{id}/{slot}/resolve"))
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await
            .unwrap();
        assert_eq!(resolved.status().as_u16(), 200);
        let confirmed = client.post(format!("{base}/api/bookings/{id}/{slot}/confirm")).send().await.unwrap();
        assert_eq!(confirmed.status().as_u16(), 200);
    }

    let submitted = client.post(format!("{base}/api/bookings/{id}/submit")).send().await.unwrap();
    assert_eq!(submitted.status().as_u16(), 201);
    let shipment: serde_json::Value = submitted.json().await.unwrap();
    assert_eq!(shipment["status"], "PENDING_PICKUP");

    let list: serde_json::Value = client.get(format!("{base}/api/shipments")).send().await.unwrap().json().await.unwrap();
    assert_eq!(list.as_array().unwrap().len(), 5);
    assert_eq!(list[0]["id"], shipment["id"]);
}

#[tokio::test]
async fn delete_booking_over_http() {
    let base = serve().await;
    let client = reqwest::Client::new();
    let view: serde_json::Value = client.post(format!("{base}/api/bookings")).send().await.unwrap().json().await.unwrap();
    let id = view["id"].as_str().unwrap().to_string();

    let deleted = client.delete(format!("{base}/api/bookings/{id}")).send().await.unwrap();
    assert_eq!(deleted.status().as_u16(), 204);
    let fetched = client.get(format!("{base}/api/bookings/{id}")).send().await.unwrap();
    assert_eq!(fetched.status().as_u16(), 404);
}
