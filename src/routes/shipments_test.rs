use axum::http::StatusCode;

use super::*;
use crate::state::test_helpers::test_app_state;
use crate::store::ShipmentStatus;

#[tokio::test]
async fn list_is_newest_first() {
    let Json(shipments) = list_shipments(State(test_app_state())).await;
    let ids: Vec<&str> = shipments.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["SM74839", "SM82610", "SM56193", "SM99021"]);
}

#[tokio::test]
async fn get_known_and_unknown() {
    let state = test_app_state();
    let Json(shipment) = get_shipment(State(state.clone()), Path("SM82610".into())).await.unwrap();
    assert_eq!(shipment.status, ShipmentStatus::InTransit);

    let err = get_shipment(State(state), Path("SM00000".into())).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(err.body.code, "E_SHIPMENT_NOT_FOUND");
}

#[tokio::test]
async fn flag_exception_stops_tracking() {
    let state = test_app_state();
    state.tracker.watch("SM82610");

    let Json(shipment) = flag_exception(State(state.clone()), Path("SM82610".into())).await.unwrap();
    assert_eq!(shipment.status, ShipmentStatus::Exception);
    assert_eq!(state.tracker.active(), 0);
}
