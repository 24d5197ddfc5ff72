mod error;
mod fixtures;
mod geocode;
mod rng;
mod routes;
mod services;
mod state;
mod store;

use std::sync::Arc;

use geocode::{AddressGeocoder, GeocodeClient, GeocodeMode, MapPreview};
use services::sessions::{SessionLimits, spawn_session_sweeper};
use services::tracker::ProgressionIntervals;
use store::ShipmentStatus;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");
    let seed = std::env::var("RNG_SEED").ok().and_then(|v| v.parse::<u64>().ok());
    let rng = rng::shared_rng(seed);

    // A malformed geocode config falls back to simulation rather than refusing to start.
    let geocoder: Arc<dyn AddressGeocoder> = match GeocodeClient::from_env(rng.clone()) {
        Ok(client) => {
            match client.mode() {
                GeocodeMode::Gemini => tracing::info!(model = client.model(), "geocoder: Gemini client initialized"),
                GeocodeMode::Simulated => {
                    tracing::warn!("geocoder: no API_KEY configured; running in simulation mode");
                }
            }
            Arc::new(client)
        }
        Err(e) => {
            tracing::warn!(error = %e, "geocoder: config invalid; running in simulation mode");
            Arc::new(geocode::simulated::SimulatedGeocoder::new(
                rng.clone(),
                std::time::Duration::from_millis(geocode::config::DEFAULT_SIMULATION_DELAY_MS),
            ))
        }
    };

    let limits = SessionLimits::from_env();
    let state = state::AppState::new(
        geocoder,
        rng,
        MapPreview::from_env(),
        ProgressionIntervals::from_env(),
        limits.idle_ttl,
    );

    // Seeded shipments still in the forward lifecycle progress like new bookings.
    let progressable: Vec<String> = state
        .store
        .read()
        .await
        .filter_status(&[ShipmentStatus::PendingPickup, ShipmentStatus::InTransit])
        .into_iter()
        .map(|s| s.id)
        .collect();
    for id in &progressable {
        state.tracker.watch(id);
    }
    let intervals = state.tracker.intervals();
    tracing::info!(
        watched = state.tracker.active(),
        min_ms = intervals.min().as_millis(),
        max_ms = intervals.max().as_millis(),
        "tracker: status progression configured"
    );

    let _sweeper = spawn_session_sweeper(state.bookings.clone(), limits.sweep_interval);
    tracing::info!(idle_ttl_secs = limits.idle_ttl.as_secs(), "booking sessions configured");

    let tracker = state.tracker.clone();
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "swiftmile listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .expect("server failed");
    tracker.shutdown();
}
