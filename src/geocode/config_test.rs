use super::*;
use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serializes the tests in this file; they share process-wide env vars.
fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// # Safety
/// Callers must hold [`env_lock`].
unsafe fn clear_geocode_env() {
    unsafe {
        std::env::remove_var("API_KEY");
        std::env::remove_var("GEMINI_API_KEY");
        std::env::remove_var("GEOCODE_MODEL");
        std::env::remove_var("GEOCODE_BASE_URL");
        std::env::remove_var("GEOCODE_TEMPERATURE");
        std::env::remove_var("GEOCODE_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("GEOCODE_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("GEOCODE_SIMULATION_DELAY_MS");
    }
}

#[test]
fn from_env_without_key_is_simulated() {
    let _guard = env_lock();
    unsafe { clear_geocode_env() };

    let cfg = GeocodeConfig::from_env().unwrap();
    assert!(cfg.is_simulated());
    assert_eq!(cfg.model, DEFAULT_GEOCODE_MODEL);
    assert_eq!(cfg.base_url, DEFAULT_GEMINI_BASE_URL);
    assert!((cfg.temperature - 0.1).abs() < f32::EPSILON);
    assert_eq!(
        cfg.timeouts,
        GeocodeTimeouts {
            request_secs: DEFAULT_GEOCODE_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_GEOCODE_CONNECT_TIMEOUT_SECS
        }
    );
    assert_eq!(cfg.simulation_delay_ms, DEFAULT_SIMULATION_DELAY_MS);
}

#[test]
fn from_env_blank_key_is_simulated() {
    let _guard = env_lock();
    unsafe {
        clear_geocode_env();
        std::env::set_var("API_KEY", "   ");
    }

    let cfg = GeocodeConfig::from_env().unwrap();
    assert!(cfg.is_simulated());

    unsafe { clear_geocode_env() };
}

#[test]
fn from_env_parses_overrides() {
    let _guard = env_lock();
    unsafe {
        clear_geocode_env();
        std::env::set_var("GEMINI_API_KEY", "secret");
        std::env::set_var("GEOCODE_MODEL", "gemini-test");
        std::env::set_var("GEOCODE_BASE_URL", "https://example.test/v1/");
        std::env::set_var("GEOCODE_TEMPERATURE", "0.4");
        std::env::set_var("GEOCODE_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("GEOCODE_CONNECT_TIMEOUT_SECS", "7");
        std::env::set_var("GEOCODE_SIMULATION_DELAY_MS", "0");
    }

    let cfg = GeocodeConfig::from_env().unwrap();
    assert_eq!(cfg.api_key.as_deref(), Some("secret"));
    assert!(!cfg.is_simulated());
    assert_eq!(cfg.model, "gemini-test");
    assert_eq!(cfg.base_url, "https://example.test/v1");
    assert!((cfg.temperature - 0.4).abs() < f32::EPSILON);
    assert_eq!(cfg.timeouts, GeocodeTimeouts { request_secs: 42, connect_secs: 7 });
    assert_eq!(cfg.simulation_delay_ms, 0);

    unsafe { clear_geocode_env() };
}

#[test]
fn from_env_prefers_api_key_over_gemini_key() {
    let _guard = env_lock();
    unsafe {
        clear_geocode_env();
        std::env::set_var("API_KEY", "primary");
        std::env::set_var("GEMINI_API_KEY", "secondary");
    }

    let cfg = GeocodeConfig::from_env().unwrap();
    assert_eq!(cfg.api_key.as_deref(), Some("primary"));

    unsafe { clear_geocode_env() };
}

#[test]
fn from_env_invalid_temperature_errors() {
    let _guard = env_lock();
    unsafe {
        clear_geocode_env();
        std::env::set_var("GEOCODE_TEMPERATURE", "hot");
    }

    let err = GeocodeConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("invalid GEOCODE_TEMPERATURE"));

    unsafe { clear_geocode_env() };
}

#[test]
fn env_parse_invalid_returns_default() {
    unsafe { std::env::set_var("__TEST_GEOCODE_EP_INVALID__", "notanumber") };
    let val: u64 = env_parse("__TEST_GEOCODE_EP_INVALID__", 7);
    assert_eq!(val, 7);
    unsafe { std::env::remove_var("__TEST_GEOCODE_EP_INVALID__") };
}
