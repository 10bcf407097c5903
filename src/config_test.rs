use std::sync::Mutex;

use super::*;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// # Safety
/// Callers must hold `ENV_LOCK` so env mutations do not race.
unsafe fn clear_paws_env() {
    unsafe {
        std::env::remove_var("PAWS_API_BASE_URL");
        std::env::remove_var("PAWS_MEDIA_BASE_URL");
        std::env::remove_var("PAWS_STORAGE_PATH");
        std::env::remove_var("PAWS_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("PAWS_CONNECT_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_defaults_to_local_backend() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe { clear_paws_env() };

    let cfg = ClientConfig::from_env().unwrap();
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.api_base_url, "http://localhost:8000/api");
    assert_eq!(cfg.timeouts, RequestTimeouts { request_secs: 30, connect_secs: 10 });
}

#[test]
fn from_env_parses_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_paws_env();
        std::env::set_var("PAWS_API_BASE_URL", " https://paws.example.test/api/ ");
        std::env::set_var("PAWS_MEDIA_BASE_URL", "https://cdn.example.test/media/");
        std::env::set_var("PAWS_STORAGE_PATH", "/tmp/paws.json");
        std::env::set_var("PAWS_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("PAWS_CONNECT_TIMEOUT_SECS", "nope");
    }

    let cfg = ClientConfig::from_env().unwrap();
    assert_eq!(cfg.api_base_url, "https://paws.example.test/api");
    assert_eq!(cfg.media_base_url, "https://cdn.example.test/media");
    assert_eq!(cfg.storage_path, PathBuf::from("/tmp/paws.json"));
    assert_eq!(cfg.timeouts, RequestTimeouts { request_secs: 42, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS });

    unsafe { clear_paws_env() };
}

#[test]
fn parse_base_url_rejects_non_http_values() {
    let err = parse_base_url("PAWS_API_BASE_URL", Some("localhost:8000"), DEFAULT_API_BASE_URL).unwrap_err();
    assert!(err.to_string().contains("PAWS_API_BASE_URL"));
}

#[test]
fn with_api_base_url_trims_trailing_slash() {
    let cfg = ClientConfig::default().with_api_base_url("http://127.0.0.1:9000/api/").unwrap();
    assert_eq!(cfg.api_base_url, "http://127.0.0.1:9000/api");
}
