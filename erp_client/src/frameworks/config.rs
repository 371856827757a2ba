use std::{env, time::Duration};

// Runtime constants and environment-backed settings for the client.

pub fn api_base_url() -> String {
    env::var("ERP_API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

pub fn api_timeout() -> Duration {
    let millis = env::var("ERP_API_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_MS);
    Duration::from_millis(millis)
}

pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

// First entry written to the panel on startup.
pub const READY_MESSAGE: &str = "Dashboard initialized. Ready for operations.";
