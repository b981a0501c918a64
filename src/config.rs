use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Sanare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default base URL of the consultation assistant service (suggest + chat).
pub const DEFAULT_ASSISTANT_URL: &str = "http://localhost:5001";

/// Default base URL of the scheduling service (directory + slot suggestions).
pub const DEFAULT_SCHEDULER_URL: &str = "http://localhost:5002";

/// Default per-request timeout for both services.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

/// Connection settings for both remote services.
///
/// `from_env` honors `SANARE_ASSISTANT_URL` / `SANARE_SCHEDULER_URL` so a
/// deployment can point the core at non-local backends without a rebuild.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub assistant_url: String,
    pub scheduler_url: String,
    pub timeout: Duration,
}

impl BackendConfig {
    pub fn from_env() -> Self {
        let assistant_url = std::env::var("SANARE_ASSISTANT_URL")
            .unwrap_or_else(|_| DEFAULT_ASSISTANT_URL.to_string());
        let scheduler_url = std::env::var("SANARE_SCHEDULER_URL")
            .unwrap_or_else(|_| DEFAULT_SCHEDULER_URL.to_string());
        Self {
            assistant_url,
            scheduler_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            assistant_url: DEFAULT_ASSISTANT_URL.to_string(),
            scheduler_url: DEFAULT_SCHEDULER_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
