pub mod config;
pub mod models;
pub mod backend; // Remote inference + directory service boundary
pub mod consultation; // Symptom intake, suggestion, follow-up chat
pub mod scheduling; // Directory, slot suggestions, booking

use tracing_subscriber::EnvFilter;

/// Initialize tracing for embedding applications.
///
/// Honors RUST_LOG when set, otherwise falls back to the crate default.
/// Safe to call once per process; embedding shells that install their own
/// subscriber should skip this.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Sanare core v{}", config::APP_VERSION);
}
