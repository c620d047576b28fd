use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Installs a JSON log subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_timer(ChronoUtc::rfc_3339())
        .with_current_span(true)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
