use tracing_subscriber::EnvFilter;

/// Initializes a `tracing` subscriber honoring `RUST_LOG`, defaulting to
/// `info` when it's unset. Call once, at the top of `main`.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
