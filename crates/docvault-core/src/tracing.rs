use tracing_subscriber::EnvFilter;

/// Install the global subscriber: JSON lines on stdout, filtered by
/// `RUST_LOG`. Repeated calls are no-ops so test binaries can call it freely.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
