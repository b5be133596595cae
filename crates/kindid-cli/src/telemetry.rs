use tracing_subscriber::{EnvFilter, fmt};

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` overrides
/// the default `warn` filter.
pub fn init_tracing() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
