use tracing_subscriber::EnvFilter;

/// Installs the process-wide tracing subscriber. `RUST_LOG` overrides the
/// default `info` filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
