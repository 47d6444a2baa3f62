use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `--log` wins over `RUST_LOG`; the default is `warn`.
///
/// The terminal UI owns the screen, so it only reports errors unless asked otherwise.
pub fn init(filter: Option<&str>, interactive: bool) {
    let default = if interactive { "error" } else { "warn" };
    let filter = match filter {
        Some(f) => EnvFilter::try_new(f).unwrap_or_else(|_| EnvFilter::new(default)),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
    };

    // A subscriber may already be set when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
