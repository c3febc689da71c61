use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr so stdout only carries answers.
///
/// `RUST_LOG` takes precedence; otherwise warnings, or debug output with `verbose`.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("quiz_oracle={default_level}")));

    // Fails only if a subscriber is already installed, in which case that one stays.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}
