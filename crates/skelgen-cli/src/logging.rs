use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` overrides `verbose`.
pub fn init(verbose: bool) {
    let default = if verbose {
        "skelgen=debug,skelgen_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
