//! Tracing subscriber initialization
//!
//! Diagnostics go to stderr so `--format json` stays pipeable. `RUST_LOG`
//! overrides the verbosity flags when set.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize the global tracing subscriber from the verbosity flags.
///
/// `--debug` maps to the debug level, `--verbose` to info; the default
/// only surfaces warnings.
pub fn init(verbose: bool, debug: bool) {
    let default_level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = std::env::var("RUST_LOG").map_or_else(
        |_| EnvFilter::new(default_level),
        |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new(default_level)),
    );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}
