//! Diagnostic logging setup
//!
//! Warnings and debug traces go to stderr through `tracing`; regular command
//! output is printed to stdout by the CLI handlers.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the verbosity flag when it is set.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("snapshelf=debug")
        } else {
            EnvFilter::new("snapshelf=warn")
        }
    });

    // A subscriber may already be installed (e.g. by a test harness).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
