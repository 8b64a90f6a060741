use std::io;

use tracing_subscriber::EnvFilter;

use crate::commands::Verbosity;

/// Initialize the global tracing subscriber.
///
/// A filter set through `RUST_LOG` takes precedence over the
/// verbosity-derived one.
pub(crate) fn init_logger(verbosity: Verbosity) {
    let log_filter = match verbosity {
        // Show only errors
        Verbosity::Quiet => "off,bristle=error,bristle_core=error,bristle_catalog=error",
        // Only show warnings
        Verbosity::Verbose(0) => "off,bristle=warn,bristle_core=warn,bristle_catalog=warn",
        // Show our own info logs
        Verbosity::Verbose(1) => "off,bristle=info,bristle_core=info,bristle_catalog=info",
        // Also show debug from our libraries
        Verbosity::Verbose(2) => "off,bristle=debug,bristle_core=debug,bristle_catalog=debug",
        // Also show trace from our libraries
        Verbosity::Verbose(3) => "off,bristle=trace,bristle_core=trace,bristle_catalog=trace",
        Verbosity::Verbose(_) => "trace",
    };

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        // The fallback directives are static and known to parse.
        Err(_) => EnvFilter::new(log_filter),
    };

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .try_init();

    if let Err(err) = result {
        // A second init only happens under test harnesses.
        eprintln!("logger already initialized: {err}");
    }
}
