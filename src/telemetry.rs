//! Tracing subscriber setup.

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Maps the `-v` count to a default filter directive.
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "hopefund=info,tower_http=warn",
        1 => "hopefund=debug,tower_http=info",
        2 => "hopefund=trace,tower_http=debug",
        _ => "trace",
    }
}

/// Initializes logging to stderr. `RUST_LOG` overrides the verbosity flag.
pub fn init(verbose: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 3)
        .init();

    debug!("logging initialized at verbosity {}", verbose);
}
