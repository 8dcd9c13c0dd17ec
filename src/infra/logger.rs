// src/infra/logger.rs — Structured logging with tracing

use tracing_subscriber::{fmt, EnvFilter};

/// Env var consulted after `RUST_LOG`.
pub const LOG_ENV: &str = "PROPHET_LOG";

/// Install the global subscriber. Filter priority: RUST_LOG > PROPHET_LOG > `default_level`.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV))
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // try_init: tests and benches may install a subscriber first
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// Default level for the CLI verbosity flag.
pub fn level_for(verbose: bool) -> &'static str {
    if verbose {
        "info"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(true), "info");
        assert_eq!(level_for(false), "warn");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging("warn");
        init_logging("debug");
    }
}
