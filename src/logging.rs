//! Diagnostic logging.
//!
//! Progress and summaries are printed by [`output`](crate::output); this is
//! for everything else (skipped files, invalid prior manifests, failed
//! renames) and goes to stderr through `tracing`.
//!
//! `RUST_LOG` wins when set. Otherwise the level comes from the number of
//! `-v` flags: none → `warn`, one → `info`, two or more → `debug`.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directive for a verbosity count.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();
}
