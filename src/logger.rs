//! Debug logging for the `bash-std` binary.
//!
//! Only compiled with the `tracing_debug` feature.
//! Events are written to stderr, since stdout is reserved for the `eval`-able output.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "bash_std=debug,bash_std_engine=debug";

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise debug level for the `bash_std` crates.
/// Call once, before anything is logged.
pub fn init_logger() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
