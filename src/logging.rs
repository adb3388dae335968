//! Logging setup shared by the WikiSearch binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "wikisearch=info";

/// Installs the global `tracing` subscriber.
///
/// Output goes to stderr so stdout stays free for program output (the RPC
/// server speaks JSON on stdout). The filter comes from `RUST_LOG` and
/// defaults to `wikisearch=info`. Calling this twice is harmless.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
