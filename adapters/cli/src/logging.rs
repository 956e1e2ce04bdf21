//! Diagnostic tracing for the terminal adapter.
//!
//! Output goes to stderr so it never interleaves with the board drawn on
//! stdout. The filter is read from `RUST_LOG` and defaults to `warn`.
//!
//! ```bash
//! RUST_LOG=maze_escape_world=debug maze-escape play --seed 7
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
pub(crate) fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
