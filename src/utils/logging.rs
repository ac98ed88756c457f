//! Logging setup shared by both binaries
//!
//! Level comes from `RUST_LOG`, default `info`:
//!
//! ```text
//! RUST_LOG=debug cargo run                      # everything
//! RUST_LOG=storefront::providers=debug cargo run  # fetch details only
//! ```

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install the global compact subscriber.
///
/// Returns `false` when a subscriber was already installed (tests, repeated
/// calls); that is not an error.
pub fn init_logging() -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init()
        .is_ok()
}
