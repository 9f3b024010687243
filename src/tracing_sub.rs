//! Tracing subscriber setup.

use std::io;

use tracing::Level;

/// Initialize a compact subscriber writing to stderr. Safe to call multiple
/// times; subsequent calls are no-ops for the global subscriber.
///
///TUI note: while the alternate screen is active, stderr output fights the
/// renderer. Redirect stderr to a file (`2>trace.log`) when running the
/// demo with logging enabled.
pub fn init_default() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}
