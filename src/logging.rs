//! Diagnostic logging to stderr.

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence. Otherwise only warnings are shown, or this
/// crate's debug output when `verbose` is set. Later calls are no-ops.
pub fn init(verbose: bool) {
    let fallback = if verbose { "warn,tasklink=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
