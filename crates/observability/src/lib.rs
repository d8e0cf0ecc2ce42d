//! Process-wide logging setup shared by the binaries.

/// Initialize structured logging.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber configuration (filter, format, writer).
pub mod tracing;
