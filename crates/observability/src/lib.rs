//! Process-wide tracing setup shared by StoreDesk binaries and test harnesses.

/// Initialize tracing with the format chosen by `STOREDESK_LOG_FORMAT`.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::LogFormat;
