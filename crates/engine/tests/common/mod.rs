//! Shared helpers for building runs.

use prefetchsim_core::RunHandle;
use prefetchsim_core::config::{AccessPattern, Configuration, PrefetchType};

/// Line size used by every lesson configuration.
pub const LINE: u64 = 64;

/// Installs a test-writer tracing subscriber once per process.
///
/// Set `RUST_LOG=prefetchsim_core=trace` to see per-step events.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Four 64-byte lines, ten steps.
pub fn lesson_config(prefetch: PrefetchType, pattern: AccessPattern) -> Configuration {
    Configuration {
        cache_size_bytes: 4 * LINE,
        line_size_bytes: LINE,
        prefetch_type: prefetch,
        access_pattern: pattern,
        step_count: 10,
        ..Configuration::default()
    }
}

/// Configures a run, panicking on an invalid configuration.
pub fn start(config: Configuration) -> RunHandle {
    init_tracing();
    match RunHandle::configure(config) {
        Ok(run) => run,
        Err(err) => panic!("test configuration rejected: {err}"),
    }
}
