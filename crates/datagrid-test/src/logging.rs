//! Test logging utilities
//!
//! Provides utilities for initializing logging in test environments.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (call once)
///
/// Installs a `tracing` subscriber writing through the test harness, so the
/// output is captured per test. Later calls are no-ops.
///
/// # Examples
///
/// ```
/// use datagrid_test::init_test_logging;
///
/// init_test_logging();
/// init_test_logging();
/// ```
pub fn init_test_logging() {
	INIT.call_once(|| {
		let _ = tracing_subscriber::fmt()
			.with_test_writer()
			.with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
			.try_init();
	});
}
