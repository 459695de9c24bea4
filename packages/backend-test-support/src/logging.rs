//! One subscriber per test binary.
//!
//! Test binaries call [`init`] from a `ctor` hook; calling it again from a
//! test body is harmless.

use std::env;

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// `TEST_LOG` wins over `RUST_LOG`; with neither set only warnings show.
fn filter() -> EnvFilter {
    ["TEST_LOG", "RUST_LOG"]
        .into_iter()
        .find_map(|name| env::var(name).ok())
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

/// Install a compact, timestamp-free subscriber that writes through the
/// test harness so output stays attached to the failing test.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let _ = fmt()
            .compact()
            .with_env_filter(filter())
            .with_test_writer()
            .without_time()
            .try_init();
    });
}
