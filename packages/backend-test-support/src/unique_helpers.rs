//! Test helpers for generating unique test data
//!
//! ULID suffixes keep logins distinct across tests that share a database.

use ulid::Ulid;

/// Generate a unique string in the format `{prefix}-{ulid}`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("game");
/// let b = unique_str("game");
/// assert_ne!(a, b);
/// assert!(a.starts_with("game-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique player login, e.g. `alice-01J...`.
pub fn unique_login(name: &str) -> String {
    unique_str(&name.to_lowercase())
}
