//! Unique identifiers for test players, so concurrently running tests never
//! collide on a shared table registry.

use uuid::Uuid;

/// `{prefix}-{uuid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("player");
/// let b = unique_str("player");
/// assert_ne!(a, b);
/// assert!(a.starts_with("player-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// `n` distinct ids sharing one prefix, in order.
pub fn unique_player_ids(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|_| unique_str(prefix)).collect()
}
