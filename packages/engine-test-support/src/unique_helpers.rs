//! Unique ids so tests sharing a store never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`.
///
/// ```
/// use engine_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("player");
/// assert_ne!(a, unique_str("player"));
/// assert!(a.starts_with("player-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Four distinct player ids for one table.
pub fn unique_table(prefix: &str) -> [String; 4] {
    ["n", "e", "s", "w"].map(|seat| unique_str(&format!("{prefix}-{seat}")))
}
