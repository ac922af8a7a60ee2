//! Canonical keys for name-keyed tables.

/// Reduce a name to its lookup key: lowercase ASCII letters only.
///
/// `"War-Story!"`, `"War Story"` and `"warstory"` all become `"warstory"`.
pub fn normalize_key(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_lowercase)
        .collect()
}
