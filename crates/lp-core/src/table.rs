//! Lookup tables with the two disciplines the life path rolls against.
//!
//! A [`RangeTable`] stores only the breakpoints of a dice-range table: a roll
//! resolves to the entry at the smallest stored key that is at least the
//! roll. A [`NameTable`] resolves names after [`normalize_key`], so spelling,
//! spacing and punctuation differences in table text do not matter.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use crate::error::{TableError, TableResult};
use crate::key::normalize_key;

/// A dice-range table keyed by breakpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RangeTable<T> {
    entries: BTreeMap<u32, T>,
}

impl<T> Default for RangeTable<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T> RangeTable<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an entry at a breakpoint, replacing any previous one.
    pub fn insert(&mut self, key: u32, value: T) {
        self.entries.insert(key, value);
    }

    /// Largest stored key, or `None` if the table is empty.
    pub fn max_key(&self) -> Option<u32> {
        self.entries.keys().next_back().copied()
    }

    /// Range-floor lookup: the entry at the smallest key `>= key`.
    pub fn get(&self, key: u32) -> Option<&T> {
        self.entries.range(key..).next().map(|(_, v)| v)
    }

    /// Range-floor lookup that reports which table failed and why.
    pub fn lookup(&self, table: &'static str, key: u32) -> TableResult<&T> {
        let max = self.max_key().ok_or(TableError::Empty { table })?;
        self.get(key)
            .ok_or(TableError::OutOfRange { table, key, max })
    }

    /// Number of stored breakpoints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no breakpoints are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over breakpoints in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}

impl<T> FromIterator<(u32, T)> for RangeTable<T> {
    fn from_iter<I: IntoIterator<Item = (u32, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A table keyed by normalized names.
///
/// Iteration follows key order, which keeps automatic choices reproducible
/// under a fixed seed.
#[derive(Debug, Clone, PartialEq)]
pub struct NameTable<T> {
    entries: BTreeMap<String, T>,
}

impl<T> Default for NameTable<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T> NameTable<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an entry under the normalized form of `name`.
    pub fn insert(&mut self, name: &str, value: T) {
        self.entries.insert(normalize_key(name), value);
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(&normalize_key(name))
    }

    /// Look up an entry that must exist.
    pub fn require(&self, table: &'static str, name: &str) -> TableResult<&T> {
        self.get(name).ok_or_else(|| TableError::MissingKey {
            table,
            key: name.to_string(),
        })
    }

    /// Returns true if an entry exists under this name.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in normalized-key order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }
}

impl<S: AsRef<str>, T> FromIterator<(S, T)> for NameTable<T> {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, value) in iter {
            table.insert(name.as_ref(), value);
        }
        table
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for NameTable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, T>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn abc() -> RangeTable<&'static str> {
        [(5, "a"), (10, "b"), (20, "c")].into_iter().collect()
    }

    #[test]
    fn range_floor_breakpoints() {
        let t = abc();
        assert_eq!(t.get(1), Some(&"a"));
        assert_eq!(t.get(5), Some(&"a"));
        assert_eq!(t.get(6), Some(&"b"));
        assert_eq!(t.get(20), Some(&"c"));
        assert_eq!(t.get(21), None);
    }

    #[test]
    fn lookup_reports_table_and_max() {
        let err = abc().lookup("garments", 21).unwrap_err();
        match err {
            TableError::OutOfRange { table, key, max } => {
                assert_eq!(table, "garments");
                assert_eq!(key, 21);
                assert_eq!(max, 20);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn lookup_on_empty_table() {
        let t: RangeTable<u32> = RangeTable::new();
        assert!(matches!(
            t.lookup("weapons", 1),
            Err(TableError::Empty { table: "weapons" })
        ));
    }

    #[test]
    fn range_table_from_json_string_keys() {
        let t: RangeTable<String> =
            serde_json::from_str(r#"{"20": "late", "3": "early"}"#).unwrap();
        assert_eq!(t.max_key(), Some(20));
        assert_eq!(t.get(1).map(String::as_str), Some("early"));
        assert_eq!(t.get(4).map(String::as_str), Some("late"));
    }

    #[test]
    fn name_table_collides_normalized_names() {
        let mut t = NameTable::new();
        t.insert("War Story", 1);
        assert_eq!(t.get("warstory"), Some(&1));
        assert_eq!(t.get("WAR-STORY!!"), Some(&1));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn name_table_require() {
        let t: NameTable<u32> = [("Scholar", 1)].into_iter().collect();
        assert!(t.require("educations", "scholar").is_ok());
        let err = t.require("educations", "Pirate").unwrap_err();
        assert_eq!(err.to_string(), "no entry 'Pirate' in table 'educations'");
    }

    #[test]
    fn name_table_from_json_normalizes() {
        let t: NameTable<u32> = serde_json::from_str(r#"{"Steely Glare": 2}"#).unwrap();
        assert!(t.contains("steely-glare"));
    }

    proptest! {
        #[test]
        fn range_floor_returns_smallest_key_at_or_above(
            keys in proptest::collection::btree_set(1u32..100, 1..10),
            key in 0u32..120,
        ) {
            let table: RangeTable<u32> = keys.iter().map(|k| (*k, *k)).collect();
            let expected = keys.iter().copied().find(|k| *k >= key);
            prop_assert_eq!(table.get(key).copied(), expected);
        }
    }
}
