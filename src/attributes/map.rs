//! Attribute map
//!
//! Insertion-ordered multimap from unique, case-sensitive keys to value
//! lists, with a single built-in key cursor.

use std::fmt;

use crate::error::{Result, RrpError};
use super::List;

/// Ordered mapping from attribute key to every value seen for it
///
/// ## Invariants
/// - Keys are unique; a second `put` for a key appends to its list
/// - Every stored list is non-empty
/// - Keys iterate in first-insertion order
///
/// ## Key Cursor
/// `next_key` walks the keys through a cursor stored inside the map, so only
/// one such traversal can be in progress per map at a time. `iter()` does
/// not touch the cursor. A clone carries the cursor position with it.
#[derive(Debug, Clone, Default)]
pub struct AttributeMap {
    entries: Vec<(String, List)>,

    /// Index of the next key to hand out; `None` once exhausted
    cursor: Option<usize>,
}

impl AttributeMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` under `key`, creating the key on first use
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if let Some(values) = self.find_mut(&key) {
            values.push(value.into());
            return;
        }

        let mut values = List::new();
        values.push(value.into());
        if self.entries.is_empty() {
            self.cursor = Some(0);
        }
        self.entries.push((key, values));
    }

    /// Split `line` on its first `:` and `put` the two halves
    pub fn put_pair(&mut self, line: &str) -> Result<()> {
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| RrpError::BadParameter(format!("missing ':' in {:?}", line)))?;
        self.put(key, value);
        Ok(())
    }

    /// All values recorded for `key`, in insertion order
    pub fn get(&self, key: &str) -> Option<&List> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Remove `key` and its values
    pub fn remove(&mut self, key: &str) -> Result<List> {
        let index = self
            .position(key)
            .ok_or_else(|| RrpError::NoSuchProperty(key.to_string()))?;

        // Keep the cursor on the same logical key where possible; if it
        // pointed at the removed key it falls back to the previous one.
        self.cursor = match self.cursor {
            Some(c) if c > index => Some(c - 1),
            Some(c) if c == index && index > 0 => Some(index - 1),
            Some(c) if c == index && index + 1 >= self.entries.len() => None,
            other => other,
        };

        Ok(self.entries.remove(index).1)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every key
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Rewind the key cursor to the first key
    pub fn reset_cursor(&mut self) {
        self.cursor = (!self.entries.is_empty()).then_some(0);
    }

    /// Key under the cursor, advancing the cursor past it
    pub fn next_key(&mut self) -> Option<&str> {
        let index = self.cursor.filter(|&c| c < self.entries.len())?;
        self.cursor = (index + 1 < self.entries.len()).then_some(index + 1);
        Some(self.entries[index].0.as_str())
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// `(key, values)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &List)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    fn find_mut(&mut self, key: &str) -> Option<&mut List> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

/// Equality compares contents only, not cursor position
impl PartialEq for AttributeMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for AttributeMap {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = AttributeMap::new();
        for (key, value) in iter {
            map.put(key, value);
        }
        map
    }
}

impl fmt::Display for AttributeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, values) in self.iter() {
            for value in values {
                writeln!(f, "{}:{}", key, value)?;
            }
        }
        Ok(())
    }
}
