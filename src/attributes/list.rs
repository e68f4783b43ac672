//! Ordered value list
//!
//! Vec-backed, insertion-ordered sequence with bounds-checked positional
//! access and deletion.

use std::fmt;
use std::slice;

use crate::error::{Result, RrpError};

/// Insertion-ordered sequence of values
///
/// Duplicates are kept. Cloning produces an independent deep copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct List<T = String> {
    items: Vec<T>,
}

impl<T> List<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a value at the end
    pub fn push(&mut self, value: impl Into<T>) {
        self.items.push(value.into());
    }

    /// Value at `index`
    pub fn get(&self, index: usize) -> Result<&T> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(RrpError::InvalidIndex { index, len })
    }

    /// Remove and return the value at `index`, closing the gap
    pub fn delete_at(&mut self, index: usize) -> Result<T> {
        let len = self.items.len();
        if index >= len {
            return Err(RrpError::InvalidIndex { index, len });
        }
        Ok(self.items.remove(index))
    }

    /// Remove every value
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for List<String> {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(str::to_string).collect(),
        }
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Display> fmt::Display for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}
