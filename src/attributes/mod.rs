//! Attributes Module
//!
//! Value containers shared by requests and responses.
//!
//! ## Responsibilities
//! - `List`: ordered, duplicate-preserving values (one per wire line)
//! - `AttributeMap`: `Key:Value` lines grouped per key, insertion-ordered
//! - `Changes`: the add / replace / delete bundle a `Mod` command carries
//!
//! ## Data Structure Choice
//! Plain `Vec`s: attribute sets are a handful of keys, insertion order is
//! part of the wire contract, and linear lookup keeps the ordering trivial.

mod list;
mod map;

pub use list::List;
pub use map::AttributeMap;

/// Modifications to one multi-valued attribute of a registered object
///
/// On the wire: one `Key:value` line per addition, one `Key:old=new` line
/// per replacement, one `Key:value=` line per deletion, in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changes {
    /// Values to add
    pub added: List,

    /// Old value → new value(s)
    pub replaced: AttributeMap,

    /// Values to remove
    pub deleted: List,
}

impl Changes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value`
    pub fn add(mut self, value: impl Into<String>) -> Self {
        self.added.push(value.into());
        self
    }

    /// Replace `old` with `new`
    pub fn replace(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.replaced.put(old, new);
        self
    }

    /// Delete `value`
    pub fn delete(mut self, value: impl Into<String>) -> Self {
        self.deleted.push(value.into());
        self
    }

    /// True when no line would be emitted
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.replaced.is_empty() && self.deleted.is_empty()
    }
}
