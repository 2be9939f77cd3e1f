//! Label table
//!
//! Maps label names to instruction offsets. Backed by a `BTreeMap` so that
//! iteration and serialization order depend only on the names, never on
//! insertion order or hashing.

use crate::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelTable {
    entries: BTreeMap<String, Address>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `offset`
    ///
    /// Fails with the already-bound offset if the name is taken; the table
    /// is left unchanged in that case.
    pub fn define(&mut self, name: impl Into<String>, offset: Address) -> Result<(), Address> {
        use std::collections::btree_map::Entry;

        match self.entries.entry(name.into()) {
            Entry::Occupied(existing) => Err(*existing.get()),
            Entry::Vacant(slot) => {
                slot.insert(offset);
                Ok(())
            }
        }
    }

    /// Look up the offset bound to `name`
    pub fn resolve(&self, name: &str) -> Option<Address> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Names grouped by the offset they are bound to
    ///
    /// Offsets come out ascending, names within one offset in name order.
    pub fn by_offset(&self) -> BTreeMap<Address, Vec<&str>> {
        let mut grouped: BTreeMap<Address, Vec<&str>> = BTreeMap::new();
        for (name, &offset) in &self.entries {
            grouped.entry(offset).or_default().push(name);
        }
        grouped
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Address)> + '_ {
        self.entries.iter().map(|(name, &offset)| (name.as_str(), offset))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a LabelTable {
    type Item = (&'a String, &'a Address);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Address>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
