//! A TOML table: key-value pairs in insertion order with unique keys.

#[cfg(test)]
#[path = "./table_tests.rs"]
mod tests;

use crate::value::Value;

type Entry = (String, Value);

/// Tables with at least this many entries maintain a hash index for lookups;
/// below it a linear scan is faster than hashing.
const INDEX_THRESHOLD: usize = 8;

/// A table of key-value pairs.
///
/// Entries keep insertion order (the mapping is semantically unordered; the
/// emitter sorts keys on output). An *implicit* table was materialized only
/// as an intermediate segment of a dotted header path and becomes explicit
/// when its own header is written.
#[derive(Clone)]
pub struct Table {
    entries: Vec<Entry>,
    implicit: bool,
    index: Option<foldhash::HashMap<String, usize>>,
}

impl Table {
    /// Creates an empty table.
    pub fn new() -> Self {
        Table {
            entries: Vec::new(),
            implicit: false,
            index: None,
        }
    }

    pub(crate) fn new_implicit() -> Self {
        Table {
            entries: Vec::new(),
            implicit: true,
            index: None,
        }
    }

    pub(crate) fn is_implicit(&self) -> bool {
        self.implicit
    }

    pub(crate) fn set_explicit(&mut self) {
        self.implicit = false;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        let i = self.find(key)?;
        Some(&self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        let i = self.find(key)?;
        Some(&mut self.entries[i].1)
    }

    /// Inserts a key-value pair. An existing entry for the key is replaced in
    /// place and its previous value returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        if let Some(i) = self.find(&key) {
            return Some(std::mem::replace(&mut self.entries[i].1, value));
        }
        if let Some(index) = &mut self.index {
            index.insert(key.clone(), self.entries.len());
        }
        self.entries.push((key, value));
        if self.entries.len() == INDEX_THRESHOLD && self.index.is_none() {
            self.build_index();
        }
        None
    }

    /// Removes the entry for `key`, shifting later entries to keep order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let i = self.find(key)?;
        let (_, value) = self.entries.remove(i);
        // Entry positions shifted; rebuild rather than patch.
        if self.index.is_some() {
            if self.entries.len() < INDEX_THRESHOLD {
                self.index = None;
            } else {
                self.build_index();
            }
        }
        Some(value)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.entries.iter_mut().map(|(_, v)| v)
    }

    fn find(&self, key: &str) -> Option<usize> {
        if let Some(index) = &self.index {
            return index.get(key).copied();
        }
        self.entries.iter().position(|(k, _)| k == key)
    }

    fn build_index(&mut self) {
        let mut index = foldhash::HashMap::default();
        for (i, (k, _)) in self.entries.iter().enumerate() {
            index.insert(k.clone(), i);
        }
        self.index = Some(index);
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// Key-set equality, ignoring entry order and implicitness: a reparsed
/// emission compares equal to its source tree even though the emitter sorts
/// keys and writes every header explicitly.
impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.iter() {
            map.entry(&k, v);
        }
        map.finish()
    }
}

/// Borrowing iterator over a [`Table`] in insertion order.
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Consuming iterator over a [`Table`] in insertion order.
pub struct IntoIter {
    inner: std::vec::IntoIter<Entry>,
}

impl Iterator for IntoIter {
    type Item = (String, Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for IntoIter {}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.entries.into_iter(),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Table {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = ser.serialize_map(Some(self.len()))?;
        for (k, v) in self {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
