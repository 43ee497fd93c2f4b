//! Update batch
//!
//! Pending puts and deletes on namespace-relative keys.

use std::collections::BTreeMap;

/// Set of updates applied atomically by `NamespaceHandle::write_batch`
///
/// Keys are unique: a later `put` or `delete` of the same key replaces the
/// earlier one. A `None` entry is a deletion marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateBatch {
    kvs: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl UpdateBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a value
    pub fn put(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        self.kvs.insert(key.into(), Some(value.into()));
    }

    /// Mark a key for deletion
    pub fn delete(&mut self, key: impl Into<Vec<u8>>) {
        self.kvs.insert(key.into(), None);
    }

    /// Pending update for `key`: `Some(None)` is a pending delete
    pub fn get(&self, key: &[u8]) -> Option<Option<&[u8]>> {
        self.kvs.get(key).map(|v| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.kvs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kvs.is_empty()
    }

    /// Iterate updates in key order
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], Option<&[u8]>)> {
        self.kvs.iter().map(|(k, v)| (k.as_slice(), v.as_deref()))
    }
}

impl IntoIterator for UpdateBatch {
    type Item = (Vec<u8>, Option<Vec<u8>>);
    type IntoIter = std::collections::btree_map::IntoIter<Vec<u8>, Option<Vec<u8>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.kvs.into_iter()
    }
}
