//! MemTable implementation
//!
//! BTreeMap-based raw engine with RwLock for concurrency.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::engine::{BatchOp, EngineFault, RawEngine, WriteBatch};

use super::MemCursor;

pub(crate) type Entries = BTreeMap<Vec<u8>, Vec<u8>>;

/// In-memory ordered key-value engine
///
/// ## Concurrency:
/// - `data`: Protected by RwLock (many concurrent readers, exclusive writer)
/// - `size`: Only modified while the write lock is held
pub struct MemTable {
    /// Sorted entries; cursors hold only weak references
    data: Arc<RwLock<Entries>>,

    /// Approximate size in bytes (sum of key and value lengths)
    size: AtomicUsize,
}

impl MemTable {
    /// Create a new empty MemTable
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(BTreeMap::new())),
            size: AtomicUsize::new(0),
        }
    }

    /// Get approximate size in bytes
    pub fn size(&self) -> usize {
        self.size.load(Ordering::Acquire)
    }

    /// Get entry count
    pub fn entry_count(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    // =========================================================================
    // Private Helpers (called with the write lock held)
    // =========================================================================

    fn insert_locked(&self, data: &mut Entries, key: Vec<u8>, value: Vec<u8>) {
        let added = key.len() + value.len();
        let key_len = key.len();
        if let Some(old) = data.insert(key, value) {
            self.size.fetch_sub(key_len + old.len(), Ordering::AcqRel);
        }
        self.size.fetch_add(added, Ordering::AcqRel);
    }

    fn remove_locked(&self, data: &mut Entries, key: &[u8]) {
        if let Some(old) = data.remove(key) {
            self.size.fetch_sub(key.len() + old.len(), Ordering::AcqRel);
        }
    }
}

impl Default for MemTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RawEngine for MemTable {
    type Cursor = MemCursor;

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, EngineFault> {
        Ok(self.data.read().get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), EngineFault> {
        let mut data = self.data.write();
        self.insert_locked(&mut data, key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<(), EngineFault> {
        let mut data = self.data.write();
        self.remove_locked(&mut data, key);
        Ok(())
    }

    fn write(&self, batch: WriteBatch) -> Result<(), EngineFault> {
        let mut data = self.data.write();
        for op in batch.into_ops() {
            match op {
                BatchOp::Put { key, value } => self.insert_locked(&mut data, key, value),
                BatchOp::Delete { key } => self.remove_locked(&mut data, &key),
            }
        }
        Ok(())
    }

    fn new_cursor(&self) -> MemCursor {
        MemCursor::new(Arc::downgrade(&self.data))
    }
}
