//! Namespace Module
//!
//! A logical database multiplexed onto the shared engine handle.
//!
//! ## Responsibilities
//! - Prefix every key with the namespace before it reaches the engine
//! - Translate update batches into one atomic physical batch
//! - Bound range scans to the namespace, including "to the end"

mod batch;
mod iterator;

use std::fmt;
use std::sync::Arc;

use crate::codec;
use crate::engine::{Connector, EngineHandle, RawEngine, WriteBatch};
use crate::error::Result;
use crate::memtable::MemConnector;

pub use batch::UpdateBatch;
pub use iterator::{CursorState, RangeIterator};

/// Cursor type of the engine behind connector `C`
pub type EngineCursor<C> = <<C as Connector>::Engine as RawEngine>::Cursor;

/// Handle to a named logical database
///
/// Holds a shared reference to the engine handle; the registry owns the
/// engine lifecycle. Closing the registry makes every handle fail with
/// `NotOpen`.
pub struct NamespaceHandle<C: Connector = MemConnector> {
    name: String,
    engine: Arc<EngineHandle<C>>,
}

impl<C: Connector> NamespaceHandle<C> {
    /// Bind `name` to `engine`. The name must already be validated.
    pub(crate) fn new(name: String, engine: Arc<EngineHandle<C>>) -> Self {
        Self { name, engine }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the value for `key`; `Ok(None)` if absent
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.engine.get(&codec::encode_key(&self.name, key))
    }

    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.engine.put(&codec::encode_key(&self.name, key), value)
    }

    pub fn delete(&self, key: &[u8]) -> Result<()> {
        self.engine.delete(&codec::encode_key(&self.name, key))
    }

    /// Apply all updates of `batch` in one atomic engine write
    pub fn write_batch(&self, batch: UpdateBatch) -> Result<()> {
        let mut physical = WriteBatch::new();
        for (key, value) in batch {
            let key = codec::encode_key(&self.name, &key);
            match value {
                Some(value) => physical.put(key, value),
                None => physical.delete(key),
            }
        }
        self.engine.write_batch(physical)
    }

    /// Iterate keys in `[start, end)` of this namespace
    ///
    /// `None` for `start` means the first key of the namespace, `None` for
    /// `end` means past its last key. The returned iterator is not yet
    /// positioned.
    pub fn get_iterator(
        &self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
    ) -> Result<RangeIterator<EngineCursor<C>>> {
        let start_key = codec::encode_key(&self.name, start.unwrap_or_default());
        let end_key = match end {
            Some(end) => codec::encode_key(&self.name, end),
            None => codec::upper_bound_sentinel(&self.name),
        };

        let cursor = self.engine.new_range_scan(&start_key, Some(&end_key))?;
        Ok(RangeIterator::new(cursor))
    }
}

impl<C: Connector> fmt::Debug for NamespaceHandle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamespaceHandle")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
