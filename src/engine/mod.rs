//! Engine Module
//!
//! The boundary to the raw key-value engine and the handle guarding it.
//!
//! ## Responsibilities
//! - Describe the raw engine capability (get/put/delete/write-batch/cursor)
//! - Own the lifecycle of the single physical connection (open/close)
//! - Serialize every data operation through one guard
//!
//! ## Layering
//! ```text
//!   NamespaceHandle ──► EngineHandle ──► Connector::connect ──► RawEngine
//!                          (Mutex)                               │
//!                                                                ▼
//!                                                            RawCursor
//! ```

mod batch;
mod handle;

use thiserror::Error;

use crate::config::Config;

pub use batch::{BatchOp, WriteBatch};
pub use handle::{EngineHandle, HandleState};

/// Non-ok, non-not-found status reported by a raw engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct EngineFault(pub String);

impl EngineFault {
    pub fn new(description: impl Into<String>) -> Self {
        Self(description.into())
    }
}

// =============================================================================
// Raw Engine Boundary
// =============================================================================

/// An open connection to a raw byte-oriented key-value engine
///
/// Keys are ordered byte-wise lexicographically.
pub trait RawEngine: Send + Sync {
    /// Cursor type returned by [`RawEngine::new_cursor`]
    type Cursor: RawCursor;

    /// `Ok(None)` when the key does not exist
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, EngineFault>;

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), EngineFault>;

    fn delete(&self, key: &[u8]) -> Result<(), EngineFault>;

    /// Apply every operation of `batch` atomically
    fn write(&self, batch: WriteBatch) -> Result<(), EngineFault>;

    /// Create an unpositioned cursor with no range set
    fn new_cursor(&self) -> Self::Cursor;
}

/// Forward cursor over a raw engine
///
/// A cursor must stay usable without any lock held by its creator.
pub trait RawCursor: Send {
    /// Restrict the cursor to `[start, end)`; `None` means no upper bound
    fn set_range(&mut self, start: &[u8], end: Option<&[u8]>);

    /// Position on the first key of the range
    fn seek_to_first(&mut self);

    /// Move to the next key; `false` once the range is exhausted
    fn next(&mut self) -> bool;

    fn valid(&self) -> bool;

    fn key(&self) -> Option<&[u8]>;

    fn value(&self) -> Option<&[u8]>;
}

/// Creates engine connections
///
/// Called once for every Closed → Opened transition of an [`EngineHandle`].
pub trait Connector: Send + Sync {
    type Engine: RawEngine;

    fn connect(&self, config: &Config) -> Result<Self::Engine, EngineFault>;
}
