//! MemTable Module
//!
//! In-memory raw engine used as the default connection behind an
//! `EngineHandle`.
//!
//! ## Responsibilities
//! - Ordered byte-wise key space with point reads and writes
//! - Atomic application of write batches
//! - Range cursors that do not borrow the engine handle's guard
//! - Track size and entry count
//!
//! ## Data Structure Choice
//! BTreeMap wrapped in RwLock, reachable from cursors through a `Weak`:
//! - Ordered keys (required for range scans)
//! - A batch is applied under one write lock, so readers see all of it or
//!   none of it
//! - Dropping the table (closing the connection) invalidates its cursors

mod cursor;
mod table;

pub use cursor::MemCursor;
pub use table::MemTable;

use crate::config::Config;
use crate::engine::{Connector, EngineFault};

/// Connector producing a fresh, empty [`MemTable`] on every open
#[derive(Debug, Clone, Copy, Default)]
pub struct MemConnector;

impl Connector for MemConnector {
    type Engine = MemTable;

    fn connect(&self, _config: &Config) -> Result<MemTable, EngineFault> {
        Ok(MemTable::new())
    }
}
