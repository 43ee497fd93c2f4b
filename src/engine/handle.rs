//! Engine Handle
//!
//! Owns the single physical connection and guards every access to it.

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

use crate::config::{ClosedBatchPolicy, Config};
use crate::error::{NsKvError, Result};
use crate::memtable::MemConnector;

use super::{Connector, EngineFault, RawCursor, RawEngine, WriteBatch};

/// Observable lifecycle state of an [`EngineHandle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    Closed,
    Opened,
}

/// Guarded state: the connection exists only while opened
struct Inner<E> {
    connection: Option<E>,

    /// Set by the first successful `open`, never cleared
    ever_opened: bool,
}

/// Lifecycle-managed handle over one raw engine connection
///
/// ## Concurrency Model
///
/// - Every operation (open, close, get, put, delete, write_batch,
///   new_range_scan) takes the same `Mutex`: one in-flight operation at a time
/// - Cursors returned by `new_range_scan` do not hold the guard
///
/// ## Lifecycle
///
/// ```text
///   new ──► Closed ──open──► Opened ──close──► Closed ──open──► ...
/// ```
///
/// A data operation on a handle that was never opened panics. After a close
/// it returns [`NsKvError::NotOpen`].
pub struct EngineHandle<C: Connector = MemConnector> {
    config: Config,
    connector: C,
    inner: Mutex<Inner<C::Engine>>,
}

impl EngineHandle<MemConnector> {
    /// Create a closed handle over the in-memory engine
    pub fn new(config: Config) -> Self {
        Self::with_connector(config, MemConnector)
    }
}

impl<C: Connector> EngineHandle<C> {
    /// Create a closed handle that connects through `connector`
    pub fn with_connector(config: Config, connector: C) -> Self {
        Self {
            config,
            connector,
            inner: Mutex::new(Inner {
                connection: None,
                ever_opened: false,
            }),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Open the underlying connection. No-op if already opened.
    pub fn open(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.connection.is_some() {
            return Ok(());
        }

        let connection = self.connector.connect(&self.config).map_err(|fault| {
            tracing::error!(error = %fault, "Error while trying to open engine connection");
            NsKvError::from(fault)
        })?;

        inner.connection = Some(connection);
        inner.ever_opened = true;
        tracing::debug!("Engine handle opened");
        Ok(())
    }

    /// Close the underlying connection. No-op if already closed.
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        if let Some(connection) = inner.connection.take() {
            drop(connection);
            tracing::debug!("Engine handle closed");
        }
    }

    pub fn state(&self) -> HandleState {
        if self.inner.lock().connection.is_some() {
            HandleState::Opened
        } else {
            HandleState::Closed
        }
    }

    pub fn is_open(&self) -> bool {
        self.state() == HandleState::Opened
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Data Operations
    // =========================================================================

    /// Get the value stored under `key`; `Ok(None)` if absent
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let engine = self.connection("get")?;
        engine.get(key).map_err(|fault| {
            tracing::error!(
                key = ?String::from_utf8_lossy(key),
                error = %fault,
                "Error while trying to retrieve key"
            );
            fault.into()
        })
    }

    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        let engine = self.connection("put")?;
        engine.put(key, value).map_err(|fault| {
            tracing::error!(
                key = ?String::from_utf8_lossy(key),
                error = %fault,
                "Error while trying to write key"
            );
            fault.into()
        })
    }

    pub fn delete(&self, key: &[u8]) -> Result<()> {
        let engine = self.connection("delete")?;
        engine.delete(key).map_err(|fault| {
            tracing::error!(
                key = ?String::from_utf8_lossy(key),
                error = %fault,
                "Error while trying to delete key"
            );
            fault.into()
        })
    }

    /// Apply `batch` atomically
    ///
    /// On a closed handle the outcome follows `Config::closed_batch_policy`.
    pub fn write_batch(&self, batch: WriteBatch) -> Result<()> {
        let engine = match self.connection("write_batch") {
            Ok(engine) => engine,
            Err(NsKvError::NotOpen)
                if self.config.closed_batch_policy == ClosedBatchPolicy::Discard =>
            {
                tracing::warn!(
                    ops = batch.len(),
                    "Discarding write batch: engine handle is closed"
                );
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let ops = batch.len();
        let first_key = batch.ops().first().map(|op| op.key().to_vec());
        engine.write(batch).map_err(|fault: EngineFault| {
            tracing::error!(
                ops,
                first_key = ?first_key.as_deref().map(String::from_utf8_lossy),
                error = %fault,
                "Error while trying to write batch"
            );
            fault.into()
        })
    }

    /// Create a cursor restricted to `[start, end)`
    ///
    /// The cursor is not positioned; call `seek_to_first` before reading.
    pub fn new_range_scan(
        &self,
        start: &[u8],
        end: Option<&[u8]>,
    ) -> Result<<C::Engine as RawEngine>::Cursor> {
        let engine = self.connection("new_range_scan")?;
        let mut cursor = engine.new_cursor();
        cursor.set_range(start, end);
        Ok(cursor)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Lock the guard and borrow the open connection
    ///
    /// Panics if the handle has never been opened.
    fn connection(&self, op: &str) -> Result<MappedMutexGuard<'_, C::Engine>> {
        let inner = self.inner.lock();
        if !inner.ever_opened {
            panic!("engine handle is not opened yet ({} called before open)", op);
        }
        MutexGuard::try_map(inner, |inner| inner.connection.as_mut())
            .map_err(|_| NsKvError::NotOpen)
    }
}
