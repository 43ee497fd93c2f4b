//! Namespace Registry
//!
//! Serves many logical databases from one shared engine handle.
//!
//! ## Responsibilities
//! - Open the engine handle once at construction
//! - Create namespace handles lazily, at most one per name
//! - Close the engine handle for every namespace at once

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::codec;
use crate::config::Config;
use crate::engine::{Connector, EngineHandle};
use crate::error::Result;
use crate::memtable::MemConnector;
use crate::namespace::NamespaceHandle;

/// Provider of named logical databases over one engine handle
///
/// ## Concurrency:
/// - `handles`: Mutex guarding only lookup/creation of namespace handles
/// - Data operations go through the engine handle's own guard
///
/// Construct one registry at the top of the process and pass it by
/// reference to whatever needs namespace access.
pub struct Registry<C: Connector = MemConnector> {
    engine: Arc<EngineHandle<C>>,
    handles: Mutex<HashMap<String, Arc<NamespaceHandle<C>>>>,
}

impl Registry<MemConnector> {
    /// Create a registry over a new in-memory engine and open it
    pub fn create(config: Config) -> Result<Self> {
        Self::with_connector(config, MemConnector)
    }
}

impl<C: Connector> Registry<C> {
    /// Create a registry whose engine connects through `connector`, and open it
    pub fn with_connector(config: Config, connector: C) -> Result<Self> {
        let engine = EngineHandle::with_connector(config, connector);
        engine.open()?;

        Ok(Self {
            engine: Arc::new(engine),
            handles: Mutex::new(HashMap::new()),
        })
    }

    /// Return the handle for `name`, creating it on first use
    ///
    /// Repeated calls with the same name return the same `Arc`.
    pub fn get_namespace(&self, name: &str) -> Result<Arc<NamespaceHandle<C>>> {
        let mut handles = self.handles.lock();
        if let Some(handle) = handles.get(name) {
            return Ok(Arc::clone(handle));
        }

        if let Err(e) = codec::validate_namespace(name) {
            tracing::warn!(namespace = ?name, "Rejected namespace name");
            return Err(e);
        }

        let handle = Arc::new(NamespaceHandle::new(
            name.to_string(),
            Arc::clone(&self.engine),
        ));
        handles.insert(name.to_string(), Arc::clone(&handle));
        tracing::debug!(namespace = %name, "Created namespace handle");
        Ok(handle)
    }

    /// Close the shared engine handle
    ///
    /// Namespace handles stay cached but fail with `NotOpen` from now on.
    pub fn close(&self) {
        self.engine.close();
    }

    pub fn is_open(&self) -> bool {
        self.engine.is_open()
    }

    /// Number of namespace handles created so far
    pub fn namespace_count(&self) -> usize {
        self.handles.lock().len()
    }

    /// The shared engine handle
    pub fn engine(&self) -> &Arc<EngineHandle<C>> {
        &self.engine
    }
}
