//! # nskv
//!
//! A key-value storage adapter that shares one embedded engine between many
//! logical databases:
//! - Collision-free namespaced keys over one flat key space
//! - Atomic multi-key update batches per namespace
//! - Range iteration bounded to a namespace
//! - Single open/close lifecycle for the shared engine handle
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Registry                              │
//! │              (name → NamespaceHandle cache)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  NamespaceHandle                             │
//! │        get / put / delete / write_batch / get_iterator       │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │    Key Codec    │                │  RangeIterator  │
//!   │ ns ++ 0x00 ++ k │                │ (decodes keys)  │
//!   └────────┬────────┘                └────────▲────────┘
//!            │                                  │
//! ┌──────────▼──────────────────────────────────┴───────────────┐
//! │                    EngineHandle (Mutex)                      │
//! │                 Closed ⇄ Opened lifecycle                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐
//!               │   RawEngine   │
//!               │  (MemTable)   │
//!               └───────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use nskv::{Config, Registry, UpdateBatch};
//!
//! let registry = Registry::create(Config::default()).unwrap();
//! let accounts = registry.get_namespace("accounts").unwrap();
//!
//! accounts.put(b"alice", b"10").unwrap();
//!
//! let mut batch = UpdateBatch::new();
//! batch.put("bob", "20");
//! batch.delete("alice");
//! accounts.write_batch(batch).unwrap();
//!
//! let keys: Vec<Vec<u8>> = accounts
//!     .get_iterator(None, None)
//!     .unwrap()
//!     .map(|(k, _)| k)
//!     .collect();
//! assert_eq!(keys, vec![b"bob".to_vec()]);
//!
//! registry.close();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod engine;
pub mod memtable;
pub mod namespace;
pub mod registry;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{NsKvError, Result};
pub use config::{ClosedBatchPolicy, Config};
pub use engine::{EngineHandle, HandleState};
pub use namespace::{NamespaceHandle, RangeIterator, UpdateBatch};
pub use registry::Registry;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of nskv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
