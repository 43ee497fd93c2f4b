//! Error types for nskv
//!
//! Provides a unified error type for all operations.
//!
//! Using a handle that was never opened is not represented here: it is a
//! programmer error and panics (see [`crate::engine::EngineHandle`]).

use thiserror::Error;

use crate::engine::EngineFault;

/// Result type alias using NsKvError
pub type Result<T> = std::result::Result<T, NsKvError>;

/// Unified error type for nskv operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NsKvError {
    // -------------------------------------------------------------------------
    // Lifecycle Errors
    // -------------------------------------------------------------------------
    #[error("Engine handle is closed")]
    NotOpen,

    // -------------------------------------------------------------------------
    // Engine Errors
    // -------------------------------------------------------------------------
    #[error("Engine error: {0}")]
    Engine(String),

    // -------------------------------------------------------------------------
    // Key / Namespace Errors
    // -------------------------------------------------------------------------
    #[error("Invalid namespace name: {0}")]
    InvalidNamespace(String),

    #[error("Malformed physical key: {0}")]
    MalformedKey(String),
}

impl From<EngineFault> for NsKvError {
    fn from(fault: EngineFault) -> Self {
        NsKvError::Engine(fault.0)
    }
}
