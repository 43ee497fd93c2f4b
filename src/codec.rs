//! Key codec
//!
//! Maps namespace-relative keys onto the single flat key space of the engine.
//!
//! ## Physical Key Format
//!
//! ```text
//! ┌──────────────────────┬──────────┬─────────────────────────────┐
//! │ Namespace (n bytes)  │ 0x00 (1) │        Raw key              │
//! └──────────────────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Upper Bound Sentinel
//! ```text
//! ┌──────────────────────┬──────────┐
//! │ Namespace (n bytes)  │ 0x01 (1) │
//! └──────────────────────┴──────────┘
//! ```
//!
//! Every physical key of a namespace sorts strictly below its sentinel, and
//! the sentinel sorts at or below the first key of any other namespace, as
//! long as namespace names contain neither 0x00 nor 0x01.

use crate::error::{NsKvError, Result};

/// Byte separating the namespace from the raw key
pub const NAMESPACE_SEPARATOR: u8 = 0x00;

/// Byte replacing the separator to form the exclusive end of a namespace
pub const LAST_KEY_INDICATOR: u8 = 0x01;

// =============================================================================
// Namespace Validation
// =============================================================================

/// Check that a namespace name can be used as a key prefix
pub fn validate_namespace(namespace: &str) -> Result<()> {
    if namespace
        .bytes()
        .any(|b| b == NAMESPACE_SEPARATOR || b == LAST_KEY_INDICATOR)
    {
        return Err(NsKvError::InvalidNamespace(format!(
            "{:?} contains a reserved byte (0x00 or 0x01)",
            namespace
        )));
    }
    Ok(())
}

// =============================================================================
// Encoding / Decoding
// =============================================================================

/// Build the physical key for `raw_key` within `namespace`
pub fn encode_key(namespace: &str, raw_key: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(namespace.len() + 1 + raw_key.len());
    key.extend_from_slice(namespace.as_bytes());
    key.push(NAMESPACE_SEPARATOR);
    key.extend_from_slice(raw_key);
    key
}

/// Strip the namespace prefix from a physical key
///
/// Splits on the first separator byte; everything after it is the raw key.
pub fn decode_app_key(physical_key: &[u8]) -> Result<&[u8]> {
    match physical_key
        .iter()
        .position(|&b| b == NAMESPACE_SEPARATOR)
    {
        Some(pos) => Ok(&physical_key[pos + 1..]),
        None => Err(NsKvError::MalformedKey(format!(
            "no namespace separator in {:?}",
            physical_key
        ))),
    }
}

/// Exclusive physical end bound covering the whole of `namespace`
pub fn upper_bound_sentinel(namespace: &str) -> Vec<u8> {
    let mut key = encode_key(namespace, &[]);
    // The separator is the last byte of an empty-key encoding.
    if let Some(last) = key.last_mut() {
        *last = LAST_KEY_INDICATOR;
    }
    key
}
