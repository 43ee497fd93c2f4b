//! MemTable Cursor
//!
//! Forward iteration over a key range of a MemTable.

use std::ops::Bound;
use std::sync::Weak;

use parking_lot::RwLock;

use crate::engine::RawCursor;

use super::table::Entries;

/// Cursor over `[start, end)` of a MemTable
///
/// Each step takes the read lock briefly and resumes after the last key
/// returned, so writers are never blocked for the lifetime of the cursor.
///
/// The cursor does not keep the table alive: once the owning MemTable is
/// dropped, it yields nothing.
pub struct MemCursor {
    data: Weak<RwLock<Entries>>,

    /// Inclusive lower bound
    start: Vec<u8>,

    /// Exclusive upper bound, `None` = unbounded
    end: Option<Vec<u8>>,

    /// Entry the cursor is positioned on
    current: Option<(Vec<u8>, Vec<u8>)>,
}

impl MemCursor {
    pub(super) fn new(data: Weak<RwLock<Entries>>) -> Self {
        Self {
            data,
            start: Vec::new(),
            end: None,
            current: None,
        }
    }

    /// First entry above `lower` and below the end bound
    fn first_from(&self, lower: Bound<&[u8]>) -> Option<(Vec<u8>, Vec<u8>)> {
        let upper = match &self.end {
            Some(end) => Bound::Excluded(end.as_slice()),
            None => Bound::Unbounded,
        };

        // BTreeMap::range panics on inverted bounds
        if let (Bound::Included(s) | Bound::Excluded(s), Bound::Excluded(e)) = (lower, upper) {
            if s >= e {
                return None;
            }
        }

        // Table dropped: the engine connection was closed
        let table = self.data.upgrade()?;
        let data = table.read();
        let entry = data
            .range::<[u8], _>((lower, upper))
            .next()
            .map(|(k, v)| (k.clone(), v.clone()));
        entry
    }
}

impl RawCursor for MemCursor {
    fn set_range(&mut self, start: &[u8], end: Option<&[u8]>) {
        self.start = start.to_vec();
        self.end = end.map(|e| e.to_vec());
        self.current = None;
    }

    fn seek_to_first(&mut self) {
        self.current = self.first_from(Bound::Included(self.start.as_slice()));
    }

    fn next(&mut self) -> bool {
        let next = match &self.current {
            Some((key, _)) => self.first_from(Bound::Excluded(key.as_slice())),
            None => return false,
        };
        self.current = next;
        self.current.is_some()
    }

    fn valid(&self) -> bool {
        self.current.is_some()
    }

    fn key(&self) -> Option<&[u8]> {
        self.current.as_ref().map(|(k, _)| k.as_slice())
    }

    fn value(&self) -> Option<&[u8]> {
        self.current.as_ref().map(|(_, v)| v.as_slice())
    }
}
