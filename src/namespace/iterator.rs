//! Range Iterator
//!
//! Namespace-relative view over an engine cursor.

use crate::codec;
use crate::engine::RawCursor;

/// Position of a [`RangeIterator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    BeforeFirst,
    Positioned,
    Exhausted,
}

/// Forward cursor over one namespace's keys within `[start, end)`
///
/// ```text
///   BeforeFirst ──seek_to_first──► Positioned ──advance──► ... ──► Exhausted
///        └───────────seek_to_first (empty range)──────────────────────┘
/// ```
///
/// Keys are returned without the namespace prefix. The engine cursor is
/// released by [`RangeIterator::release`] or on drop, whichever comes first.
///
/// Also usable as a plain `Iterator` of owned `(key, value)` pairs, which
/// seeks to the first key on the first call.
pub struct RangeIterator<C: RawCursor> {
    cursor: Option<C>,
    state: CursorState,

    /// Whether the current entry was already yielded through `Iterator`
    yielded: bool,
}

impl<C: RawCursor> RangeIterator<C> {
    pub(crate) fn new(cursor: C) -> Self {
        Self {
            cursor: Some(cursor),
            state: CursorState::BeforeFirst,
            yielded: false,
        }
    }

    /// Position on the first key of the range
    pub fn seek_to_first(&mut self) {
        self.state = match self.cursor.as_mut() {
            Some(cursor) => {
                cursor.seek_to_first();
                if cursor.valid() {
                    CursorState::Positioned
                } else {
                    CursorState::Exhausted
                }
            }
            None => CursorState::Exhausted,
        };
        self.yielded = false;
    }

    /// Move to the next key; `false` once the range is exhausted
    ///
    /// Called before any seek, positions on the first key instead.
    pub fn advance(&mut self) -> bool {
        match self.state {
            CursorState::BeforeFirst => self.seek_to_first(),
            CursorState::Positioned => {
                let moved = self.cursor.as_mut().map_or(false, |c| c.next());
                if !moved {
                    self.state = CursorState::Exhausted;
                }
                self.yielded = false;
            }
            CursorState::Exhausted => {}
        }
        self.valid()
    }

    pub fn valid(&self) -> bool {
        self.state == CursorState::Positioned
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Current key without the namespace prefix
    pub fn key(&self) -> Option<&[u8]> {
        if !self.valid() {
            return None;
        }
        let physical = self.cursor.as_ref()?.key()?;
        match codec::decode_app_key(physical) {
            Ok(key) => Some(key),
            Err(e) => {
                tracing::error!(error = %e, "Error while trying to decode iterator key");
                None
            }
        }
    }

    pub fn value(&self) -> Option<&[u8]> {
        if !self.valid() {
            return None;
        }
        self.cursor.as_ref()?.value()
    }

    /// Release the engine cursor. Safe to call more than once.
    pub fn release(&mut self) {
        if self.cursor.take().is_some() {
            tracing::trace!("Range iterator released");
        }
        self.state = CursorState::Exhausted;
    }

    pub fn is_released(&self) -> bool {
        self.cursor.is_none()
    }
}

impl<C: RawCursor> Iterator for RangeIterator<C> {
    type Item = (Vec<u8>, Vec<u8>);

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            CursorState::BeforeFirst => self.seek_to_first(),
            CursorState::Positioned if self.yielded => {
                self.advance();
            }
            _ => {}
        }

        let item = (self.key()?.to_vec(), self.value()?.to_vec());
        self.yielded = true;
        Some(item)
    }
}

impl<C: RawCursor> Drop for RangeIterator<C> {
    fn drop(&mut self) {
        self.release();
    }
}
