//! Growable byte storage with a two-regime growth policy.
//!
//! [`Storage`] keeps a raw byte region plus a *logical length*: the count
//! of bytes considered readable, which may lag the allocated capacity
//! (pre-grown slack). Growth only ever adds zeroed capacity at the end
//! and never moves content already written.

use log::trace;

use crate::error::{RabuError, Result};

/// One allocation page. Growth rounds to this granularity.
pub const PAGE: usize = 0x100;

/// Ceiling for a single pessimistic growth increment.
pub const PAGE_CAP: usize = 0x200;

/// Optimistic growth filter: round the requested capacity up to the next
/// page, with a floor of one page.
///
/// Used when a single growth is sized once, ahead of a bulk write.
pub fn optimistic(q: usize) -> usize {
    if q < PAGE {
        PAGE
    } else {
        (q & !(PAGE - 1)) + PAGE
    }
}

/// Pessimistic growth filter: small requests pass through literally,
/// anything larger is clamped to one or two pages.
///
/// Used for incremental growth and for sizing transfer chunks, so no
/// single step over-allocates by more than a page.
pub fn pessimistic(q: usize) -> usize {
    if q < PAGE {
        q
    } else if q > PAGE_CAP {
        PAGE_CAP
    } else {
        PAGE
    }
}

/// Raw growable byte region with a logical (readable) length.
///
/// Callers are responsible for bounds-checking before the indexed
/// accessors; the facade performs the combined window/storage check.
#[derive(Debug)]
pub struct Storage {
    data: Vec<u8>,
    length: usize,
}

impl Storage {
    /// Fresh storage with one page of capacity and nothing readable.
    pub fn new() -> Self {
        Storage {
            data: vec![0; PAGE],
            length: 0,
        }
    }

    /// Adopt a caller's bytes; the whole vector is readable content.
    pub fn from_vec(data: Vec<u8>) -> Self {
        let length = data.len();
        Storage { data, length }
    }

    /// Count of readable bytes.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Allocated capacity, which may exceed the readable length.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// The readable content.
    pub fn bytes(&self) -> &[u8] {
        &self.data[..self.length]
    }

    /// Append `q` zeroed bytes of capacity, preserving existing content
    /// at its original indices.
    pub fn grow(&mut self, q: usize) {
        trace!("grow {} -> {} (+{})", self.data.len(), self.data.len() + q, q);
        self.data.resize(self.data.len() + q, 0);
    }

    /// Availability at `internal`, combining the window's remaining count
    /// with the readable length.
    ///
    /// A finite window remainder must be fully backed by readable bytes;
    /// a window built wider than its data is a configuration error, not a
    /// short read.
    ///
    /// # Errors
    ///
    /// Returns [`RabuError::WindowExceedsStorage`] when a constrained
    /// window reaches past the readable length.
    pub fn available_at(&self, internal: usize, window_remaining: Option<usize>) -> Result<usize> {
        match window_remaining {
            Some(remaining) => {
                if internal + remaining <= self.length {
                    Ok(remaining)
                } else {
                    Err(RabuError::WindowExceedsStorage {
                        index: internal,
                        remaining,
                        length: self.length,
                    })
                }
            }
            None => Ok(self.length.saturating_sub(internal)),
        }
    }

    /// Raw indexed read. The caller has already bounds-checked.
    pub fn read_byte(&self, internal: usize) -> u8 {
        self.data[internal]
    }

    /// Raw indexed write. Writing at or past the readable length extends
    /// it to cover the byte (writing past the end is an append).
    pub fn write_byte(&mut self, internal: usize, value: u8) {
        self.data[internal] = value;
        if internal >= self.length {
            self.length = internal + 1;
        }
    }

    /// Raw run write, with the same write-extends-length semantics.
    pub fn write_slice(&mut self, internal: usize, bytes: &[u8]) {
        self.data[internal..internal + bytes.len()].copy_from_slice(bytes);
        if internal + bytes.len() > self.length {
            self.length = internal + bytes.len();
        }
    }

    /// Copy readable bytes out at `internal`. The caller has already
    /// bounds-checked the run.
    pub fn copy_out(&self, internal: usize, out: &mut [u8]) {
        out.copy_from_slice(&self.data[internal..internal + out.len()]);
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}
