//! Buffer handling and windowing.
//!
//! [`RandomAccessBuffer`] composes a shared [`Storage`], one [`Window`]
//! and one cursor. Every operation translates the cursor through the
//! window into a storage index, checks the combined window/storage
//! bounds, and only then touches storage bytes.
//!
//! Multiple buffers may share one storage through different windows;
//! each keeps an independent cursor. Sharing is single-threaded by
//! construction (`Rc<RefCell<_>>`).

use std::cell::RefCell;
use std::io::{Read, Write};
use std::rc::Rc;

use log::debug;

use crate::error::{RabuError, Result};
use crate::storage::{optimistic, pessimistic, Storage, PAGE};
use crate::window::Window;

/// Windowed random-access view over a growable, shareable byte storage.
///
/// Stateful operations (`read`, `write`, `seek`) go through the cursor;
/// `get`/`set`/`copy_range` are stateless random access and leave it
/// untouched.
#[derive(Debug, Clone)]
pub struct RandomAccessBuffer {
    storage: Rc<RefCell<Storage>>,
    window: Window,
    cursor: usize,
}

impl RandomAccessBuffer {
    /// An empty, unconstrained buffer.
    pub fn new() -> Self {
        RandomAccessBuffer {
            storage: Rc::new(RefCell::new(Storage::new())),
            window: Window::unconstrained(),
            cursor: 0,
        }
    }

    /// Adopt a caller's bytes as readable content, unconstrained.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        RandomAccessBuffer {
            storage: Rc::new(RefCell::new(Storage::from_vec(bytes))),
            window: Window::unconstrained(),
            cursor: 0,
        }
    }

    /// Adopt a caller's bytes viewed through a constrained window.
    ///
    /// # Errors
    ///
    /// Returns [`RabuError::InvalidWindow`] when `extent` is zero.
    pub fn windowed(bytes: Vec<u8>, delta: usize, extent: usize) -> Result<Self> {
        let window = Window::new(delta, extent)?;
        Ok(RandomAccessBuffer {
            storage: Rc::new(RefCell::new(Storage::from_vec(bytes))),
            window,
            cursor: 0,
        })
    }

    /// A new buffer over the same storage, seen through `window`, with an
    /// independent cursor at zero.
    ///
    /// This is how a caller zooms into a sub-range without copying bytes.
    pub fn view(&self, window: Window) -> Self {
        RandomAccessBuffer {
            storage: Rc::clone(&self.storage),
            window,
            cursor: 0,
        }
    }

    /// The window this buffer reads the storage through.
    pub fn window(&self) -> Window {
        self.window
    }

    /// Current external cursor position.
    pub fn offset(&self) -> usize {
        self.cursor
    }

    /// The cursor translated into the storage's coordinate space.
    pub fn internal_offset(&self) -> usize {
        self.window.internal(self.cursor)
    }

    /// Readable bytes in the storage, ignoring the window.
    pub fn storage_length(&self) -> usize {
        self.storage.borrow().length()
    }

    /// Allocated storage capacity.
    pub fn storage_capacity(&self) -> usize {
        self.storage.borrow().capacity()
    }

    /// Bytes available at the cursor, constrained by window and storage
    /// combined.
    ///
    /// # Errors
    ///
    /// Returns [`RabuError::WindowExceedsStorage`] when a constrained
    /// window reaches past the readable length.
    pub fn available(&self) -> Result<usize> {
        self.storage.borrow().available_at(
            self.window.internal(self.cursor),
            self.window.remaining(self.cursor),
        )
    }

    /// Move the cursor to `external`.
    ///
    /// Fails (leaving the cursor unchanged) when the target lies outside
    /// the readable content or outside a constrained window.
    pub fn seek(&mut self, external: usize) -> bool {
        let internal = self.window.internal(external);
        let inside_window = self.window.remaining(external).map_or(true, |r| r > 0);

        if inside_window && internal < self.storage.borrow().length() {
            self.cursor = external;
            true
        } else {
            false
        }
    }

    /// Move the cursor back to zero. Equivalent to `seek(0)`.
    pub fn reset(&mut self) -> bool {
        self.seek(0)
    }

    /// Read one byte at the cursor and advance it.
    ///
    /// `None` is the end-of-data sentinel, not an error; it is the
    /// expected outcome of reading at or past availability.
    pub fn read(&mut self) -> Option<u8> {
        let internal = self.window.internal(self.cursor);
        let available = self.available().ok()?;

        if available >= 1 {
            let value = self.storage.borrow().read_byte(internal);
            self.cursor += 1;
            Some(value)
        } else {
            None
        }
    }

    /// Read up to `out.len()` bytes at the cursor, advancing it by the
    /// count actually read.
    ///
    /// Short reads are legal and never a failure; `0` means end of data.
    pub fn read_into(&mut self, out: &mut [u8]) -> usize {
        let internal = self.window.internal(self.cursor);
        let available = self.available().unwrap_or(0);
        let count = out.len().min(available);

        if count > 0 {
            self.storage
                .borrow()
                .copy_out(internal, &mut out[..count]);
            self.cursor += count;
        }
        count
    }

    /// Write one byte at the cursor and advance it.
    ///
    /// Grows the storage by a pessimistic increment when the cursor sits
    /// at capacity. Returns `false` when a constrained window refuses the
    /// position, or when a single increment still cannot back it; no byte
    /// lands in either case.
    pub fn write(&mut self, value: u8) -> bool {
        let internal = self.window.internal(self.cursor);

        if !self.window.admits(self.cursor, 1) {
            return false;
        }

        let mut storage = self.storage.borrow_mut();
        if internal >= storage.capacity() {
            storage.grow(pessimistic(PAGE));
        }
        // One growth increment may still not back a far-offset window.
        if internal >= storage.capacity() {
            return false;
        }
        storage.write_byte(internal, value);
        self.cursor += 1;
        true
    }

    /// Write a whole run at the cursor and advance it, or write nothing.
    ///
    /// Grows the storage once, optimistically sized to the exact
    /// post-write extent, before the bounds check. A run refused by a
    /// constrained window does not partially land.
    pub fn write_all(&mut self, bytes: &[u8]) -> bool {
        let internal = self.window.internal(self.cursor);
        let end = internal + bytes.len();

        if !self.window.admits(self.cursor, bytes.len()) {
            return false;
        }

        let mut storage = self.storage.borrow_mut();
        if end > storage.capacity() {
            let target = optimistic(end);
            let capacity = storage.capacity();
            storage.grow(target - capacity);
        }
        storage.write_slice(internal, bytes);
        self.cursor += bytes.len();
        true
    }

    /// Stateless random-access read; the cursor is unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`RabuError::OutOfRange`] when `external` falls outside
    /// the combined window/storage bounds. Random access has no natural
    /// end, so this signals by error rather than sentinel.
    pub fn get(&self, external: usize) -> Result<u8> {
        let internal = self.window.internal(external);
        let storage = self.storage.borrow();

        if self.window.admits(external, 1) && internal < storage.length() {
            Ok(storage.read_byte(internal))
        } else {
            Err(RabuError::OutOfRange {
                offset: external,
                length: storage.length(),
            })
        }
    }

    /// Stateless random-access write; the cursor is unaffected.
    ///
    /// Only positions already inside the readable content may be set;
    /// this never grows the storage.
    ///
    /// # Errors
    ///
    /// Returns [`RabuError::OutOfRange`] when `external` falls outside
    /// the combined window/storage bounds.
    pub fn set(&mut self, external: usize, value: u8) -> Result<()> {
        let internal = self.window.internal(external);
        let mut storage = self.storage.borrow_mut();

        if self.window.admits(external, 1) && internal < storage.length() {
            storage.write_byte(internal, value);
            Ok(())
        } else {
            Err(RabuError::OutOfRange {
                offset: external,
                length: storage.length(),
            })
        }
    }

    /// Transfer `count` bytes from `reader` into the buffer at the
    /// cursor, chunked by the pessimistic policy.
    ///
    /// `Ok(true)` only when the full count was consumed; `Ok(false)` when
    /// the reader ran dry early or an internal write was refused.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the reader fails.
    pub fn copy_from(&mut self, reader: &mut impl Read, mut count: usize) -> Result<bool> {
        let mut chunk = vec![0u8; pessimistic(count)];
        let mut size = chunk.len();

        while count > 0 && size > 0 {
            let r = reader.read(&mut chunk[..size])?;
            if r == 0 {
                break;
            }
            if !self.write_all(&chunk[..r]) {
                debug!("copy_from: write refused at offset {}", self.cursor);
                return Ok(false);
            }
            count -= r;
            if size > count {
                size = count;
            }
        }
        Ok(count == 0)
    }

    /// Drain the buffer from the cursor to end-of-data into `writer`,
    /// chunked by the pessimistic policy. Returns the total transferred;
    /// an empty buffer yields zero.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the writer fails.
    pub fn copy_to(&mut self, writer: &mut impl Write) -> Result<usize> {
        let size = pessimistic(self.available().unwrap_or(0));
        if size == 0 {
            return Ok(0);
        }

        let mut chunk = vec![0u8; size];
        let mut total = 0;
        loop {
            let r = self.read_into(&mut chunk);
            if r == 0 {
                break;
            }
            writer.write_all(&chunk[..r])?;
            total += r;
        }
        Ok(total)
    }

    /// Stateless snapshot of the run `[external, external + count)`, or
    /// `None` when the run falls outside the combined bounds.
    pub fn copy_range(&self, external: usize, count: usize) -> Option<Vec<u8>> {
        let internal = self.window.internal(external);
        let storage = self.storage.borrow();

        if self.window.admits(external, count) && internal + count <= storage.length() {
            let mut out = vec![0u8; count];
            storage.copy_out(internal, &mut out);
            Some(out)
        } else {
            None
        }
    }

    /// Linear forward scan for `value` from the cursor to the end of
    /// availability. Returns the external offset of the first match; the
    /// cursor does not move.
    pub fn index_of(&self, value: u8) -> Option<usize> {
        let internal = self.window.internal(self.cursor);
        let available = self.available().ok()?;
        let storage = self.storage.borrow();

        (0..available)
            .find(|k| storage.read_byte(internal + k) == value)
            .map(|k| self.cursor + k)
    }

    /// Decode the run `[external, external + count)` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`RabuError::OutOfRange`] when the run is not fully
    /// available, and [`RabuError::InvalidArgument`] when the bytes are
    /// not valid UTF-8.
    pub fn substring(&self, external: usize, count: usize) -> Result<String> {
        let bytes = self
            .copy_range(external, count)
            .ok_or(RabuError::OutOfRange {
                offset: external,
                length: self.storage_length(),
            })?;
        String::from_utf8(bytes).map_err(|e| {
            RabuError::InvalidArgument(format!(
                "substring at offset {external} is not valid UTF-8: {e}"
            ))
        })
    }
}

impl Default for RandomAccessBuffer {
    fn default() -> Self {
        Self::new()
    }
}
