//! Windowed, growable random-access byte buffer with an endian-aware
//! multi-byte codec layered on top.
//!
//! A [`RandomAccessBuffer`] treats a sub-range of a larger byte storage
//! as an independent, boundable stream: reads and writes are expressed
//! in a caller-visible coordinate space that a [`Window`] translates
//! into the storage's own index space. Multiple buffers may share one
//! storage through different windows without copying bytes.
//!
//! [`RandomAccessData`] adds fixed-width integer encode/decode in either
//! byte order, both against the in-memory buffer and against external
//! streams.
//!
//! ```
//! use rabu::{Endian, RandomAccessBuffer, RandomAccessData, Window};
//!
//! let mut rabu = RandomAccessBuffer::new();
//! assert!(rabu.write_all(&[0x00, 0x00, 0x01, 0x00]));
//!
//! let be = RandomAccessData::over(Endian::Big, rabu.clone());
//! assert_eq!(be.sint32_at(0).unwrap(), 256);
//!
//! // Zoom into the last two bytes without copying.
//! let tail = rabu.view(Window::new(2, 2).unwrap());
//! assert_eq!(tail.get(0).unwrap(), 0x01);
//! ```

pub mod buffer;
pub mod endian;
pub mod error;
pub mod file;
pub mod printer;
pub mod storage;
pub mod window;

// Re-export main types for convenience
pub use buffer::RandomAccessBuffer;
pub use endian::{Endian, RandomAccessData};
pub use error::{RabuError, Result};
pub use printer::{BufferPrinter, ContentFormat, OffsetFormat};
pub use storage::Storage;
pub use window::Window;

#[cfg(test)]
mod tests;
