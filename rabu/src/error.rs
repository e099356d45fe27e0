//! Error types for buffer, codec and file operations.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RabuError>;

/// Main error type for random-access buffer operations.
///
/// End-of-data is deliberately *not* represented here: the stateful read
/// path reports it through an `Option`/count sentinel, because running out
/// of bytes mid-stream is an expected condition rather than a fault.
#[derive(Debug, Error)]
pub enum RabuError {
    /// A window was constructed with parameters that cannot describe an
    /// aperture (a constrained window needs a positive extent).
    #[error("invalid window: delta {delta}, extent {extent}")]
    InvalidWindow { delta: usize, extent: usize },

    /// A caller-supplied value violated a documented precondition, such
    /// as an encode value that does not fit the declared width.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Stateless random access (`get`/`set`/`substring`) landed outside
    /// the combined window/buffer bounds.
    #[error("offset {offset} out of range: readable length is {length}")]
    OutOfRange { offset: usize, length: usize },

    /// A constrained window reaches past the bytes the storage can
    /// actually back. The window was built wider than the data it wraps.
    #[error(
        "window claims {remaining} bytes at index {index}, but readable length is {length}"
    )]
    WindowExceedsStorage {
        index: usize,
        remaining: usize,
        length: usize,
    },

    /// A multi-byte decode ran out of bytes before the full width was
    /// available.
    #[error("unexpected end of data: needed {needed} bytes, got {got}")]
    UnexpectedEnd { needed: usize, got: usize },

    /// A file could not be opened, read or written.
    #[error("file {path}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
