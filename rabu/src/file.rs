//! File ingestion and emission over the random-access buffer.
//!
//! Thin glue copying whole files into a buffer (and back) in fixed-size
//! chunks. Failures carry the file path.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use log::debug;

use crate::buffer::RandomAccessBuffer;
use crate::error::{RabuError, Result};

/// Transfer chunk size for file copies.
const CHUNK: usize = 0x200;

/// Read a whole file into the buffer at its cursor. Returns the byte
/// count ingested.
///
/// # Errors
///
/// Returns [`RabuError::File`] when the file cannot be opened or read,
/// and [`RabuError::OutOfRange`] when a constrained window refuses a
/// chunk.
pub fn read_path(path: impl AsRef<Path>, rabu: &mut RandomAccessBuffer) -> Result<usize> {
    let path = path.as_ref();
    let mut fin = File::open(path).map_err(|source| RabuError::File {
        path: path.into(),
        source,
    })?;

    let mut chunk = [0u8; CHUNK];
    let mut total = 0;
    loop {
        let r = fin.read(&mut chunk).map_err(|source| RabuError::File {
            path: path.into(),
            source,
        })?;
        if r == 0 {
            break;
        }
        if !rabu.write_all(&chunk[..r]) {
            return Err(RabuError::OutOfRange {
                offset: rabu.offset(),
                length: rabu.storage_length(),
            });
        }
        total += r;
    }

    debug!("read {} bytes from {}", total, path.display());
    Ok(total)
}

/// Drain the buffer from its cursor to end-of-data into a file. Returns
/// the byte count emitted.
///
/// # Errors
///
/// Returns [`RabuError::File`] when the file cannot be created or
/// written.
pub fn write_path(path: impl AsRef<Path>, rabu: &mut RandomAccessBuffer) -> Result<usize> {
    let path = path.as_ref();
    let mut fout = File::create(path).map_err(|source| RabuError::File {
        path: path.into(),
        source,
    })?;

    let mut chunk = [0u8; CHUNK];
    let mut total = 0;
    loop {
        let r = rabu.read_into(&mut chunk);
        if r == 0 {
            break;
        }
        fout.write_all(&chunk[..r])
            .map_err(|source| RabuError::File {
                path: path.into(),
                source,
            })?;
        total += r;
    }

    debug!("wrote {} bytes to {}", total, path.display());
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.bin");
        let dst = dir.path().join("dst.bin");

        let content: Vec<u8> = (0..=255u8).cycle().take(0x300).collect();
        std::fs::write(&src, &content).unwrap();

        let mut rabu = RandomAccessBuffer::new();
        assert_eq!(read_path(&src, &mut rabu).unwrap(), 0x300);

        assert!(rabu.reset());
        assert_eq!(write_path(&dst, &mut rabu).unwrap(), 0x300);
        assert_eq!(std::fs::read(&dst).unwrap(), content);
    }

    #[test]
    fn missing_file_carries_the_path() {
        let mut rabu = RandomAccessBuffer::new();
        let err = read_path("/no/such/file", &mut rabu).unwrap_err();
        match err {
            RabuError::File { path, .. } => {
                assert_eq!(path, Path::new("/no/such/file"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn emission_starts_at_the_cursor() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("tail.bin");

        let mut rabu = RandomAccessBuffer::from_vec(vec![1, 2, 3, 4, 5]);
        assert!(rabu.seek(3));
        assert_eq!(write_path(&dst, &mut rabu).unwrap(), 2);
        assert_eq!(std::fs::read(&dst).unwrap(), vec![4, 5]);
    }
}
