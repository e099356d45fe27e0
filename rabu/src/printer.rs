//! Diagnostic dump of buffer content, following the unix "od" concept.
//!
//! Rows carry a zero-padded offset followed by up to twenty per-byte
//! cells; a trailing row prints the final offset with no cells. Named
//! control codes render as their mnemonic, printable bytes as the
//! literal character, and everything else as hexadecimal.

use std::io::{self, Write};

use crate::buffer::RandomAccessBuffer;
use crate::error::Result;

/// Cells per dump row.
const ROW_CELLS: usize = 20;

/// How row offsets render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetFormat {
    /// Seven-digit zero-padded decimal.
    #[default]
    Decimal,
    /// Eight-digit uppercase hexadecimal.
    Hex,
}

/// How byte cells render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentFormat {
    /// Mnemonics for named control codes, literal printable characters,
    /// hexadecimal for the rest.
    #[default]
    Ascii,
    /// Two-digit hexadecimal for every byte.
    Hex,
}

/// Mnemonic for an ASCII control code (plus SP and DEL), if it has one.
fn mnemonic(code: u8) -> Option<&'static str> {
    Some(match code {
        0x00 => "NUL",
        0x01 => "SOH",
        0x02 => "STX",
        0x03 => "ETX",
        0x04 => "EOT",
        0x05 => "ENQ",
        0x06 => "ACK",
        0x07 => "BEL",
        0x08 => "BS",
        0x09 => "HT",
        0x0A => "LF",
        0x0B => "VT",
        0x0C => "FF",
        0x0D => "CR",
        0x0E => "SO",
        0x0F => "SI",
        0x10 => "DLE",
        0x11 => "DC1",
        0x12 => "DC2",
        0x13 => "DC3",
        0x14 => "DC4",
        0x15 => "NAK",
        0x16 => "SYN",
        0x17 => "ETB",
        0x18 => "CAN",
        0x19 => "EM",
        0x1A => "SUB",
        0x1B => "ESC",
        0x1C => "FS",
        0x1D => "GS",
        0x1E => "RS",
        0x1F => "US",
        0x20 => "SP",
        0x7F => "DEL",
        _ => return None,
    })
}

/// Fixed-width row dumper with a running position.
///
/// The position survives across `print` calls so chunked dumps number
/// continuously; `reset`/`seek` rewind or reposition it.
#[derive(Debug, Clone)]
pub struct BufferPrinter {
    offset_format: OffsetFormat,
    content_format: ContentFormat,
    position: usize,
}

impl BufferPrinter {
    /// Decimal offsets, ascii cells, position zero.
    pub fn new() -> Self {
        Self::with_formats(OffsetFormat::default(), ContentFormat::default())
    }

    pub fn with_formats(offset_format: OffsetFormat, content_format: ContentFormat) -> Self {
        BufferPrinter {
            offset_format,
            content_format,
            position: 0,
        }
    }

    /// Rewind the running position to zero.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Move the running position.
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    fn offset(&self, out: &mut impl Write) -> io::Result<()> {
        match self.offset_format {
            OffsetFormat::Decimal => write!(out, "{:07}", self.position),
            OffsetFormat::Hex => write!(out, "{:08X}", self.position),
        }
    }

    fn cell(&self, value: u8, out: &mut impl Write) -> io::Result<()> {
        match self.content_format {
            ContentFormat::Ascii => {
                if let Some(name) = mnemonic(value) {
                    write!(out, " {name:>3}")
                } else if (0x21..0x7F).contains(&value) {
                    write!(out, " {:>3}", value as char)
                } else {
                    write!(out, " {value:03X}")
                }
            }
            ContentFormat::Hex => write!(out, " {value:02X}"),
        }
    }

    /// Dump a byte run as fixed-width rows, advancing the running
    /// position by one per cell, then print the trailing offset row.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if `out` fails.
    pub fn print(&mut self, bytes: &[u8], out: &mut impl Write) -> io::Result<()> {
        let mut i = 0;

        while i < bytes.len() {
            self.offset(out)?;

            let mut c = 0;
            while c < ROW_CELLS && i < bytes.len() {
                self.cell(bytes[i], out)?;
                c += 1;
                self.position += 1;
                i += 1;
            }
            writeln!(out)?;
        }

        self.offset(out)?;
        writeln!(out)
    }

    /// Dump a buffer's current availability without moving its cursor.
    ///
    /// # Errors
    ///
    /// Propagates the combined-bounds failure from the buffer and any
    /// I/O error from `out`.
    pub fn print_buffer(
        &mut self,
        rabu: &RandomAccessBuffer,
        out: &mut impl Write,
    ) -> Result<()> {
        let available = rabu.available()?;
        // In bounds whenever available() is.
        let bytes = rabu.copy_range(rabu.offset(), available).unwrap_or_default();
        self.print(&bytes, out)?;
        Ok(())
    }
}

impl Default for BufferPrinter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump(p: &mut BufferPrinter, bytes: &[u8]) -> String {
        let mut out = Vec::new();
        p.print(bytes, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn ascii_cells_and_trailing_offset() {
        let mut p = BufferPrinter::new();
        let text = dump(&mut p, b"Hi\n");
        assert_eq!(text, "0000000   H   i  LF\n0000003\n");
    }

    #[test]
    fn rows_break_at_twenty_cells() {
        let mut p = BufferPrinter::with_formats(OffsetFormat::Decimal, ContentFormat::Hex);
        let text = dump(&mut p, &[0u8; 25]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("0000000 00"));
        assert_eq!(lines[0].matches(" 00").count(), 20);
        assert!(lines[1].starts_with("0000020"));
        assert_eq!(lines[2], "0000025");
    }

    #[test]
    fn hex_offsets() {
        let mut p = BufferPrinter::with_formats(OffsetFormat::Hex, ContentFormat::Hex);
        p.seek(0xABC);
        let text = dump(&mut p, &[0xFF]);
        assert_eq!(text, "00000ABC FF\n00000ABD\n");
    }

    #[test]
    fn position_survives_chunked_prints() {
        let mut p = BufferPrinter::with_formats(OffsetFormat::Decimal, ContentFormat::Hex);
        let first = dump(&mut p, &[1, 2]);
        let second = dump(&mut p, &[3]);
        assert!(first.ends_with("0000002\n"));
        assert!(second.starts_with("0000002 03"));
    }

    #[test]
    fn print_buffer_leaves_the_cursor_alone() {
        let mut rabu = RandomAccessBuffer::from_vec(b"AB".to_vec());
        assert!(rabu.seek(1));

        let mut p = BufferPrinter::new();
        let mut out = Vec::new();
        p.print_buffer(&rabu, &mut out).unwrap();

        assert_eq!(rabu.offset(), 1);
        assert_eq!(String::from_utf8(out).unwrap(), "0000000   B\n0000001\n");
    }

    #[test]
    fn unprintable_bytes_render_as_hex() {
        let mut p = BufferPrinter::new();
        let text = dump(&mut p, &[0x80, 0x1B, 0x7F]);
        assert_eq!(text, "0000000 080 ESC DEL\n0000003\n");
    }
}
