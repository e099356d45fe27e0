//! Endian-aware integer I/O over the random-access buffer.
//!
//! [`RandomAccessData`] layers fixed-width integer encode/decode on top
//! of [`RandomAccessBuffer`], in a byte order fixed per instance. It
//! never touches the storage directly; every wide value is composed from
//! the facade's `get`/`read`/`write` primitives, one byte lane at a time.

use std::io::{Read, Write};
use std::ops::{Deref, DerefMut};

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::buffer::RandomAccessBuffer;
use crate::error::{RabuError, Result};

/// Byte order in word data I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

impl Endian {
    /// Assemble two byte lanes into an unsigned sixteen bit integer.
    pub fn uint16(self, m: &[u8]) -> u16 {
        match self {
            Endian::Little => LittleEndian::read_u16(m),
            Endian::Big => BigEndian::read_u16(m),
        }
    }

    /// Assemble four byte lanes into a signed thirty-two bit integer.
    pub fn sint32(self, m: &[u8]) -> i32 {
        match self {
            Endian::Little => LittleEndian::read_i32(m),
            Endian::Big => BigEndian::read_i32(m),
        }
    }

    /// Assemble eight byte lanes into a signed sixty-four bit integer.
    ///
    /// Lanes combine as unsigned bytes; the final value is interpreted
    /// as two's complement.
    pub fn sint64(self, m: &[u8]) -> i64 {
        match self {
            Endian::Little => LittleEndian::read_i64(m),
            Endian::Big => BigEndian::read_i64(m),
        }
    }

    fn put_u16(self, v: u16, m: &mut [u8]) {
        match self {
            Endian::Little => LittleEndian::write_u16(m, v),
            Endian::Big => BigEndian::write_u16(m, v),
        }
    }

    fn put_i32(self, v: i32, m: &mut [u8]) {
        match self {
            Endian::Little => LittleEndian::write_i32(m, v),
            Endian::Big => BigEndian::write_i32(m, v),
        }
    }

    fn put_i64(self, v: i64, m: &mut [u8]) {
        match self {
            Endian::Little => LittleEndian::write_i64(m, v),
            Endian::Big => BigEndian::write_i64(m, v),
        }
    }
}

/// Data copy over a [`RandomAccessBuffer`] with a fixed byte order for
/// multi-byte words.
///
/// Each width offers four access forms:
///
/// - `*_at(ofs)` — indexed decode out of the buffer.
/// - `*_from(reader)` — decode from a stream, tee-ing the raw bytes into
///   the buffer in on-stream order.
/// - `*_to(writer)` — decode at the cursor, forwarding the raw bytes to
///   a stream in stored order.
/// - `put_*(value, writer)` — encode to a stream.
///
/// Derefs to the underlying buffer for cursor and windowing operations.
#[derive(Debug, Clone)]
pub struct RandomAccessData {
    buffer: RandomAccessBuffer,
    endian: Endian,
}

impl RandomAccessData {
    /// An empty buffer with the given word order.
    pub fn new(endian: Endian) -> Self {
        RandomAccessData {
            buffer: RandomAccessBuffer::new(),
            endian,
        }
    }

    /// Layer a word order over an existing buffer (shared storage,
    /// window and cursor travel with it).
    pub fn over(endian: Endian, buffer: RandomAccessBuffer) -> Self {
        RandomAccessData { buffer, endian }
    }

    /// The word order this instance applies to every multi-byte access.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Give the wrapped buffer back.
    pub fn into_inner(self) -> RandomAccessBuffer {
        self.buffer
    }

    /// Pull exactly `N` bytes off a stream.
    fn take<const N: usize>(reader: &mut impl Read) -> Result<[u8; N]> {
        let mut m = [0u8; N];
        let mut got = 0;
        while got < N {
            let r = reader.read(&mut m[got..])?;
            if r == 0 {
                return Err(RabuError::UnexpectedEnd { needed: N, got });
            }
            got += r;
        }
        Ok(m)
    }

    /// Pull exactly `N` bytes out of the buffer at the cursor.
    fn drain<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut m = [0u8; N];
        for (got, lane) in m.iter_mut().enumerate() {
            *lane = self
                .buffer
                .read()
                .ok_or(RabuError::UnexpectedEnd { needed: N, got })?;
        }
        Ok(m)
    }

    /// Land raw lanes in the buffer at the cursor, preserving their
    /// order.
    fn store(&mut self, m: &[u8]) -> Result<()> {
        if self.buffer.write_all(m) {
            Ok(())
        } else {
            Err(RabuError::OutOfRange {
                offset: self.buffer.offset(),
                length: self.buffer.storage_length(),
            })
        }
    }

    /// Indexed data byte.
    ///
    /// # Errors
    ///
    /// Returns [`RabuError::OutOfRange`] when `ofs` is outside the
    /// combined bounds.
    pub fn uint8_at(&self, ofs: usize) -> Result<u8> {
        self.buffer.get(ofs)
    }

    /// Read one byte from the stream, tee it into the buffer, and return
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`RabuError::UnexpectedEnd`] when the stream is dry.
    pub fn uint8_from(&mut self, reader: &mut impl Read) -> Result<u8> {
        let m: [u8; 1] = Self::take(reader)?;
        self.store(&m)?;
        Ok(m[0])
    }

    /// Read one byte from the buffer, forward it to the stream, and
    /// return it.
    ///
    /// # Errors
    ///
    /// Returns [`RabuError::UnexpectedEnd`] when the buffer is dry.
    pub fn uint8_to(&mut self, writer: &mut impl Write) -> Result<u8> {
        let m: [u8; 1] = self.drain()?;
        writer.write_all(&m)?;
        Ok(m[0])
    }

    /// Write `v` to the stream as one unsigned byte. Returns the value.
    ///
    /// # Errors
    ///
    /// Returns [`RabuError::InvalidArgument`] when `v` does not fit
    /// eight bits.
    pub fn put_uint8(&self, v: u32, writer: &mut impl Write) -> Result<u8> {
        let v = u8::try_from(v)
            .map_err(|_| RabuError::InvalidArgument(format!("{v} does not fit in a u8")))?;
        writer.write_all(&[v])?;
        Ok(v)
    }

    /// Indexed unsigned sixteen bit integer.
    pub fn uint16_at(&self, ofs: usize) -> Result<u16> {
        let m = [self.buffer.get(ofs)?, self.buffer.get(ofs + 1)?];
        Ok(self.endian.uint16(&m))
    }

    /// Read two bytes from the stream, tee them into the buffer in
    /// on-stream order, and return the assembled value.
    pub fn uint16_from(&mut self, reader: &mut impl Read) -> Result<u16> {
        let m: [u8; 2] = Self::take(reader)?;
        self.store(&m)?;
        Ok(self.endian.uint16(&m))
    }

    /// Read two bytes from the buffer, forward them to the stream in
    /// stored order, and return the assembled value.
    pub fn uint16_to(&mut self, writer: &mut impl Write) -> Result<u16> {
        let m: [u8; 2] = self.drain()?;
        writer.write_all(&m)?;
        Ok(self.endian.uint16(&m))
    }

    /// Write `v` to the stream as an unsigned sixteen bit integer in the
    /// configured order. Returns the value.
    ///
    /// # Errors
    ///
    /// Returns [`RabuError::InvalidArgument`] when `v` does not fit
    /// sixteen bits.
    pub fn put_uint16(&self, v: u32, writer: &mut impl Write) -> Result<u16> {
        let v = u16::try_from(v)
            .map_err(|_| RabuError::InvalidArgument(format!("{v} does not fit in a u16")))?;
        let mut m = [0u8; 2];
        self.endian.put_u16(v, &mut m);
        writer.write_all(&m)?;
        Ok(v)
    }

    /// Indexed signed thirty-two bit integer.
    pub fn sint32_at(&self, ofs: usize) -> Result<i32> {
        let m = [
            self.buffer.get(ofs)?,
            self.buffer.get(ofs + 1)?,
            self.buffer.get(ofs + 2)?,
            self.buffer.get(ofs + 3)?,
        ];
        Ok(self.endian.sint32(&m))
    }

    /// Read four bytes from the stream, tee them into the buffer in
    /// on-stream order, and return the assembled value.
    pub fn sint32_from(&mut self, reader: &mut impl Read) -> Result<i32> {
        let m: [u8; 4] = Self::take(reader)?;
        self.store(&m)?;
        Ok(self.endian.sint32(&m))
    }

    /// Read four bytes from the buffer, forward them to the stream in
    /// stored order, and return the assembled value.
    pub fn sint32_to(&mut self, writer: &mut impl Write) -> Result<i32> {
        let m: [u8; 4] = self.drain()?;
        writer.write_all(&m)?;
        Ok(self.endian.sint32(&m))
    }

    /// Write `v` to the stream as a signed thirty-two bit integer in the
    /// configured order. Returns the value.
    pub fn put_sint32(&self, v: i32, writer: &mut impl Write) -> Result<i32> {
        let mut m = [0u8; 4];
        self.endian.put_i32(v, &mut m);
        writer.write_all(&m)?;
        Ok(v)
    }

    /// Indexed signed sixty-four bit integer.
    pub fn sint64_at(&self, ofs: usize) -> Result<i64> {
        let mut m = [0u8; 8];
        for (k, lane) in m.iter_mut().enumerate() {
            *lane = self.buffer.get(ofs + k)?;
        }
        Ok(self.endian.sint64(&m))
    }

    /// Read eight bytes from the stream, tee them into the buffer in
    /// on-stream order, and return the assembled value.
    pub fn sint64_from(&mut self, reader: &mut impl Read) -> Result<i64> {
        let m: [u8; 8] = Self::take(reader)?;
        self.store(&m)?;
        Ok(self.endian.sint64(&m))
    }

    /// Read eight bytes from the buffer, forward them to the stream in
    /// stored order, and return the assembled value.
    pub fn sint64_to(&mut self, writer: &mut impl Write) -> Result<i64> {
        let m: [u8; 8] = self.drain()?;
        writer.write_all(&m)?;
        Ok(self.endian.sint64(&m))
    }

    /// Write `v` to the stream as a signed sixty-four bit integer in the
    /// configured order. Returns the value.
    pub fn put_sint64(&self, v: i64, writer: &mut impl Write) -> Result<i64> {
        let mut m = [0u8; 8];
        self.endian.put_i64(v, &mut m);
        writer.write_all(&m)?;
        Ok(v)
    }
}

impl Deref for RandomAccessData {
    type Target = RandomAccessBuffer;

    fn deref(&self) -> &Self::Target {
        &self.buffer
    }
}

impl DerefMut for RandomAccessData {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buffer
    }
}
