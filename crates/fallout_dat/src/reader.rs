//! Bounds-checked cursor over decompressed archive bytes
//!

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};

/// Little-endian cursor over an immutable byte buffer.
///
/// Every read advances the position by the consumed width and fails with
/// [`Error::UnexpectedEof`] when fewer bytes remain than requested; the
/// cursor never reads past the end of the buffer and never mutates it.
/// One `ByteReader` is threaded through all decode stages so that a single
/// position is the only record of how far the archive has been consumed.
#[derive(Debug)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Wrap a buffer, positioned at offset 0.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8]> {
        if needed > self.remaining() {
            return Err(Error::UnexpectedEof {
                offset: self.pos,
                needed,
                available: self.remaining(),
            });
        }

        let bytes = &self.buf[self.pos..self.pos + needed];
        self.pos += needed;
        Ok(bytes)
    }

    /// Read one byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read a little-endian u16.
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    /// Read a little-endian u32.
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    /// Read a little-endian i32.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    /// Borrow the next `count` bytes without copying them.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        self.take(count)
    }

    /// Advance past `count` bytes without inspecting them.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count).map(|_| ())
    }
}
