//! Forward-only reader over an in-memory ASKM buffer.
//!
//! Every integer in the format is one little-endian `i32` word. The cursor
//! never seeks backward; each operation either consumes exactly the bytes
//! it asks for or fails without moving.

use crate::error::AskmError;

pub const WORD: usize = 4;

pub struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// Borrow the next `n` bytes and advance past them.
    fn take(&mut self, n: usize, field: &'static str) -> Result<&'a [u8], AskmError> {
        if n > self.remaining() {
            return Err(AskmError::Truncated {
                field,
                offset: self.offset,
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.bytes[self.offset..self.offset + n];
        self.offset += n;
        Ok(slice)
    }

    /// Read `N` consecutive words, in stream order.
    pub fn read_ints<const N: usize>(&mut self, field: &'static str) -> Result<[i32; N], AskmError> {
        let raw = self.take(N * WORD, field)?;
        let mut out = [0i32; N];
        for (value, chunk) in out.iter_mut().zip(raw.chunks_exact(WORD)) {
            *value = i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(out)
    }

    pub fn read_int(&mut self, field: &'static str) -> Result<i32, AskmError> {
        let [value] = self.read_ints::<1>(field)?;
        Ok(value)
    }

    /// Read a length word that must not be negative.
    pub fn read_len(&mut self, field: &'static str) -> Result<usize, AskmError> {
        let offset = self.offset;
        let value = self.read_int(field)?;
        usize::try_from(value).map_err(|_| AskmError::NegativeLength {
            field,
            offset,
            value,
        })
    }

    pub fn read_string(&mut self, length: usize, field: &'static str) -> Result<String, AskmError> {
        let offset = self.offset;
        let raw = self.take(length, field)?;
        let text = std::str::from_utf8(raw).map_err(|source| AskmError::InvalidEncoding {
            field,
            offset,
            source,
        })?;
        Ok(text.to_owned())
    }

    pub fn skip(&mut self, byte_count: usize, field: &'static str) -> Result<(), AskmError> {
        self.take(byte_count, field)?;
        Ok(())
    }
}
