use alloc::vec::Vec;

use crate::error::DecodeError;

/// Longest valid varint: ten groups of seven bits cover a `u64`.
const MAX_VARINT_LEN: usize = 10;

/// Append `n` as an unsigned LEB128 varint.
pub fn write_varint(out: &mut Vec<u8>, mut n: u64) {
    loop {
        let byte = (n & 0x7F) as u8;
        n >>= 7;
        if n == 0 {
            out.push(byte);
            break;
        }
        out.push(byte | 0x80);
    }
}

/// Forward-only reader over a byte buffer.
///
/// Offsets reported in errors are positions in the buffer the cursor was
/// created from, also for cursors returned by [`Cursor::split`].
#[derive(Debug, Clone)]
pub struct Cursor<'b> {
    bytes: &'b [u8],
    pos: usize,
}

impl<'b> Cursor<'b> {
    pub fn new(bytes: &'b [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The unread bytes, without consuming them.
    pub fn rest(&self) -> &'b [u8] {
        &self.bytes[self.pos..]
    }

    pub fn take(&mut self, len: usize) -> Result<&'b [u8], DecodeError> {
        if len > self.remaining() {
            return Err(DecodeError::UnexpectedEnd {
                offset: self.pos,
                needed: len,
            });
        }
        let bytes = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        self.read_array().map(u64::from_le_bytes)
    }

    pub fn read_varint(&mut self) -> Result<u64, DecodeError> {
        let start = self.pos;
        let mut value = 0u64;
        for i in 0..MAX_VARINT_LEN {
            let byte = self.read_u8()?;
            // The tenth group holds only the top bit of a u64.
            if i == MAX_VARINT_LEN - 1 && byte > 1 {
                return Err(DecodeError::InvalidVarint { offset: start });
            }
            value |= u64::from(byte & 0x7F) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(DecodeError::InvalidVarint { offset: start })
    }

    /// Take `len` bytes, where `len` was read off the wire.
    pub fn read_len(&mut self, len: u64) -> Result<&'b [u8], DecodeError> {
        let offset = self.pos;
        match usize::try_from(len) {
            Ok(len) => self.take(len),
            Err(_) => Err(DecodeError::UnexpectedEnd {
                offset,
                needed: usize::MAX,
            }),
        }
    }

    /// Split off the next `len` bytes into their own cursor and skip them here.
    pub fn split(&mut self, len: usize) -> Result<Cursor<'b>, DecodeError> {
        let start = self.pos;
        self.take(len)?;
        Ok(Cursor {
            bytes: &self.bytes[..start + len],
            pos: start,
        })
    }
}
