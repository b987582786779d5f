use alloc::vec::Vec;

use super::cursor::{Cursor, write_varint};
use crate::error::{DecodeError, HeaderFault};

pub const MAGIC: [u8; 4] = *b"OMBU";
pub const VERSION: u8 = 1;

/// The fixed preamble of an encoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: u8,
    /// Bytes of payload following the header.
    pub payload_len: usize,
    /// Number of object indices the payload introduces.
    pub object_count: usize,
    /// Size of the header itself.
    pub header_len: usize,
}

impl Header {
    /// Size of the whole encoding: header plus payload.
    pub fn total_len(&self) -> usize {
        self.header_len + self.payload_len
    }

    pub(crate) fn write(out: &mut Vec<u8>, payload_len: usize, object_count: usize) {
        out.extend_from_slice(&MAGIC);
        out.push(VERSION);
        write_varint(out, payload_len as u64);
        write_varint(out, object_count as u64);
    }

    /// Read a header. The payload itself is not checked.
    pub fn read(cursor: &mut Cursor<'_>) -> Result<Header, DecodeError> {
        let start = cursor.offset();

        // A short buffer that already disagrees with the magic is not truncated.
        let rest = cursor.rest();
        let prefix = rest.len().min(MAGIC.len());
        if rest[..prefix] != MAGIC[..prefix] {
            return Err(DecodeError::BadHeader(HeaderFault::Magic));
        }
        cursor.take(MAGIC.len())?;

        let version = cursor.read_u8()?;
        if version != VERSION {
            return Err(DecodeError::BadHeader(HeaderFault::Version(version)));
        }

        let payload_len = read_size(cursor)?;
        let object_count = read_size(cursor)?;

        Ok(Header {
            version,
            payload_len,
            object_count,
            header_len: cursor.offset() - start,
        })
    }
}

fn read_size(cursor: &mut Cursor<'_>) -> Result<usize, DecodeError> {
    let offset = cursor.offset();
    let value = cursor.read_varint()?;
    usize::try_from(value).map_err(|_| DecodeError::UnexpectedEnd {
        offset,
        needed: usize::MAX,
    })
}
