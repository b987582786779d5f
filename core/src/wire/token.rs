use num_bigint::{BigInt, Sign};
use ombu_types::ShapeId;

use super::cursor::Cursor;
use super::tag;
use crate::error::{DecodeError, Mismatch, PayloadFault};

/// Sign and little-endian magnitude of an encoded integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntBytes<'b> {
    pub negative: bool,
    pub magnitude: &'b [u8],
}

impl IntBytes<'_> {
    pub fn is_zero(&self) -> bool {
        self.magnitude.iter().all(|byte| *byte == 0)
    }

    pub fn to_bigint(&self) -> BigInt {
        let sign = if self.negative { Sign::Minus } else { Sign::Plus };
        BigInt::from_bytes_le(sign, self.magnitude)
    }
}

/// One token with its scalar payload validated and its counts checked
/// against the bytes that remain.
///
/// Children of compound tokens follow in the stream and are not read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'b> {
    Unit,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Int(IntBytes<'b>),
    Ratio(IntBytes<'b>, IntBytes<'b>),
    F32(f32),
    F64(f64),
    Char(char),
    Str(&'b str),
    Bytes(&'b [u8]),
    Tuple(usize),
    Array(usize),
    /// Number of fresh cells; the heads and a tail token follow.
    List(usize),
    Nil,
    Record {
        shape: ShapeId,
        fields: usize,
    },
    Variant {
        shape: ShapeId,
        case: u64,
        payload: usize,
    },
    Closure {
        code: u64,
        fingerprint: u64,
        captures: usize,
    },
    BackRef(u64),
}

impl<'b> Token<'b> {
    /// Read the next token.
    pub fn read(cursor: &mut Cursor<'b>) -> Result<Self, DecodeError> {
        let offset = cursor.offset();
        let byte = cursor.read_u8()?;
        let token = match byte {
            tag::UNIT => Token::Unit,
            tag::BOOL => {
                let offset = cursor.offset();
                match cursor.read_u8()? {
                    0 => Token::Bool(false),
                    1 => Token::Bool(true),
                    other => {
                        return Err(DecodeError::InvalidPayload {
                            offset,
                            fault: PayloadFault::Bool(other),
                        });
                    }
                }
            }
            tag::I8 => Token::I8(i8::from_le_bytes(cursor.read_array()?)),
            tag::I16 => Token::I16(i16::from_le_bytes(cursor.read_array()?)),
            tag::I32 => Token::I32(i32::from_le_bytes(cursor.read_array()?)),
            tag::I64 => Token::I64(i64::from_le_bytes(cursor.read_array()?)),
            tag::U8 => Token::U8(cursor.read_u8()?),
            tag::U16 => Token::U16(u16::from_le_bytes(cursor.read_array()?)),
            tag::U32 => Token::U32(u32::from_le_bytes(cursor.read_array()?)),
            tag::U64 => Token::U64(cursor.read_u64()?),
            tag::NUMBER => read_number(cursor)?,
            tag::CHAR => {
                let offset = cursor.offset();
                let code = u32::from_le_bytes(cursor.read_array()?);
                let c = char::from_u32(code).ok_or(DecodeError::InvalidPayload {
                    offset,
                    fault: PayloadFault::Char(code),
                })?;
                Token::Char(c)
            }
            tag::STR | tag::STR64 => {
                let len = read_length(cursor, byte == tag::STR64)?;
                let offset = cursor.offset();
                let bytes = cursor.read_len(len)?;
                let s = core::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidPayload {
                    offset,
                    fault: PayloadFault::Utf8,
                })?;
                Token::Str(s)
            }
            tag::BYTES | tag::BYTES64 => {
                let len = read_length(cursor, byte == tag::BYTES64)?;
                Token::Bytes(cursor.read_len(len)?)
            }
            tag::TUPLE => Token::Tuple(read_count(cursor, 0)?),
            tag::ARRAY => Token::Array(read_count(cursor, 0)?),
            tag::LIST => {
                let count_offset = cursor.offset();
                // One tail token follows the heads.
                let cells = read_count(cursor, 1)?;
                if cells == 0 {
                    return Err(DecodeError::ShapeMismatch {
                        offset: count_offset,
                        detail: Mismatch::EmptySpine,
                    });
                }
                Token::List(cells)
            }
            tag::NIL => Token::Nil,
            tag::RECORD => {
                let shape = ShapeId(cursor.read_u64()?);
                let fields = read_count(cursor, 0)?;
                Token::Record { shape, fields }
            }
            tag::VARIANT => {
                let shape = ShapeId(cursor.read_u64()?);
                let case = cursor.read_varint()?;
                let payload = read_count(cursor, 0)?;
                Token::Variant {
                    shape,
                    case,
                    payload,
                }
            }
            tag::CLOSURE => {
                let code = cursor.read_varint()?;
                let fingerprint = cursor.read_u64()?;
                let captures = read_count(cursor, 0)?;
                Token::Closure {
                    code,
                    fingerprint,
                    captures,
                }
            }
            tag::BACKREF => Token::BackRef(cursor.read_varint()?),
            _ => {
                return Err(DecodeError::UnrecognizedTag { tag: byte, offset });
            }
        };
        Ok(token)
    }

    /// Number of tokens that follow as children.
    pub fn children(&self) -> usize {
        match *self {
            Token::Tuple(n) | Token::Array(n) => n,
            Token::List(cells) => cells + 1,
            Token::Record { fields, .. } => fields,
            Token::Variant { payload, .. } => payload,
            Token::Closure { captures, .. } => captures,
            _ => 0,
        }
    }

    /// Number of object indices this token introduces.
    pub fn introduces(&self) -> usize {
        match *self {
            Token::Tuple(_)
            | Token::Array(_)
            | Token::Record { .. }
            | Token::Variant { .. }
            | Token::Closure { .. } => 1,
            Token::List(cells) => cells,
            _ => 0,
        }
    }
}

fn read_number<'b>(cursor: &mut Cursor<'b>) -> Result<Token<'b>, DecodeError> {
    let offset = cursor.offset();
    let token = match cursor.read_u8()? {
        tag::number::INT => Token::Int(read_int(cursor)?),
        tag::number::RATIO => {
            let numer = read_int(cursor)?;
            let offset = cursor.offset();
            let denom = read_int(cursor)?;
            if denom.is_zero() {
                return Err(DecodeError::InvalidPayload {
                    offset,
                    fault: PayloadFault::ZeroDenominator,
                });
            }
            Token::Ratio(numer, denom)
        }
        tag::number::F32 => Token::F32(f32::from_bits(u32::from_le_bytes(cursor.read_array()?))),
        tag::number::F64 => Token::F64(f64::from_bits(cursor.read_u64()?)),
        sub => return Err(DecodeError::UnrecognizedTag { tag: sub, offset }),
    };
    Ok(token)
}

fn read_int<'b>(cursor: &mut Cursor<'b>) -> Result<IntBytes<'b>, DecodeError> {
    let offset = cursor.offset();
    let negative = match cursor.read_u8()? {
        0 => false,
        1 => true,
        other => {
            return Err(DecodeError::InvalidPayload {
                offset,
                fault: PayloadFault::Sign(other),
            });
        }
    };
    let len = cursor.read_varint()?;
    let magnitude = cursor.read_len(len)?;
    Ok(IntBytes {
        negative,
        magnitude,
    })
}

fn read_length(cursor: &mut Cursor<'_>, wide: bool) -> Result<u64, DecodeError> {
    if wide {
        cursor.read_u64()
    } else {
        Ok(u32::from_le_bytes(cursor.read_array()?).into())
    }
}

/// Read a child count. Every child takes at least one byte, so a count larger
/// than the remaining input is rejected before anything is allocated.
fn read_count(cursor: &mut Cursor<'_>, extra: u64) -> Result<usize, DecodeError> {
    let count = cursor.read_varint()?;
    let needed = count.saturating_add(extra);
    if needed > cursor.remaining() as u64 {
        return Err(DecodeError::UnexpectedEnd {
            offset: cursor.offset(),
            needed: usize::try_from(needed).unwrap_or(usize::MAX),
        });
    }
    // Fits: bounded by `remaining`.
    Ok(count as usize)
}
