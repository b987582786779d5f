//! Human-readable listing of an encoded value.
//!
//! Inspection reads the token structure without any program metadata: shape
//! ids and code indices are printed, not resolved. Structural problems such
//! as truncation, bad tags, dangling back-references and list tails that do
//! not end are still reported.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use num_bigint::BigInt;

use crate::error::{DecodeError, HeaderFault, Mismatch};
use crate::options::DecodeOptions;
use crate::spine::Spines;
use crate::wire::{Cursor, Header, IntBytes, Token};

/// The decoded token listing of one encoded value.
#[derive(Debug, Clone, PartialEq)]
pub struct Dump {
    pub header: Header,
    pub lines: Vec<DumpLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpLine {
    /// Offset of the token in the input.
    pub offset: usize,
    pub depth: usize,
    pub text: String,
}

impl fmt::Display for Dump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ombu v{}: {} payload byte(s), {} object(s)",
            self.header.version, self.header.payload_len, self.header.object_count
        )?;
        for line in &self.lines {
            writeln!(f, "{:04x}  {:indent$}{}", line.offset, "", line.text, indent = line.depth * 2)?;
        }
        Ok(())
    }
}

/// Read only the header of an encoded value.
pub fn header(bytes: &[u8]) -> Result<Header, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }
    Header::read(&mut Cursor::new(bytes))
}

/// List the tokens of an encoded value.
pub fn inspect(bytes: &[u8]) -> Result<Dump, DecodeError> {
    inspect_with(&DecodeOptions::default(), bytes)
}

pub fn inspect_with(options: &DecodeOptions, bytes: &[u8]) -> Result<Dump, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }
    let mut cursor = Cursor::new(bytes);
    let header = Header::read(&mut cursor)?;
    let mut payload = cursor.split(header.payload_len)?;

    let mut lines = Vec::new();
    let mut introduced = 0usize;
    let mut spines = Spines::default();
    // Tokens still expected at each open level, and the spine of a list level,
    // whose last token is its tail.
    let mut pending: Vec<(usize, Option<usize>)> = Vec::new();

    loop {
        let offset = payload.offset();
        let token = Token::read(&mut payload)?;
        let depth = pending.len();

        let closing = match pending.last() {
            Some(&(1, Some(spine))) => Some(spine),
            _ => None,
        };
        if closing.is_some() && !matches!(token, Token::Nil | Token::BackRef(_)) {
            let tag = bytes[offset];
            return Err(DecodeError::ShapeMismatch {
                offset,
                detail: Mismatch::ListTail { tag },
            });
        }
        if let Token::BackRef(index) = token
            && index >= introduced as u64
        {
            return Err(DecodeError::InvalidBackReference {
                index,
                introduced,
                offset,
            });
        }
        if let Some(spine) = closing {
            let target = match token {
                Token::BackRef(index) => Some(index),
                _ => None,
            };
            spines
                .close(spine, target)
                .map_err(|detail| DecodeError::ShapeMismatch { offset, detail })?;
        }

        lines.push(DumpLine {
            offset,
            depth,
            text: describe(&token, introduced),
        });
        let first = introduced;
        introduced += token.introduces();
        if let Some(limit) = options.max_objects
            && introduced > limit
        {
            return Err(DecodeError::ObjectLimit { limit, offset });
        }

        if token.children() > 0 {
            if pending.len() >= options.max_depth {
                return Err(DecodeError::DepthExceeded {
                    limit: options.max_depth,
                    offset,
                });
            }
            let spine = match token {
                Token::List(cells) => Some(spines.open(first, cells)),
                _ => None,
            };
            pending.push((token.children(), spine));
            continue;
        }

        // Close every level this token completes.
        loop {
            let Some((remaining, _)) = pending.last_mut() else {
                break;
            };
            *remaining -= 1;
            if *remaining > 0 {
                break;
            }
            pending.pop();
        }
        if pending.is_empty() {
            break;
        }
    }

    if !payload.is_empty() {
        return Err(DecodeError::TrailingBytes {
            offset: payload.offset(),
            remaining: payload.remaining(),
        });
    }
    if !cursor.is_empty() {
        return Err(DecodeError::TrailingBytes {
            offset: cursor.offset(),
            remaining: cursor.remaining(),
        });
    }
    if introduced != header.object_count {
        return Err(DecodeError::BadHeader(HeaderFault::ObjectCount {
            declared: header.object_count,
            actual: introduced,
        }));
    }
    Ok(Dump { header, lines })
}

fn describe(token: &Token<'_>, next: usize) -> String {
    match *token {
        Token::Unit => "unit".into(),
        Token::Bool(b) => format!("bool {b}"),
        Token::I8(n) => format!("i8 {n}"),
        Token::I16(n) => format!("i16 {n}"),
        Token::I32(n) => format!("i32 {n}"),
        Token::I64(n) => format!("i64 {n}"),
        Token::U8(n) => format!("u8 {n}"),
        Token::U16(n) => format!("u16 {n}"),
        Token::U32(n) => format!("u32 {n}"),
        Token::U64(n) => format!("u64 {n}"),
        Token::Int(int) => format!("int {}", int_text(int)),
        Token::Ratio(numer, denom) => format!("ratio {}/{}", int_text(numer), int_text(denom)),
        Token::F32(x) => format!("f32 {x:?}"),
        Token::F64(x) => format!("f64 {x:?}"),
        Token::Char(c) => format!("char {c:?}"),
        Token::Str(s) => format!("str {s:?}"),
        Token::Bytes(b) => format!("bytes b\"{}\"", b.escape_ascii()),
        Token::Tuple(len) => format!("tuple #{next} len {len}"),
        Token::Array(len) => format!("array #{next} len {len}"),
        Token::List(1) => format!("list #{next} len 1"),
        Token::List(cells) => format!("list #{next}..#{} len {cells}", next + cells - 1),
        Token::Nil => "nil".into(),
        Token::Record { shape, fields } => format!("record {shape} #{next} fields {fields}"),
        Token::Variant {
            shape,
            case,
            payload,
        } => format!("variant {shape} case {case} #{next} payload {payload}"),
        Token::Closure {
            code,
            fingerprint,
            captures,
        } => format!("closure code {code} ({fingerprint:016x}) #{next} captures {captures}"),
        Token::BackRef(index) => format!("ref #{index}"),
    }
}

fn int_text(int: IntBytes<'_>) -> BigInt {
    int.to_bigint()
}
