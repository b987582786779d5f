use core::fmt;

use ombu_types::ShapeId;

/// Why an encoded value could not be decoded.
///
/// Offsets are byte positions in the buffer passed to the decoder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("input is empty")]
    EmptyInput,

    #[error("unexpected end of input at offset {offset}: {needed} byte(s) needed")]
    UnexpectedEnd { offset: usize, needed: usize },

    #[error("unrecognized tag 0x{tag:02x} at offset {offset}")]
    UnrecognizedTag { tag: u8, offset: usize },

    #[error("unknown {shape} at offset {offset}")]
    UnknownShape { shape: ShapeKey, offset: usize },

    #[error(
        "back-reference to object #{index} at offset {offset}, \
         but only {introduced} object(s) were introduced"
    )]
    InvalidBackReference {
        index: u64,
        introduced: usize,
        offset: usize,
    },

    #[error("bad header: {0}")]
    BadHeader(HeaderFault),

    #[error("malformed varint at offset {offset}")]
    InvalidVarint { offset: usize },

    #[error("invalid payload at offset {offset}: {fault}")]
    InvalidPayload { offset: usize, fault: PayloadFault },

    #[error("shape mismatch at offset {offset}: {detail}")]
    ShapeMismatch { offset: usize, detail: Mismatch },

    #[error("nesting depth exceeds the limit of {limit} at offset {offset}")]
    DepthExceeded { limit: usize, offset: usize },

    #[error("more than {limit} objects at offset {offset}")]
    ObjectLimit { limit: usize, offset: usize },

    #[error("{remaining} trailing byte(s) at offset {offset}")]
    TrailingBytes { offset: usize, remaining: usize },
}

/// A record/variant declaration or a code entry the program does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKey {
    Type(ShapeId),
    Code { index: u64, fingerprint: u64 },
}

impl fmt::Display for ShapeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKey::Type(id) => write!(f, "type {id}"),
            ShapeKey::Code { index, fingerprint } => {
                write!(f, "code entry {index} (fingerprint {fingerprint:016x})")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HeaderFault {
    #[error("missing magic bytes")]
    Magic,

    #[error("unsupported version {0}")]
    Version(u8),

    #[error("declares {declared} object(s), but the payload introduces {actual}")]
    ObjectCount { declared: usize, actual: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PayloadFault {
    #[error("boolean byte {0} is neither 0 nor 1")]
    Bool(u8),

    #[error("sign byte {0} is neither 0 nor 1")]
    Sign(u8),

    #[error("0x{0:x} is not a Unicode scalar value")]
    Char(u32),

    #[error("string is not valid UTF-8")]
    Utf8,

    #[error("rational with a zero denominator")]
    ZeroDenominator,
}

/// How a compound token disagrees with the program's declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Mismatch {
    #[error("record {shape} has {expected} field(s), found {found}")]
    FieldCount {
        shape: ShapeId,
        expected: usize,
        found: usize,
    },

    #[error("variant {shape} has no case {case}")]
    UnknownCase { shape: ShapeId, case: u64 },

    #[error("case {case} of variant {shape} carries {expected} value(s), found {found}")]
    PayloadCount {
        shape: ShapeId,
        case: u32,
        expected: usize,
        found: usize,
    },

    #[error("code entry {index} captures {expected} value(s), found {found}")]
    CaptureCount {
        index: u32,
        expected: usize,
        found: usize,
    },

    #[error("list without cells")]
    EmptySpine,

    #[error("list tail must be nil or a back-reference, found tag 0x{tag:02x}")]
    ListTail { tag: u8 },

    #[error("list tail refers to object #{index}, which is not a list cell")]
    TailTarget { index: u64 },

    #[error("list tail leads back into the list")]
    CyclicSpine,
}

/// Why a value could not be hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    #[error("value contains a cycle")]
    Cyclic,
}
