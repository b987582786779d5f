//! # Wire format
//!
//! An encoded value is a header followed by one token tree:
//!
//! ```text
//! "OMBU" [version] [varint:payload_len] [varint:object_count] [payload...]
//! ```
//!
//! Every token starts with a tag byte (see [`tag`]). Fixed-width integers are
//! little-endian; counts and indices are unsigned LEB128 varints. Compound
//! tokens are followed by their children in order:
//!
//! ```text
//! [TUPLE][varint:arity][child_1]...[child_n]
//! [LIST][varint:fresh_cells][head_1]...[head_n][tail]     tail = NIL | BACKREF
//! [RECORD][u64:shape_id][varint:fields][field_1]...
//! [VARIANT][u64:shape_id][varint:case][varint:payload][value_1]...
//! [CLOSURE][varint:code_index][u64:fingerprint][varint:captures][capture_1]...
//! [BACKREF][varint:object_index]
//! ```
//!
//! Compound objects are numbered in the order their tokens appear. The cells
//! of a `LIST` token take consecutive numbers before any of its heads.
//!
//! This format is only meant to be read back by a compatible build of the
//! same program.

mod cursor;
mod header;
mod token;

pub use cursor::{Cursor, write_varint};
pub use header::{Header, MAGIC, VERSION};
pub use token::{IntBytes, Token};

/// Tag bytes.
pub mod tag {
    pub const UNIT: u8 = 0x00;
    pub const BOOL: u8 = 0x01;
    pub const I8: u8 = 0x02;
    pub const I16: u8 = 0x03;
    pub const I32: u8 = 0x04;
    pub const I64: u8 = 0x05;
    pub const U8: u8 = 0x06;
    pub const U16: u8 = 0x07;
    pub const U32: u8 = 0x08;
    pub const U64: u8 = 0x09;
    pub const NUMBER: u8 = 0x0A;
    pub const CHAR: u8 = 0x0B;
    /// String with a u32 length.
    pub const STR: u8 = 0x0C;
    /// String with a u64 length.
    pub const STR64: u8 = 0x0D;
    pub const BYTES: u8 = 0x0E;
    pub const BYTES64: u8 = 0x0F;
    pub const TUPLE: u8 = 0x10;
    pub const ARRAY: u8 = 0x11;
    pub const LIST: u8 = 0x12;
    /// The empty list.
    pub const NIL: u8 = 0x13;
    pub const RECORD: u8 = 0x14;
    pub const VARIANT: u8 = 0x15;
    pub const CLOSURE: u8 = 0x16;
    pub const BACKREF: u8 = 0x17;

    /// Sub-tags following [`NUMBER`].
    pub mod number {
        pub const INT: u8 = 0;
        pub const RATIO: u8 = 1;
        pub const F32: u8 = 2;
        pub const F64: u8 = 3;
    }

    static_assertions::const_assert!(BACKREF == CLOSURE + 1);
    static_assertions::const_assert!(STR64 == STR + 1 && BYTES64 == BYTES + 1);
}
