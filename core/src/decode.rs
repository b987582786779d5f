//! Bytes to value.
//!
//! Every compound object is allocated with placeholder slots and registered
//! under its object index before any of its children are decoded, so a
//! back-reference may point at an object that is still being filled in. That
//! is how shared and cyclic values are rebuilt.

use alloc::vec::Vec;

use ombu_values::{CodeIndex, Heap, Int, Number, Program, Slots, Spine, Value};

use crate::error::{DecodeError, HeaderFault, Mismatch, PayloadFault, ShapeKey};
use crate::options::DecodeOptions;
use crate::spine::Spines;
use crate::wire::{Cursor, Header, IntBytes, Token};

/// Decode a value that occupies all of `bytes`.
///
/// Strings and numbers are copied into `heap`, so the result does not borrow
/// from `bytes`. Records, variants and closures are resolved against
/// `program`.
pub fn unmarshal<'a>(
    program: &'a Program,
    heap: &Heap<'a>,
    bytes: &[u8],
) -> Result<Value<'a>, DecodeError> {
    unmarshal_with(&DecodeOptions::default(), program, heap, bytes)
}

/// [`unmarshal`] with explicit limits.
pub fn unmarshal_with<'a>(
    options: &DecodeOptions,
    program: &'a Program,
    heap: &Heap<'a>,
    bytes: &[u8],
) -> Result<Value<'a>, DecodeError> {
    let (value, consumed) = unmarshal_prefix(options, program, heap, bytes)?;
    if consumed < bytes.len() {
        return Err(DecodeError::TrailingBytes {
            offset: consumed,
            remaining: bytes.len() - consumed,
        });
    }
    Ok(value)
}

/// Decode the value at the start of `bytes` and return it with the number of
/// bytes it occupied. Anything after it is left alone.
pub fn unmarshal_prefix<'a>(
    options: &DecodeOptions,
    program: &'a Program,
    heap: &Heap<'a>,
    bytes: &[u8],
) -> Result<(Value<'a>, usize), DecodeError> {
    let result = decode(options, program, heap, bytes);
    match &result {
        Ok((_, consumed)) => tracing::debug!(bytes = consumed, "Unmarshaled value"),
        Err(err) => tracing::debug!(error = %err, "Unmarshal failed"),
    }
    result
}

fn decode<'a>(
    options: &DecodeOptions,
    program: &'a Program,
    heap: &Heap<'a>,
    bytes: &[u8],
) -> Result<(Value<'a>, usize), DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let mut cursor = Cursor::new(bytes);
    let header = Header::read(&mut cursor)?;
    let payload = cursor.split(header.payload_len)?;

    let mut decoder = Decoder {
        options,
        program,
        heap,
        cursor: payload,
        // Every object takes at least one byte.
        built: Vec::with_capacity(header.object_count.min(header.payload_len)),
        spines: Spines::default(),
        stack: Vec::new(),
    };
    let value = decoder.run()?;

    if !decoder.cursor.is_empty() {
        return Err(DecodeError::TrailingBytes {
            offset: decoder.cursor.offset(),
            remaining: decoder.cursor.remaining(),
        });
    }
    if decoder.built.len() != header.object_count {
        return Err(DecodeError::BadHeader(HeaderFault::ObjectCount {
            declared: header.object_count,
            actual: decoder.built.len(),
        }));
    }
    Ok((value, cursor.offset()))
}

/// A compound object whose children are still being decoded.
enum Frame<'a> {
    Slots {
        object: Value<'a>,
        slots: Slots<'a>,
        filled: usize,
    },
    Spine {
        spine: Spine<'a>,
        id: usize,
        filled: usize,
    },
}

/// What one token turned into.
enum Step<'a> {
    /// A value with nothing left to read.
    Done(Value<'a>),
    /// An object whose children follow.
    Open(Frame<'a>),
}

struct Decoder<'o, 'b, 'a> {
    options: &'o DecodeOptions,
    program: &'a Program,
    heap: &'o Heap<'a>,
    cursor: Cursor<'b>,
    /// Backpatch table: object index to object.
    built: Vec<Value<'a>>,
    spines: Spines,
    stack: Vec<Frame<'a>>,
}

impl<'o, 'b, 'a> Decoder<'o, 'b, 'a> {
    fn run(&mut self) -> Result<Value<'a>, DecodeError> {
        loop {
            let offset = self.cursor.offset();
            let token = Token::read(&mut self.cursor)?;
            tracing::trace!(offset, ?token, "Token");

            let mut value = match self.step(token, offset)? {
                Step::Done(value) => value,
                Step::Open(frame) => {
                    if self.stack.len() >= self.options.max_depth {
                        return Err(DecodeError::DepthExceeded {
                            limit: self.options.max_depth,
                            offset,
                        });
                    }
                    self.stack.push(frame);
                    continue;
                }
            };

            // Hand the value to its parent, closing every object it completes.
            loop {
                let Some(frame) = self.stack.last_mut() else {
                    return Ok(value);
                };
                match frame {
                    Frame::Slots {
                        object,
                        slots,
                        filled,
                    } => {
                        slots.set(*filled, value);
                        *filled += 1;
                        if *filled < slots.len() {
                            break;
                        }
                        value = *object;
                    }
                    Frame::Spine { spine, id, filled } => {
                        spine.set_head(*filled, value);
                        *filled += 1;
                        if *filled < spine.len() {
                            break;
                        }
                        let (spine, id) = (*spine, *id);
                        self.read_tail(spine, id)?;
                        value = spine.value();
                    }
                }
                self.stack.pop();
            }
        }
    }

    fn step(&mut self, token: Token<'_>, offset: usize) -> Result<Step<'a>, DecodeError> {
        let heap = self.heap;
        let value = match token {
            Token::Unit => Value::Unit,
            Token::Bool(b) => Value::Bool(b),
            Token::I8(n) => Value::I8(n),
            Token::I16(n) => Value::I16(n),
            Token::I32(n) => Value::I32(n),
            Token::I64(n) => Value::I64(n),
            Token::U8(n) => Value::U8(n),
            Token::U16(n) => Value::U16(n),
            Token::U32(n) => Value::U32(n),
            Token::U64(n) => Value::U64(n),
            Token::Int(int) => Value::Number(Number::Int(self.int(int))),
            Token::Ratio(numer, denom) => {
                let number = heap
                    .ratio(&numer.to_bigint(), &denom.to_bigint())
                    .map_err(|_| DecodeError::InvalidPayload {
                        offset,
                        fault: PayloadFault::ZeroDenominator,
                    })?;
                Value::Number(number)
            }
            Token::F32(x) => Value::f32(x),
            Token::F64(x) => Value::f64(x),
            Token::Char(c) => Value::Char(c),
            Token::Str(s) => heap.str(s),
            Token::Bytes(b) => heap.bytes(b),
            Token::Nil => Value::NIL,
            Token::BackRef(index) => self.resolve(index, offset)?,

            Token::Tuple(len) => {
                let (object, slots) = heap.provisional_tuple(len);
                return self.open(object, slots, offset);
            }
            Token::Array(len) => {
                let (object, slots) = heap.provisional_array(len);
                return self.open(object, slots, offset);
            }
            Token::List(cells) => {
                let spine = heap.provisional_spine(cells);
                let first = self.built.len();
                for index in 0..spine.len() {
                    let cell = spine.cell(index);
                    self.register(Value::List(cell), offset)?;
                }
                let id = self.spines.open(first, spine.len());
                return Ok(Step::Open(Frame::Spine {
                    spine,
                    id,
                    filled: 0,
                }));
            }
            Token::Record { shape, fields } => {
                let record = self
                    .program
                    .types
                    .record(shape)
                    .ok_or(DecodeError::UnknownShape {
                        shape: ShapeKey::Type(shape),
                        offset,
                    })?;
                if fields != record.fields().len() {
                    return Err(mismatch(
                        offset,
                        Mismatch::FieldCount {
                            shape,
                            expected: record.fields().len(),
                            found: fields,
                        },
                    ));
                }
                let (object, slots) = heap.provisional_record(record);
                return self.open(object, slots, offset);
            }
            Token::Variant {
                shape,
                case,
                payload,
            } => {
                let variant = self
                    .program
                    .types
                    .variant(shape)
                    .ok_or(DecodeError::UnknownShape {
                        shape: ShapeKey::Type(shape),
                        offset,
                    })?;
                let unknown_case = || mismatch(offset, Mismatch::UnknownCase { shape, case });
                let case = u32::try_from(case).map_err(|_| unknown_case())?;
                let decl = variant.case(case as usize).ok_or_else(unknown_case)?;
                if payload != decl.payload.len() {
                    return Err(mismatch(
                        offset,
                        Mismatch::PayloadCount {
                            shape,
                            case,
                            expected: decl.payload.len(),
                            found: payload,
                        },
                    ));
                }
                let (object, slots) = heap
                    .provisional_variant(variant, case)
                    .map_err(|_| unknown_case())?;
                return self.open(object, slots, offset);
            }
            Token::Closure {
                code,
                fingerprint,
                captures,
            } => {
                let unknown = DecodeError::UnknownShape {
                    shape: ShapeKey::Code {
                        index: code,
                        fingerprint,
                    },
                    offset,
                };
                let index = u32::try_from(code).map_err(|_| unknown.clone())?;
                let entry = self
                    .program
                    .code
                    .get(CodeIndex(index))
                    .filter(|entry| entry.fingerprint() == fingerprint)
                    .ok_or(unknown)?;
                let expected = usize::from(entry.captures());
                if captures != expected {
                    return Err(mismatch(
                        offset,
                        Mismatch::CaptureCount {
                            index,
                            expected,
                            found: captures,
                        },
                    ));
                }
                let (object, slots) = heap.provisional_closure(entry);
                return self.open(object, slots, offset);
            }
        };
        Ok(Step::Done(value))
    }

    fn int(&self, int: IntBytes<'_>) -> Int<'a> {
        self.heap.int_from_le_bytes(int.negative, int.magnitude)
    }

    /// Register a freshly allocated object and decide whether children follow.
    fn open(
        &mut self,
        object: Value<'a>,
        slots: Slots<'a>,
        offset: usize,
    ) -> Result<Step<'a>, DecodeError> {
        self.register(object, offset)?;
        if slots.is_empty() {
            return Ok(Step::Done(object));
        }
        Ok(Step::Open(Frame::Slots {
            object,
            slots,
            filled: 0,
        }))
    }

    fn register(&mut self, object: Value<'a>, offset: usize) -> Result<(), DecodeError> {
        if let Some(limit) = self.options.max_objects
            && self.built.len() >= limit
        {
            return Err(DecodeError::ObjectLimit { limit, offset });
        }
        self.built.push(object);
        Ok(())
    }

    fn resolve(&self, index: u64, offset: usize) -> Result<Value<'a>, DecodeError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.built.get(i).copied())
            .ok_or(DecodeError::InvalidBackReference {
                index,
                introduced: self.built.len(),
                offset,
            })
    }

    /// Read the token after the last head of a list and link the spine to it.
    fn read_tail(&mut self, spine: Spine<'a>, id: usize) -> Result<(), DecodeError> {
        let offset = self.cursor.offset();
        let tag = self.cursor.rest().first().copied().unwrap_or_default();
        let (tail, target) = match Token::read(&mut self.cursor)? {
            Token::Nil => (None, None),
            Token::BackRef(index) => match self.resolve(index, offset)? {
                Value::List(Some(cell)) => (Some(cell), Some(index)),
                _ => return Err(mismatch(offset, Mismatch::TailTarget { index })),
            },
            _ => return Err(mismatch(offset, Mismatch::ListTail { tag })),
        };
        self.spines
            .close(id, target)
            .map_err(|detail| mismatch(offset, detail))?;
        spine.link_tail(tail);
        Ok(())
    }
}

fn mismatch(offset: usize, detail: Mismatch) -> DecodeError {
    DecodeError::ShapeMismatch { offset, detail }
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;

    use super::*;
    use crate::test_utils::init_test_logging;

    #[test]
    fn test_tuple_containing_itself() {
        init_test_logging();
        let program = Program::default();
        let arena = Bump::new();
        let heap = Heap::new(&arena);

        let bytes = b"OMBU\x01\x05\x01\x10\x02\x17\x00\x00";
        let value = unmarshal(&program, &heap, bytes).unwrap();

        let tuple = value.as_tuple().unwrap();
        assert_eq!(tuple.get(0).and_then(|v| v.identity()), value.identity());
        assert!(matches!(tuple.get(1), Some(Value::Unit)));
    }
}
