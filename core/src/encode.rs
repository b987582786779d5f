//! Value to bytes.
//!
//! The encoder walks the value graph once in pre-order with an explicit task
//! stack. Each compound object gets the next object index the first time it is
//! reached; reaching it again emits a back-reference instead of its contents.

use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use ombu_values::{Cons, Int, Number, ObjectId, Value};
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;

use crate::wire::{Header, tag, write_varint};

/// Encode `value` into a new buffer.
///
/// # Example
///
/// ```
/// use bumpalo::Bump;
/// use ombu_core::marshal;
/// use ombu_values::{Heap, Value};
///
/// let arena = Bump::new();
/// let heap = Heap::new(&arena);
/// let bytes = marshal(heap.tuple(&[Value::Bool(true), heap.str("hi")]));
/// assert!(bytes.starts_with(b"OMBU"));
/// ```
pub fn marshal(value: Value<'_>) -> Vec<u8> {
    let mut out = Vec::new();
    marshal_into(value, &mut out);
    out
}

/// Append the encoding of `value` to `out`.
pub fn marshal_into(value: Value<'_>, out: &mut Vec<u8>) {
    let mut encoder = Encoder::default();
    encoder.run(value);

    let objects = encoder.seen.len();
    Header::write(out, encoder.payload.len(), objects);
    out.extend_from_slice(&encoder.payload);

    tracing::debug!(objects, bytes = encoder.payload.len(), "Marshaled value");
}

enum Task<'a> {
    Visit(Value<'a>),
    /// The tail token closing a run of fresh list cells.
    Tail(Option<&'a Cons<'a>>),
}

#[derive(Default)]
struct Encoder {
    payload: Vec<u8>,
    seen: HashMap<ObjectId, u64, FxBuildHasher>,
}

impl Encoder {
    fn run<'a>(&mut self, root: Value<'a>) {
        let mut stack = vec![Task::Visit(root)];

        while let Some(task) = stack.pop() {
            match task {
                Task::Visit(value) => self.visit(value, &mut stack),
                Task::Tail(None) => self.payload.push(tag::NIL),
                Task::Tail(Some(cell)) => {
                    // The run of fresh cells stopped here because it was seen.
                    let index = self.seen.get(&cell.id()).copied();
                    debug_assert!(index.is_some(), "list tail was not introduced");
                    self.backref(index.unwrap_or_default());
                }
            }
        }
    }

    /// Assign the next object index, or return the existing one.
    fn introduce(&mut self, id: ObjectId) -> Result<(), u64> {
        let next = self.seen.len() as u64;
        match self.seen.entry(id) {
            Entry::Occupied(entry) => Err(*entry.get()),
            Entry::Vacant(entry) => {
                entry.insert(next);
                Ok(())
            }
        }
    }

    fn backref(&mut self, index: u64) {
        self.payload.push(tag::BACKREF);
        write_varint(&mut self.payload, index);
    }

    fn visit<'a>(&mut self, value: Value<'a>, stack: &mut Vec<Task<'a>>) {
        if let Some(id) = value.identity()
            && let Err(index) = self.introduce(id)
        {
            self.backref(index);
            return;
        }
        if let Value::List(Some(first)) = value {
            self.visit_spine(first, stack);
            return;
        }

        let out = &mut self.payload;
        match value {
            Value::Unit => out.push(tag::UNIT),
            Value::Bool(b) => out.extend_from_slice(&[tag::BOOL, b as u8]),
            Value::I8(n) => scalar(out, tag::I8, &n.to_le_bytes()),
            Value::I16(n) => scalar(out, tag::I16, &n.to_le_bytes()),
            Value::I32(n) => scalar(out, tag::I32, &n.to_le_bytes()),
            Value::I64(n) => scalar(out, tag::I64, &n.to_le_bytes()),
            Value::U8(n) => scalar(out, tag::U8, &[n]),
            Value::U16(n) => scalar(out, tag::U16, &n.to_le_bytes()),
            Value::U32(n) => scalar(out, tag::U32, &n.to_le_bytes()),
            Value::U64(n) => scalar(out, tag::U64, &n.to_le_bytes()),
            Value::Number(number) => write_number(out, number),
            Value::Char(c) => scalar(out, tag::CHAR, &u32::from(c).to_le_bytes()),
            Value::Str(s) => write_blob(out, tag::STR, tag::STR64, s.as_bytes()),
            Value::Bytes(b) => write_blob(out, tag::BYTES, tag::BYTES64, b),
            Value::Tuple(tuple) => {
                out.push(tag::TUPLE);
                write_varint(out, tuple.len() as u64);
                push_children(value, stack);
            }
            Value::Array(array) => {
                out.push(tag::ARRAY);
                write_varint(out, array.len() as u64);
                push_children(value, stack);
            }
            // Non-empty lists were handled above.
            Value::List(_) => out.push(tag::NIL),
            Value::Record(record) => {
                out.push(tag::RECORD);
                out.extend_from_slice(&record.shape().id().0.to_le_bytes());
                write_varint(out, record.len() as u64);
                push_children(value, stack);
            }
            Value::Variant(variant) => {
                out.push(tag::VARIANT);
                out.extend_from_slice(&variant.shape().id().0.to_le_bytes());
                write_varint(out, variant.case().into());
                write_varint(out, variant.len() as u64);
                push_children(value, stack);
            }
            Value::Closure(closure) => {
                let entry = closure.entry();
                out.push(tag::CLOSURE);
                write_varint(out, entry.index().0.into());
                out.extend_from_slice(&entry.fingerprint().to_le_bytes());
                write_varint(out, closure.captures().len() as u64);
                push_children(value, stack);
            }
        }
    }

    /// Introduce every cell up to the first one already seen, then queue the
    /// heads followed by the tail token.
    fn visit_spine<'a>(&mut self, first: &'a Cons<'a>, stack: &mut Vec<Task<'a>>) {
        let mut heads: SmallVec<[Value<'a>; 8]> = SmallVec::new();
        let mut tail = first.tail();
        heads.push(first.head());

        while let Some(cell) = tail {
            if self.introduce(cell.id()).is_err() {
                break;
            }
            heads.push(cell.head());
            tail = cell.tail();
        }

        self.payload.push(tag::LIST);
        write_varint(&mut self.payload, heads.len() as u64);

        stack.push(Task::Tail(tail));
        stack.extend(heads.into_iter().rev().map(Task::Visit));
    }
}

fn push_children<'a>(value: Value<'a>, stack: &mut Vec<Task<'a>>) {
    let start = stack.len();
    stack.extend(value.children().map(Task::Visit));
    stack[start..].reverse();
}

fn scalar(out: &mut Vec<u8>, tag: u8, bytes: &[u8]) {
    out.push(tag);
    out.extend_from_slice(bytes);
}

fn write_blob(out: &mut Vec<u8>, narrow: u8, wide: u8, bytes: &[u8]) {
    match u32::try_from(bytes.len()) {
        Ok(len) => scalar(out, narrow, &len.to_le_bytes()),
        Err(_) => scalar(out, wide, &(bytes.len() as u64).to_le_bytes()),
    }
    out.extend_from_slice(bytes);
}

fn write_number(out: &mut Vec<u8>, number: Number<'_>) {
    out.push(tag::NUMBER);
    match number {
        Number::Int(int) => {
            out.push(tag::number::INT);
            write_int(out, int);
        }
        Number::Ratio(ratio) => {
            out.push(tag::number::RATIO);
            write_int(out, ratio.numer());
            write_int(out, ratio.denom());
        }
        Number::F32(x) => scalar(out, tag::number::F32, &x.to_bits().to_le_bytes()),
        Number::F64(x) => scalar(out, tag::number::F64, &x.to_bits().to_le_bytes()),
    }
}

fn write_int(out: &mut Vec<u8>, int: Int<'_>) {
    let magnitude = int.magnitude_le_bytes();
    out.push(int.is_negative() as u8);
    write_varint(out, magnitude.len() as u64);
    out.extend_from_slice(&magnitude);
}
