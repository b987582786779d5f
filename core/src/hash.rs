//! Structural hashing.
//!
//! The hash feeds each node's tag, scalar payload, declaration identity and
//! child count into an [`FxHasher`] in pre-order, so it only depends on the
//! structure of the value and is stable across executions.

use alloc::vec;
use core::hash::Hasher;

use hashbrown::HashSet;
use ombu_values::{Int, Number, ObjectId, Value};
use rustc_hash::{FxBuildHasher, FxHasher};

use crate::error::HashError;
use crate::wire::tag;

/// Hash a value structurally.
///
/// Structurally equal values hash equally, including `0.0` and `-0.0`.
/// Shared substructure is hashed once per path that reaches it. A value that
/// contains itself cannot be hashed and yields [`HashError::Cyclic`].
pub fn hash(value: Value<'_>) -> Result<u64, HashError> {
    let mut hasher = FxHasher::default();
    let mut path: HashSet<ObjectId, FxBuildHasher> = HashSet::default();
    let mut stack = vec![Task::Enter(value)];

    while let Some(task) = stack.pop() {
        let value = match task {
            Task::Enter(value) => value,
            Task::Leave(id) => {
                path.remove(&id);
                continue;
            }
        };

        write_node(&mut hasher, value);

        if let Some(id) = value.identity() {
            if !path.insert(id) {
                return Err(HashError::Cyclic);
            }
            let children = value.children();
            hasher.write_usize(children.len());

            stack.push(Task::Leave(id));
            let start = stack.len();
            stack.extend(children.map(Task::Enter));
            stack[start..].reverse();
        }
    }

    Ok(hasher.finish())
}

enum Task<'a> {
    Enter(Value<'a>),
    Leave(ObjectId),
}

/// Everything about a node except its children.
fn write_node(hasher: &mut FxHasher, value: Value<'_>) {
    match value {
        Value::Unit => hasher.write_u8(tag::UNIT),
        Value::Bool(b) => {
            hasher.write_u8(tag::BOOL);
            hasher.write_u8(b as u8);
        }
        Value::I8(n) => {
            hasher.write_u8(tag::I8);
            hasher.write_i8(n);
        }
        Value::I16(n) => {
            hasher.write_u8(tag::I16);
            hasher.write_i16(n);
        }
        Value::I32(n) => {
            hasher.write_u8(tag::I32);
            hasher.write_i32(n);
        }
        Value::I64(n) => {
            hasher.write_u8(tag::I64);
            hasher.write_i64(n);
        }
        Value::U8(n) => {
            hasher.write_u8(tag::U8);
            hasher.write_u8(n);
        }
        Value::U16(n) => {
            hasher.write_u8(tag::U16);
            hasher.write_u16(n);
        }
        Value::U32(n) => {
            hasher.write_u8(tag::U32);
            hasher.write_u32(n);
        }
        Value::U64(n) => {
            hasher.write_u8(tag::U64);
            hasher.write_u64(n);
        }
        Value::Number(number) => {
            hasher.write_u8(tag::NUMBER);
            write_number(hasher, number);
        }
        Value::Char(c) => {
            hasher.write_u8(tag::CHAR);
            hasher.write_u32(c.into());
        }
        Value::Str(s) => {
            hasher.write_u8(tag::STR);
            write_bytes(hasher, s.as_bytes());
        }
        Value::Bytes(b) => {
            hasher.write_u8(tag::BYTES);
            write_bytes(hasher, b);
        }
        Value::Tuple(_) => hasher.write_u8(tag::TUPLE),
        Value::Array(_) => hasher.write_u8(tag::ARRAY),
        Value::List(None) => hasher.write_u8(tag::NIL),
        Value::List(Some(_)) => hasher.write_u8(tag::LIST),
        Value::Record(record) => {
            hasher.write_u8(tag::RECORD);
            hasher.write_u64(record.shape().id().0);
        }
        Value::Variant(variant) => {
            hasher.write_u8(tag::VARIANT);
            hasher.write_u64(variant.shape().id().0);
            hasher.write_u32(variant.case());
        }
        Value::Closure(closure) => {
            let entry = closure.entry();
            hasher.write_u8(tag::CLOSURE);
            hasher.write_u32(entry.index().0);
            hasher.write_u64(entry.fingerprint());
        }
    }
}

fn write_bytes(hasher: &mut FxHasher, bytes: &[u8]) {
    hasher.write_usize(bytes.len());
    hasher.write(bytes);
}

fn write_number(hasher: &mut FxHasher, number: Number<'_>) {
    match number {
        Number::Int(int) => {
            hasher.write_u8(tag::number::INT);
            write_int(hasher, int);
        }
        Number::Ratio(ratio) => {
            hasher.write_u8(tag::number::RATIO);
            write_int(hasher, ratio.numer());
            write_int(hasher, ratio.denom());
        }
        Number::F32(x) => {
            hasher.write_u8(tag::number::F32);
            hasher.write_u32(canonical_f32(x).to_bits());
        }
        Number::F64(x) => {
            hasher.write_u8(tag::number::F64);
            hasher.write_u64(canonical_f64(x).to_bits());
        }
    }
}

fn write_int(hasher: &mut FxHasher, int: Int<'_>) {
    match int {
        Int::Small(n) => hasher.write_i64(n),
        Int::Big {
            negative,
            magnitude,
        } => {
            hasher.write_u8(negative as u8);
            hasher.write_usize(magnitude.len());
            for digit in magnitude {
                hasher.write_u32(*digit);
            }
        }
    }
}

fn canonical_f32(x: f32) -> f32 {
    if x.is_nan() {
        f32::NAN
    } else if x == 0.0 {
        0.0
    } else {
        x
    }
}

fn canonical_f64(x: f64) -> f64 {
    if x.is_nan() {
        f64::NAN
    } else if x == 0.0 {
        0.0
    } else {
        x
    }
}
