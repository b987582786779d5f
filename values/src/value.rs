use crate::number::{Int, Number};
use crate::object::{Array, Closure, Cons, ListIter, Record, Tuple, Variant};

/// A runtime value.
///
/// Scalars, strings and byte strings are stored inline (strings borrow from
/// the arena). Every other case is a reference to a heap object, whose address
/// is its identity.
#[derive(Clone, Copy)]
pub enum Value<'a> {
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
    Number(Number<'a>),
    Char(char),
    Str(&'a str),
    Bytes(&'a [u8]),
    Tuple(&'a Tuple<'a>),
    Array(&'a Array<'a>),
    /// `None` is the empty list.
    List(Option<&'a Cons<'a>>),
    Record(&'a Record<'a>),
    Variant(&'a Variant<'a>),
    Closure(&'a Closure<'a>),
}

// Values belong to a single-threaded arena.
static_assertions::assert_impl_all!(Value<'static>: Copy);
static_assertions::assert_not_impl_any!(Value<'static>: Send, Sync);

impl<'a> Value<'a> {
    pub const NIL: Self = Value::List(None);

    /// Exact integer `Number`.
    pub fn int(n: i64) -> Self {
        Value::Number(Number::Int(Int::Small(n)))
    }

    pub fn f64(x: f64) -> Self {
        Value::Number(Number::F64(x))
    }

    pub fn f32(x: f32) -> Self {
        Value::Number(Number::F32(x))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Value of a signed fixed-width integer or a small exact `Number`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::I8(n) => Some(n.into()),
            Value::I16(n) => Some(n.into()),
            Value::I32(n) => Some(n.into()),
            Value::I64(n) => Some(n),
            Value::Number(Number::Int(int)) => int.to_i64(),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number<'a>> {
        match *self {
            Value::Number(number) => Some(number),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match *self {
            Value::Char(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match *self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&'a Tuple<'a>> {
        match *self {
            Value::Tuple(tuple) => Some(tuple),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&'a Array<'a>> {
        match *self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Iterate the elements of a list value.
    pub fn as_list(&self) -> Option<ListIter<'a>> {
        match *self {
            Value::List(next) => Some(ListIter { next }),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&'a Record<'a>> {
        match *self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_variant(&self) -> Option<&'a Variant<'a>> {
        match *self {
            Value::Variant(variant) => Some(variant),
            _ => None,
        }
    }

    pub fn as_closure(&self) -> Option<&'a Closure<'a>> {
        match *self {
            Value::Closure(closure) => Some(closure),
            _ => None,
        }
    }
}
