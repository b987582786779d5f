//! Tag dispatch over runtime values.
//!
//! Marshaling, hashing, equality and debug printing all walk values through
//! this module instead of matching on [`Value`] themselves:
//!
//! - [`Value::tag`] classifies a value into exactly one [`ShapeTag`]
//! - [`Value::children`] yields its immediate children in natural order
//! - [`Value::descriptor`] names the declaration or code entry of a shaped object
//! - [`Value::identity`] gives compound values their heap identity

use core::cell::Cell;
use core::fmt;
use core::slice;

use ombu_types::{RecordShape, VariantShape};

use crate::code::CodeEntry;
use crate::object::Cons;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

impl IntKind {
    /// Width in bytes.
    pub fn width(self) -> usize {
        match self {
            IntKind::I8 | IntKind::U8 => 1,
            IntKind::I16 | IntKind::U16 => 2,
            IntKind::I32 | IntKind::U32 => 4,
            IntKind::I64 | IntKind::U64 => 8,
        }
    }

    pub fn is_signed(self) -> bool {
        matches!(self, IntKind::I8 | IntKind::I16 | IntKind::I32 | IntKind::I64)
    }
}

/// The case of the value union a runtime value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeTag {
    Unit,
    Bool,
    Int(IntKind),
    Number,
    Char,
    Str,
    Bytes,
    Tuple,
    Array,
    List,
    Record,
    Variant,
    Closure,
}

impl ShapeTag {
    pub fn name(self) -> &'static str {
        match self {
            ShapeTag::Unit => "Unit",
            ShapeTag::Bool => "Bool",
            ShapeTag::Int(IntKind::I8) => "I8",
            ShapeTag::Int(IntKind::I16) => "I16",
            ShapeTag::Int(IntKind::I32) => "I32",
            ShapeTag::Int(IntKind::I64) => "I64",
            ShapeTag::Int(IntKind::U8) => "U8",
            ShapeTag::Int(IntKind::U16) => "U16",
            ShapeTag::Int(IntKind::U32) => "U32",
            ShapeTag::Int(IntKind::U64) => "U64",
            ShapeTag::Number => "Number",
            ShapeTag::Char => "Char",
            ShapeTag::Str => "Str",
            ShapeTag::Bytes => "Bytes",
            ShapeTag::Tuple => "Tuple",
            ShapeTag::Array => "Array",
            ShapeTag::List => "List",
            ShapeTag::Record => "Record",
            ShapeTag::Variant => "Variant",
            ShapeTag::Closure => "Closure",
        }
    }
}

impl fmt::Display for ShapeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declaration or code entry of a shaped object.
#[derive(Debug, Clone, Copy)]
pub enum ShapeDescriptor<'a> {
    Record(&'a RecordShape),
    Variant { shape: &'a VariantShape, case: u32 },
    Closure(&'a CodeEntry),
}

/// Heap identity of a compound value: the address of its object.
///
/// Only meaningful while the object's arena is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

impl ObjectId {
    fn of<T>(object: &T) -> Self {
        ObjectId(object as *const T as usize)
    }
}

impl Cons<'_> {
    /// Identity of this cell, the same as the list value starting here.
    pub fn id(&self) -> ObjectId {
        ObjectId::of(self)
    }
}

impl<'a> Value<'a> {
    /// Classify the value.
    pub fn tag(&self) -> ShapeTag {
        match self {
            Value::Unit => ShapeTag::Unit,
            Value::Bool(_) => ShapeTag::Bool,
            Value::I8(_) => ShapeTag::Int(IntKind::I8),
            Value::I16(_) => ShapeTag::Int(IntKind::I16),
            Value::I32(_) => ShapeTag::Int(IntKind::I32),
            Value::I64(_) => ShapeTag::Int(IntKind::I64),
            Value::U8(_) => ShapeTag::Int(IntKind::U8),
            Value::U16(_) => ShapeTag::Int(IntKind::U16),
            Value::U32(_) => ShapeTag::Int(IntKind::U32),
            Value::U64(_) => ShapeTag::Int(IntKind::U64),
            Value::Number(_) => ShapeTag::Number,
            Value::Char(_) => ShapeTag::Char,
            Value::Str(_) => ShapeTag::Str,
            Value::Bytes(_) => ShapeTag::Bytes,
            Value::Tuple(_) => ShapeTag::Tuple,
            Value::Array(_) => ShapeTag::Array,
            Value::List(_) => ShapeTag::List,
            Value::Record(_) => ShapeTag::Record,
            Value::Variant(_) => ShapeTag::Variant,
            Value::Closure(_) => ShapeTag::Closure,
        }
    }

    /// Immediate children in natural order.
    ///
    /// A non-empty list has two children: the head and the rest of the list.
    pub fn children(&self) -> Children<'a> {
        match *self {
            Value::Tuple(tuple) => Children::Slots(tuple.slots.iter()),
            Value::Array(array) => Children::Slots(array.slots.iter()),
            Value::Record(record) => Children::Slots(record.slots.iter()),
            Value::Variant(variant) => Children::Slots(variant.slots.iter()),
            Value::Closure(closure) => Children::Slots(closure.captures.iter()),
            Value::List(Some(cell)) => Children::Cons(cell, 0),
            _ => Children::Empty,
        }
    }

    pub fn descriptor(&self) -> Option<ShapeDescriptor<'a>> {
        match *self {
            Value::Record(record) => Some(ShapeDescriptor::Record(record.shape)),
            Value::Variant(variant) => Some(ShapeDescriptor::Variant {
                shape: variant.shape,
                case: variant.case,
            }),
            Value::Closure(closure) => Some(ShapeDescriptor::Closure(closure.entry)),
            _ => None,
        }
    }

    /// Heap identity, or `None` for values encoded by value.
    pub fn identity(&self) -> Option<ObjectId> {
        match *self {
            Value::Tuple(tuple) => Some(ObjectId::of(tuple)),
            Value::Array(array) => Some(ObjectId::of(array)),
            Value::List(Some(cell)) => Some(ObjectId::of(cell)),
            Value::Record(record) => Some(ObjectId::of(record)),
            Value::Variant(variant) => Some(ObjectId::of(variant)),
            Value::Closure(closure) => Some(ObjectId::of(closure)),
            _ => None,
        }
    }

    pub fn is_compound(&self) -> bool {
        self.identity().is_some()
    }
}

/// Iterator over the children of a value.
pub enum Children<'a> {
    Empty,
    Slots(slice::Iter<'a, Cell<Value<'a>>>),
    Cons(&'a Cons<'a>, u8),
}

impl<'a> Iterator for Children<'a> {
    type Item = Value<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Children::Empty => None,
            Children::Slots(iter) => iter.next().map(Cell::get),
            Children::Cons(cell, pos) => {
                let value = match *pos {
                    0 => cell.head(),
                    1 => Value::List(cell.tail()),
                    _ => return None,
                };
                *pos += 1;
                Some(value)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = match self {
            Children::Empty => 0,
            Children::Slots(iter) => iter.len(),
            Children::Cons(_, pos) => 2usize.saturating_sub(usize::from(*pos)),
        };
        (len, Some(len))
    }
}

impl ExactSizeIterator for Children<'_> {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use bumpalo::Bump;

    use super::*;
    use crate::Heap;

    #[test]
    fn test_tags() {
        assert_eq!(Value::Unit.tag(), ShapeTag::Unit);
        assert_eq!(Value::U16(3).tag(), ShapeTag::Int(IntKind::U16));
        assert_eq!(Value::int(3).tag(), ShapeTag::Number);
        assert_eq!(Value::NIL.tag(), ShapeTag::List);
        assert!(!Value::NIL.is_compound());
        assert_eq!(ShapeTag::Int(IntKind::I32).to_string(), "I32");
    }

    #[test]
    fn test_list_children() {
        let arena = Bump::new();
        let heap = Heap::new(&arena);
        let list = heap.list(&[Value::Char('a'), Value::Char('b')]);

        let children: Vec<_> = list.children().collect();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].as_char(), Some('a'));
        assert_eq!(children[1].tag(), ShapeTag::List);
        assert_eq!(children[1].children().len(), 2);
    }

    #[test]
    fn test_identity() {
        let arena = Bump::new();
        let heap = Heap::new(&arena);
        let a = heap.tuple(&[]);
        let b = heap.tuple(&[]);

        assert_eq!(a.identity(), a.identity());
        assert_ne!(a.identity(), b.identity());
        assert_eq!(heap.str("x").identity(), None);
    }
}
