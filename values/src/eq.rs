//! Structural equality.
//!
//! Two values are equal when they have the same shape and their children are
//! pairwise equal. Object graphs may be cyclic, so a pair of objects already
//! under comparison is assumed equal when it is reached again.

use alloc::vec;

use hashbrown::HashSet;

use crate::shape::ObjectId;
use crate::value::Value;

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(*self, *other)];
        let mut assumed: HashSet<(ObjectId, ObjectId)> = HashSet::new();

        while let Some((a, b)) = pending.pop() {
            if !same_node(&a, &b) {
                return false;
            }
            let (Some(left), Some(right)) = (a.identity(), b.identity()) else {
                continue;
            };
            if !assumed.insert((left, right)) {
                continue;
            }
            // `same_node` checked the child counts.
            pending.extend(a.children().zip(b.children()));
        }
        true
    }
}

/// Compare everything but the children.
fn same_node(a: &Value<'_>, b: &Value<'_>) -> bool {
    match (a, b) {
        (Value::Unit, Value::Unit) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::I8(x), Value::I8(y)) => x == y,
        (Value::I16(x), Value::I16(y)) => x == y,
        (Value::I32(x), Value::I32(y)) => x == y,
        (Value::I64(x), Value::I64(y)) => x == y,
        (Value::U8(x), Value::U8(y)) => x == y,
        (Value::U16(x), Value::U16(y)) => x == y,
        (Value::U32(x), Value::U32(y)) => x == y,
        (Value::U64(x), Value::U64(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::Char(x), Value::Char(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Bytes(x), Value::Bytes(y)) => x == y,
        (Value::Tuple(x), Value::Tuple(y)) => x.len() == y.len(),
        (Value::Array(x), Value::Array(y)) => x.len() == y.len(),
        (Value::List(x), Value::List(y)) => x.is_some() == y.is_some(),
        (Value::Record(x), Value::Record(y)) => {
            x.shape.id() == y.shape.id() && x.len() == y.len()
        }
        (Value::Variant(x), Value::Variant(y)) => {
            x.shape.id() == y.shape.id() && x.case == y.case && x.len() == y.len()
        }
        (Value::Closure(x), Value::Closure(y)) => {
            x.entry.index() == y.entry.index()
                && x.entry.fingerprint() == y.entry.fingerprint()
                && x.captures.len() == y.captures.len()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;
    use ombu_types::{RecordDecl, TypeTable, ty};

    use super::*;
    use crate::Heap;

    #[test]
    fn test_scalars() {
        assert_eq!(Value::I32(1), Value::I32(1));
        assert_ne!(Value::I32(1), Value::I64(1));
        assert_ne!(Value::U8(1), Value::I8(1));
        assert_ne!(Value::f64(f64::NAN), Value::f64(f64::NAN));
        assert_eq!(Value::f32(-0.0), Value::f32(0.0));
    }

    #[test]
    fn test_separate_objects_compare_structurally() {
        let arena = Bump::new();
        let heap = Heap::new(&arena);

        let a = heap.tuple(&[heap.str("x"), heap.list(&[Value::Bool(true)])]);
        let b = heap.tuple(&[heap.str("x"), heap.list(&[Value::Bool(true)])]);
        let c = heap.tuple(&[heap.str("x"), heap.list(&[])]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_cycles_terminate() {
        let mut table = TypeTable::new();
        let id = table
            .add_record(RecordDecl::new("Node").mutable_field("next", ty!(@"Node")))
            .unwrap();
        let shape = table.record(id).unwrap();

        let arena = Bump::new();
        let heap = Heap::new(&arena);

        // a -> a
        let a = heap.record(shape, &[Value::Unit]).unwrap();
        a.as_record().unwrap().set(0, a).unwrap();

        // b -> c -> b
        let b = heap.record(shape, &[Value::Unit]).unwrap();
        let c = heap.record(shape, &[b]).unwrap();
        b.as_record().unwrap().set(0, c).unwrap();

        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_ne!(a, heap.record(shape, &[Value::Unit]).unwrap());
    }
}
