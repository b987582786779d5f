//! The arena that owns compound objects.
//!
//! Two construction styles are offered:
//!
//! - direct constructors (`tuple`, `record`, ...) take every child up front
//! - provisional constructors (`provisional_*`) allocate an object with
//!   `Unit` placeholders and hand back a write handle, so the object can be
//!   referenced before its children exist

use core::cell::Cell;

use bumpalo::Bump;
use ombu_types::{RecordShape, VariantShape};

use crate::code::CodeEntry;
use crate::error::ValueError;
use crate::object::{Array, Closure, Cons, Record, Tuple, Variant};
use crate::value::Value;

/// Handle to the value arena.
#[derive(Clone, Copy)]
pub struct Heap<'a> {
    bump: &'a Bump,
}

impl<'a> Heap<'a> {
    pub fn new(bump: &'a Bump) -> Self {
        Self { bump }
    }

    pub fn bump(&self) -> &'a Bump {
        self.bump
    }

    fn slots(&self, values: &[Value<'a>]) -> &'a [Cell<Value<'a>>] {
        self.bump
            .alloc_slice_fill_iter(values.iter().copied().map(Cell::new))
    }

    fn placeholders(&self, len: usize) -> &'a [Cell<Value<'a>>] {
        self.bump.alloc_slice_fill_with(len, |_| Cell::new(Value::Unit))
    }

    // ========================================================================
    // Direct construction
    // ========================================================================

    pub fn str(&self, s: &str) -> Value<'a> {
        Value::Str(self.bump.alloc_str(s))
    }

    pub fn bytes(&self, bytes: &[u8]) -> Value<'a> {
        Value::Bytes(self.bump.alloc_slice_copy(bytes))
    }

    pub fn tuple(&self, items: &[Value<'a>]) -> Value<'a> {
        let slots = self.slots(items);
        Value::Tuple(self.bump.alloc(Tuple { slots }))
    }

    pub fn array(&self, items: &[Value<'a>]) -> Value<'a> {
        let slots = self.slots(items);
        Value::Array(self.bump.alloc(Array { slots }))
    }

    /// A list of fresh cells holding `items`.
    pub fn list(&self, items: &[Value<'a>]) -> Value<'a> {
        self.list_with_tail(items, None)
    }

    /// A list of fresh cells holding `items`, followed by an existing spine.
    pub fn list_with_tail(&self, items: &[Value<'a>], tail: Option<&'a Cons<'a>>) -> Value<'a> {
        if items.is_empty() {
            return Value::List(tail);
        }
        let spine = self.provisional_spine(items.len());
        for (index, item) in items.iter().enumerate() {
            spine.set_head(index, *item);
        }
        spine.cells[items.len() - 1].tail.set(tail);
        Value::List(spine.cells.first())
    }

    pub fn cons(&self, head: Value<'a>, tail: Option<&'a Cons<'a>>) -> &'a Cons<'a> {
        self.bump.alloc(Cons {
            head: Cell::new(head),
            tail: Cell::new(tail),
        })
    }

    pub fn record(
        &self,
        shape: &'a RecordShape,
        fields: &[Value<'a>],
    ) -> Result<Value<'a>, ValueError> {
        if fields.len() != shape.fields().len() {
            return Err(ValueError::Arity {
                name: shape.name().clone(),
                expected: shape.fields().len(),
                found: fields.len(),
            });
        }
        let slots = self.slots(fields);
        Ok(Value::Record(self.bump.alloc(Record { shape, slots })))
    }

    pub fn variant(
        &self,
        shape: &'a VariantShape,
        case: u32,
        payload: &[Value<'a>],
    ) -> Result<Value<'a>, ValueError> {
        let decl = shape
            .case(case as usize)
            .ok_or_else(|| ValueError::UnknownCase {
                shape: shape.name().clone(),
                case,
            })?;
        if payload.len() != decl.payload.len() {
            return Err(ValueError::Arity {
                name: decl.name.clone(),
                expected: decl.payload.len(),
                found: payload.len(),
            });
        }
        let slots = self.slots(payload);
        Ok(Value::Variant(self.bump.alloc(Variant { shape, case, slots })))
    }

    pub fn closure(
        &self,
        entry: &'a CodeEntry,
        captures: &[Value<'a>],
    ) -> Result<Value<'a>, ValueError> {
        if captures.len() != usize::from(entry.captures()) {
            return Err(ValueError::Arity {
                name: entry.name().clone(),
                expected: entry.captures().into(),
                found: captures.len(),
            });
        }
        let captures = self.slots(captures);
        Ok(Value::Closure(self.bump.alloc(Closure { entry, captures })))
    }

    // ========================================================================
    // Provisional construction
    // ========================================================================

    pub fn provisional_tuple(&self, len: usize) -> (Value<'a>, Slots<'a>) {
        let slots = self.placeholders(len);
        (Value::Tuple(self.bump.alloc(Tuple { slots })), Slots(slots))
    }

    pub fn provisional_array(&self, len: usize) -> (Value<'a>, Slots<'a>) {
        let slots = self.placeholders(len);
        (Value::Array(self.bump.alloc(Array { slots })), Slots(slots))
    }

    pub fn provisional_record(&self, shape: &'a RecordShape) -> (Value<'a>, Slots<'a>) {
        let slots = self.placeholders(shape.fields().len());
        let record = self.bump.alloc(Record { shape, slots });
        (Value::Record(record), Slots(slots))
    }

    pub fn provisional_variant(
        &self,
        shape: &'a VariantShape,
        case: u32,
    ) -> Result<(Value<'a>, Slots<'a>), ValueError> {
        let decl = shape
            .case(case as usize)
            .ok_or_else(|| ValueError::UnknownCase {
                shape: shape.name().clone(),
                case,
            })?;
        let slots = self.placeholders(decl.payload.len());
        let variant = self.bump.alloc(Variant { shape, case, slots });
        Ok((Value::Variant(variant), Slots(slots)))
    }

    pub fn provisional_closure(&self, entry: &'a CodeEntry) -> (Value<'a>, Slots<'a>) {
        let captures = self.placeholders(entry.captures().into());
        let closure = self.bump.alloc(Closure { entry, captures });
        (Value::Closure(closure), Slots(captures))
    }

    /// Allocate `len` linked cells with `Unit` heads and an empty tail.
    pub fn provisional_spine(&self, len: usize) -> Spine<'a> {
        let cells: &'a [Cons<'a>] = self.bump.alloc_slice_fill_with(len, |_| Cons {
            head: Cell::new(Value::Unit),
            tail: Cell::new(None),
        });
        for pair in cells.windows(2) {
            pair[0].tail.set(Some(&pair[1]));
        }
        Spine { cells }
    }
}

/// Write access to the slots of a provisionally allocated object.
#[derive(Clone, Copy)]
pub struct Slots<'a>(&'a [Cell<Value<'a>>]);

impl<'a> Slots<'a> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fill slot `index`. Out-of-range writes are ignored.
    pub fn set(&self, index: usize, value: Value<'a>) {
        if let Some(slot) = self.0.get(index) {
            slot.set(value);
        }
    }
}

/// Write access to a provisionally allocated run of list cells.
#[derive(Clone, Copy)]
pub struct Spine<'a> {
    cells: &'a [Cons<'a>],
}

impl<'a> Spine<'a> {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, index: usize) -> Option<&'a Cons<'a>> {
        self.cells.get(index)
    }

    /// The list value starting at the first cell.
    pub fn value(&self) -> Value<'a> {
        Value::List(self.cells.first())
    }

    pub fn set_head(&self, index: usize, value: Value<'a>) {
        if let Some(cell) = self.cells.get(index) {
            cell.head.set(value);
        }
    }

    /// Link the last cell to `tail`.
    ///
    /// Fails when `tail` leads back into this spine, since the resulting list
    /// would never end.
    pub fn set_tail(&self, tail: Option<&'a Cons<'a>>) -> Result<(), ValueError> {
        let Some(last) = self.cells.last() else {
            return Ok(());
        };
        if let Some(start) = tail
            && start.cells().any(|cell| core::ptr::eq(cell, last))
        {
            return Err(ValueError::CyclicSpine);
        }
        self.link_tail(tail);
        Ok(())
    }

    /// Link the last cell to `tail` without looking for a cycle.
    ///
    /// The caller must already know that `tail` does not lead back into this
    /// spine. A cyclic link leaves a list whose iteration never ends.
    pub fn link_tail(&self, tail: Option<&'a Cons<'a>>) {
        if let Some(last) = self.cells.last() {
            last.tail.set(tail);
        }
    }
}
