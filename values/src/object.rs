//! Heap objects referenced by compound values.
//!
//! Every object stores its slots as `Cell<Value>` so that it can be allocated
//! before its contents are known. Which slots are writable through the public
//! API depends on the object kind.

use core::cell::Cell;

use ombu_types::{Ident, RecordShape, VariantShape};

use crate::code::CodeEntry;
use crate::error::ValueError;
use crate::value::Value;

fn read<'a>(slots: &'a [Cell<Value<'a>>], index: usize) -> Option<Value<'a>> {
    slots.get(index).map(Cell::get)
}

// ============================================================================
// Tuple
// ============================================================================

/// Fixed-arity immutable tuple.
pub struct Tuple<'a> {
    pub(crate) slots: &'a [Cell<Value<'a>>],
}

impl<'a> Tuple<'a> {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value<'a>> {
        read(self.slots, index)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Value<'a>> + 'a {
        self.slots.iter().map(Cell::get)
    }
}

// ============================================================================
// Array
// ============================================================================

/// Fixed-length array with mutable slots.
pub struct Array<'a> {
    pub(crate) slots: &'a [Cell<Value<'a>>],
}

impl<'a> Array<'a> {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value<'a>> {
        read(self.slots, index)
    }

    pub fn set(&self, index: usize, value: Value<'a>) -> Result<(), ValueError> {
        let slot = self.slots.get(index).ok_or(ValueError::IndexOutOfBounds {
            index,
            len: self.slots.len(),
        })?;
        slot.set(value);
        Ok(())
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Value<'a>> + 'a {
        self.slots.iter().map(Cell::get)
    }
}

// ============================================================================
// List cells
// ============================================================================

/// One cell of a singly-linked list. The head is mutable, the tail is not.
pub struct Cons<'a> {
    pub(crate) head: Cell<Value<'a>>,
    pub(crate) tail: Cell<Option<&'a Cons<'a>>>,
}

impl<'a> Cons<'a> {
    pub fn head(&self) -> Value<'a> {
        self.head.get()
    }

    pub fn set_head(&self, value: Value<'a>) {
        self.head.set(value);
    }

    pub fn tail(&self) -> Option<&'a Cons<'a>> {
        self.tail.get()
    }

    /// Iterate the heads of this cell and every cell after it.
    pub fn iter(&'a self) -> ListIter<'a> {
        ListIter { next: Some(self) }
    }

    /// Iterate the cells of the spine starting at this one.
    pub fn cells(&'a self) -> impl Iterator<Item = &'a Cons<'a>> {
        core::iter::successors(Some(self), |cell| cell.tail())
    }
}

pub struct ListIter<'a> {
    pub(crate) next: Option<&'a Cons<'a>>,
}

impl<'a> Iterator for ListIter<'a> {
    type Item = Value<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.next?;
        self.next = cell.tail();
        Some(cell.head())
    }
}

// ============================================================================
// Record
// ============================================================================

/// An instance of a declared record. Only mutable fields can be written.
pub struct Record<'a> {
    pub(crate) shape: &'a RecordShape,
    pub(crate) slots: &'a [Cell<Value<'a>>],
}

impl<'a> Record<'a> {
    pub fn shape(&self) -> &'a RecordShape {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value<'a>> {
        read(self.slots, index)
    }

    pub fn get_named(&self, field: &str) -> Option<Value<'a>> {
        self.get(self.shape.field_index(field)?)
    }

    pub fn set(&self, index: usize, value: Value<'a>) -> Result<(), ValueError> {
        let (Some(decl), Some(slot)) = (self.shape.field(index), self.slots.get(index)) else {
            return Err(ValueError::IndexOutOfBounds {
                index,
                len: self.slots.len(),
            });
        };
        if !decl.mutable {
            return Err(ValueError::ImmutableField {
                shape: self.shape.name().clone(),
                field: decl.name.clone(),
            });
        }
        slot.set(value);
        Ok(())
    }

    pub fn set_named(&self, field: &str, value: Value<'a>) -> Result<(), ValueError> {
        let index = self
            .shape
            .field_index(field)
            .ok_or_else(|| ValueError::UnknownField {
                shape: self.shape.name().clone(),
                field: field.into(),
            })?;
        self.set(index, value)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Value<'a>> + 'a {
        self.slots.iter().map(Cell::get)
    }
}

// ============================================================================
// Variant
// ============================================================================

/// A case of a declared variant with its payload.
pub struct Variant<'a> {
    pub(crate) shape: &'a VariantShape,
    pub(crate) case: u32,
    pub(crate) slots: &'a [Cell<Value<'a>>],
}

impl<'a> Variant<'a> {
    pub fn shape(&self) -> &'a VariantShape {
        self.shape
    }

    pub fn case(&self) -> u32 {
        self.case
    }

    pub fn case_name(&self) -> Option<&'a Ident> {
        self.shape.case(self.case as usize).map(|case| &case.name)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value<'a>> {
        read(self.slots, index)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Value<'a>> + 'a {
        self.slots.iter().map(Cell::get)
    }
}

// ============================================================================
// Closure
// ============================================================================

/// A code entry paired with its captured environment.
pub struct Closure<'a> {
    pub(crate) entry: &'a CodeEntry,
    pub(crate) captures: &'a [Cell<Value<'a>>],
}

impl<'a> Closure<'a> {
    pub fn entry(&self) -> &'a CodeEntry {
        self.entry
    }

    pub fn capture(&self, index: usize) -> Option<Value<'a>> {
        read(self.captures, index)
    }

    pub fn captures(&self) -> impl ExactSizeIterator<Item = Value<'a>> + 'a {
        self.captures.iter().map(Cell::get)
    }
}
