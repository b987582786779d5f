//! Ombu runtime values.
//!
//! - [`Value`]: the closed set of runtime value shapes
//! - [`Heap`]: the arena that owns every compound object
//! - [`shape`]: the tag dispatcher shared by marshaling and hashing
//! - [`CodeTable`] / [`Closure`]: native code entries and captured environments
//! - [`Program`]: type metadata plus code table, as needed to rebuild values
//!
//! Compound values are references into the arena, so a value graph may share
//! substructure and contain cycles through mutable slots.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use ombu_values::{Heap, Value};
//!
//! let arena = Bump::new();
//! let heap = Heap::new(&arena);
//!
//! let shared = heap.array(&[Value::I64(1), Value::I64(2)]);
//! let pair = heap.tuple(&[shared, shared]);
//!
//! let Value::Tuple(tuple) = pair else { unreachable!() };
//! assert_eq!(tuple.get(0).and_then(|v| v.identity()), shared.identity());
//! ```

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

mod code;
mod debug;
mod eq;
mod error;
mod heap;
mod number;
mod object;
mod program;
pub mod shape;
mod value;

pub use code::{CodeEntry, CodeIndex, CodeTable, NativeCode};
pub use error::{CallError, CodeError, ValueError};
pub use heap::{Heap, Slots, Spine};
pub use number::{Int, Number, Ratio};
pub use object::{Array, Closure, Cons, ListIter, Record, Tuple, Variant};
pub use program::Program;
pub use shape::{Children, IntKind, ObjectId, ShapeDescriptor, ShapeTag};
pub use value::Value;
