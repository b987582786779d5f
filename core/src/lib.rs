//! Marshaling of Ombu values.
//!
//! [`marshal`] turns a [`Value`](ombu_values::Value) into bytes and
//! [`unmarshal`] rebuilds it inside a [`Heap`](ombu_values::Heap), resolving
//! records, variants and closures against a [`Program`](ombu_values::Program).
//! Objects reachable along more than one path are written once and referred
//! back to afterwards, so sharing and cycles survive the trip.
//!
//! ```
//! use ombu_core::{marshal, unmarshal};
//! use ombu_values::{Heap, Program, Value};
//! use bumpalo::Bump;
//!
//! let program = Program::default();
//! let arena = Bump::new();
//! let heap = Heap::new(&arena);
//!
//! let tail = heap.list(&[Value::I32(2), Value::I32(3)]);
//! let pair = heap.tuple(&[tail, tail]);
//!
//! let bytes = marshal(pair);
//! let back = unmarshal(&program, &heap, &bytes).unwrap();
//! assert_eq!(back, pair);
//!
//! let items = back.as_tuple().unwrap();
//! assert_eq!(items.get(0).unwrap().identity(), items.get(1).unwrap().identity());
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

mod decode;
mod encode;
mod error;
mod hash;
mod inspect;
mod options;
mod spine;
pub mod wire;

pub use decode::{unmarshal, unmarshal_prefix, unmarshal_with};
pub use encode::{marshal, marshal_into};
pub use error::{DecodeError, HashError, HeaderFault, Mismatch, PayloadFault, ShapeKey};
pub use hash::hash;
pub use inspect::{Dump, DumpLine, header, inspect, inspect_with};
pub use options::DecodeOptions;

pub use ombu_types;
pub use ombu_values;
