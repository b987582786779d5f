//! Ombu - marshaling of runtime values
//!
//! # Overview
//!
//! Ombu turns a graph of runtime values into bytes and back. Values may share
//! substructure or contain cycles; both survive the round trip because every
//! compound object is written once and referred back to afterwards.
//!
//! Records, variants and closures are written by identity, not by content:
//! a record carries the fingerprint of its declaration and a closure the
//! index and signature of its native code. Decoding resolves them against a
//! [`Program`], so a payload can only be read back by a build of the program
//! that wrote it.
//!
//! # Quick Start
//!
//! ```
//! use bumpalo::Bump;
//! use ombu::{Heap, Program, RecordDecl, TypeTable, Value, marshal, ty, unmarshal};
//!
//! let mut types = TypeTable::new();
//! types.add_record(
//!     RecordDecl::new("Account")
//!         .field("owner", ty!(Str))
//!         .mutable_field("balance", ty!(Number)),
//! )?;
//! let program = Program::new(types, Default::default());
//!
//! let arena = Bump::new();
//! let heap = Heap::new(&arena);
//! let shape = program.types.record_named("Account").unwrap();
//! let account = heap.record(shape, &[heap.str("ada"), Value::int(10)])?;
//!
//! let bytes = marshal(account);
//! let back = unmarshal(&program, &heap, &bytes)?;
//! assert_eq!(back, account);
//! # Ok::<(), ombu::Error>(())
//! ```
//!
//! # Closures
//!
//! Native functions are registered in a [`CodeTable`]; a closure pairs one of
//! them with captured values:
//!
//! ```
//! use bumpalo::Bump;
//! use ombu::{CallError, CodeTable, Heap, Program, Value, marshal, unmarshal};
//!
//! fn add<'a>(
//!     _heap: &Heap<'a>,
//!     captures: &[Value<'a>],
//!     args: &[Value<'a>],
//! ) -> Result<Value<'a>, CallError> {
//!     let (Some(a), Some(b)) = (captures[0].as_i64(), args[0].as_i64()) else {
//!         return Err(CallError::Type {
//!             expected: ombu::ShapeTag::Number,
//!             found: args[0].tag(),
//!         });
//!     };
//!     Ok(Value::int(a + b))
//! }
//!
//! let mut code = CodeTable::new();
//! code.register("add", 1, 1, add)?;
//! let program = Program::new(Default::default(), code);
//!
//! let arena = Bump::new();
//! let heap = Heap::new(&arena);
//! let entry = program.code.named("add").unwrap();
//! let add40 = heap.closure(entry, &[Value::int(40)])?;
//!
//! let back = unmarshal(&program, &heap, &marshal(add40))?;
//! let result = back.as_closure().unwrap().call(&heap, &[Value::int(2)])?;
//! assert_eq!(result.as_i64(), Some(42));
//! # Ok::<(), ombu::Error>(())
//! ```

mod error;
pub use error::{Error, Result};

// Re-export the engine
pub use ombu_core::{
    DecodeError, DecodeOptions, Dump, DumpLine, HashError, HeaderFault, Mismatch, PayloadFault,
    ShapeKey, hash, header, inspect, inspect_with, marshal, marshal_into, unmarshal,
    unmarshal_prefix, unmarshal_with, wire,
};

// Re-export type metadata
pub use ombu_types::{
    self as types, CaseDecl, FieldDecl, RecordDecl, RecordShape, Shape, ShapeId, Ty, TyKind,
    TypeError, TypeTable, VariantDecl, VariantShape, ty,
};

// Re-export the value model
pub use ombu_values::{
    self as values, CallError, CodeEntry, CodeError, CodeIndex, CodeTable, Heap, NativeCode,
    Number, ObjectId, Program, ShapeDescriptor, ShapeTag, Value, ValueError,
};
