//! Ombu type metadata.
//!
//! This crate describes the shapes of user-defined records and variants so
//! that a runtime value can be reconstructed from its structural identity:
//!
//! - [`Ty`] / [`TyKind`]: type terms used in field and payload declarations
//! - [`RecordDecl`] / [`VariantDecl`]: declarations built with chained methods
//! - [`TypeTable`]: the registry mapping a [`ShapeId`] to its shape
//!
//! # Example
//!
//! ```
//! use ombu_types::{ty, RecordDecl, TypeTable};
//!
//! let mut table = TypeTable::new();
//! let id = table
//!     .add_record(
//!         RecordDecl::new("Point")
//!             .field("x", ty!(I64))
//!             .field("y", ty!(I64))
//!             .mutable_field("label", ty!(Str)),
//!     )
//!     .unwrap();
//!
//! let point = table.record(id).unwrap();
//! assert_eq!(point.fields().len(), 3);
//! assert!(point.is_mutable(2));
//! ```

#![no_std]
extern crate alloc;

pub mod core;
mod decl;
mod error;
mod fingerprint;
mod macros;
mod table;

pub use crate::core::{Ident, Scalar, Ty, TyFlags, TyKind, TyList, TyNode, ty_list};
pub use decl::{CaseDecl, FieldDecl, RecordDecl, RecordShape, VariantDecl, VariantShape};
pub use error::TypeError;
pub use fingerprint::Fingerprinter;
pub use table::{Shape, ShapeId, TypeTable};
