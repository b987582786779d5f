//! Core type system components.
//!
//! - [`Ty`] and [`TyNode`]: type handles and their underlying nodes
//! - [`TyKind`]: the different kinds of types (scalars, tuples, named, ...)
//! - [`TyFlags`]: cached type properties for efficient queries
//!
//! See the [`traversal`] submodule for walking type trees without recursion.

mod flags;
mod kind;
pub mod traversal;
mod ty;

pub use flags::TyFlags;
pub use kind::{Scalar, TyKind};
pub use ty::{Ident, Ty, TyList, TyNode, ty_list};
