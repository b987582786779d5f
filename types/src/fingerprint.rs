//! Deterministic fingerprints of declarations.
//!
//! A fingerprint only depends on the bytes fed to it, never on pointer values
//! or atom interning order, so the same declaration yields the same
//! [`ShapeId`](crate::ShapeId) in every execution of a program.

use core::hash::Hasher;

use rustc_hash::FxHasher;

use crate::core::traversal::{Walk, walk};
use crate::core::{Ty, TyKind};
use crate::decl::{RecordDecl, VariantDecl};

const KIND_PARAM: u8 = 0;
const KIND_SCALAR: u8 = 1;
const KIND_TUPLE: u8 = 2;
const KIND_ARRAY: u8 = 3;
const KIND_LIST: u8 = 4;
const KIND_NAMED: u8 = 5;
const KIND_FUNCTION: u8 = 6;

const DECL_RECORD: u8 = b'R';
const DECL_VARIANT: u8 = b'V';

/// Streaming fingerprint builder over [`FxHasher`].
#[derive(Default)]
pub struct Fingerprinter {
    hasher: FxHasher,
}

impl Fingerprinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_u8(&mut self, byte: u8) {
        self.hasher.write_u8(byte);
    }

    pub fn write_u64(&mut self, value: u64) {
        self.hasher.write_u64(value);
    }

    pub fn write_len(&mut self, len: usize) {
        self.write_u64(len as u64);
    }

    /// Length-prefixed, so `("ab", "c")` and `("a", "bc")` differ.
    pub fn write_str(&mut self, s: &str) {
        self.write_len(s.len());
        self.hasher.write(s.as_bytes());
    }

    /// Feed the structure of a type term in pre-order.
    pub fn write_ty(&mut self, ty: &Ty) {
        walk(ty, |node| {
            let kind = node.kind();
            match kind {
                TyKind::Param(index) => {
                    self.write_u8(KIND_PARAM);
                    self.write_u64(u64::from(*index));
                }
                TyKind::Scalar(scalar) => {
                    self.write_u8(KIND_SCALAR);
                    self.write_u8(*scalar as u8);
                }
                TyKind::Tuple(_) => self.write_u8(KIND_TUPLE),
                TyKind::Array(_) => self.write_u8(KIND_ARRAY),
                TyKind::List(_) => self.write_u8(KIND_LIST),
                TyKind::Named { name, .. } => {
                    self.write_u8(KIND_NAMED);
                    self.write_str(name);
                }
                TyKind::Function { .. } => self.write_u8(KIND_FUNCTION),
            }
            self.write_len(kind.child_count());
            Walk::Continue
        });
    }

    pub fn write_record(&mut self, decl: &RecordDecl) {
        self.write_u8(DECL_RECORD);
        self.write_str(decl.name());
        self.write_u64(u64::from(decl.param_count()));
        self.write_len(decl.fields().len());
        for field in decl.fields() {
            self.write_str(&field.name);
            self.write_u8(field.mutable as u8);
            self.write_ty(&field.ty);
        }
    }

    pub fn write_variant(&mut self, decl: &VariantDecl) {
        self.write_u8(DECL_VARIANT);
        self.write_str(decl.name());
        self.write_u64(u64::from(decl.param_count()));
        self.write_len(decl.cases().len());
        for case in decl.cases() {
            self.write_str(&case.name);
            self.write_len(case.payload.len());
            for ty in &case.payload {
                self.write_ty(ty);
            }
        }
    }

    pub fn finish(&self) -> u64 {
        self.hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ty;

    fn fingerprint_ty(ty: &Ty) -> u64 {
        let mut fp = Fingerprinter::new();
        fp.write_ty(ty);
        fp.finish()
    }

    #[test]
    fn test_structural() {
        assert_eq!(fingerprint_ty(&ty!(Array[Str])), fingerprint_ty(&ty!(Array[Str])));
        assert_ne!(fingerprint_ty(&ty!(Array[Str])), fingerprint_ty(&ty!(List[Str])));
        assert_ne!(
            fingerprint_ty(&ty!(Tuple(Tuple(I64), I64))),
            fingerprint_ty(&ty!(Tuple(Tuple(I64, I64))))
        );
    }

    #[test]
    fn test_str_boundaries() {
        let mut a = Fingerprinter::new();
        a.write_str("ab");
        a.write_str("c");
        let mut b = Fingerprinter::new();
        b.write_str("a");
        b.write_str("bc");
        assert_ne!(a.finish(), b.finish());
    }

    #[test]
    fn test_mutability_matters() {
        let mut a = Fingerprinter::new();
        a.write_record(&RecordDecl::new("R").field("x", ty!(I64)));
        let mut b = Fingerprinter::new();
        b.write_record(&RecordDecl::new("R").mutable_field("x", ty!(I64)));
        assert_ne!(a.finish(), b.finish());
    }
}
