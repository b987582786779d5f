//! Record and variant declarations.
//!
//! A declaration is built with chained methods and then registered in a
//! [`TypeTable`](crate::TypeTable), which assigns it a [`ShapeId`] and wraps it
//! in a [`RecordShape`] or [`VariantShape`].

use alloc::vec::Vec;

use crate::core::{Ident, Ty, TyList};
use crate::table::ShapeId;

// ============================================================================
// Records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: Ident,
    pub ty: Ty,
    pub mutable: bool,
}

/// A record declaration: a name, a parameter count and ordered fields.
///
/// # Example
///
/// ```
/// use ombu_types::{ty, RecordDecl};
///
/// let decl = RecordDecl::new("Cell")
///     .params(1)
///     .mutable_field("value", ty!([a] => a))
///     .field("label", ty!(Str));
/// assert_eq!(decl.fields().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDecl {
    name: Ident,
    params: u16,
    fields: Vec<FieldDecl>,
}

impl RecordDecl {
    pub fn new(name: impl Into<Ident>) -> Self {
        Self {
            name: name.into(),
            params: 0,
            fields: Vec::new(),
        }
    }

    /// Set the number of type parameters (`'0` .. `'n-1`).
    pub fn params(mut self, count: u16) -> Self {
        self.params = count;
        self
    }

    pub fn field(self, name: impl Into<Ident>, ty: Ty) -> Self {
        self.push_field(name.into(), ty, false)
    }

    pub fn mutable_field(self, name: impl Into<Ident>, ty: Ty) -> Self {
        self.push_field(name.into(), ty, true)
    }

    fn push_field(mut self, name: Ident, ty: Ty, mutable: bool) -> Self {
        self.fields.push(FieldDecl { name, ty, mutable });
        self
    }

    pub fn name(&self) -> &Ident {
        &self.name
    }

    pub fn param_count(&self) -> u16 {
        self.params
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }
}

/// A registered record declaration.
#[derive(Debug, PartialEq, Eq)]
pub struct RecordShape {
    id: ShapeId,
    decl: RecordDecl,
}

impl RecordShape {
    pub(crate) fn new(id: ShapeId, decl: RecordDecl) -> Self {
        Self { id, decl }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn name(&self) -> &Ident {
        &self.decl.name
    }

    pub fn param_count(&self) -> u16 {
        self.decl.params
    }

    pub fn decl(&self) -> &RecordDecl {
        &self.decl
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.decl.fields
    }

    pub fn field(&self, index: usize) -> Option<&FieldDecl> {
        self.decl.fields.get(index)
    }

    /// Whether the field at `index` exists and was declared mutable.
    pub fn is_mutable(&self, index: usize) -> bool {
        self.field(index).is_some_and(|field| field.mutable)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.decl.fields.iter().position(|field| &*field.name == name)
    }
}

// ============================================================================
// Variants
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseDecl {
    pub name: Ident,
    pub payload: TyList,
}

/// A variant declaration: a name, a parameter count and ordered cases.
///
/// Cases are identified on the wire by their position, so reordering cases
/// produces a different [`ShapeId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDecl {
    name: Ident,
    params: u16,
    cases: Vec<CaseDecl>,
}

impl VariantDecl {
    pub fn new(name: impl Into<Ident>) -> Self {
        Self {
            name: name.into(),
            params: 0,
            cases: Vec::new(),
        }
    }

    pub fn params(mut self, count: u16) -> Self {
        self.params = count;
        self
    }

    pub fn case(mut self, name: impl Into<Ident>, payload: impl IntoIterator<Item = Ty>) -> Self {
        self.cases.push(CaseDecl {
            name: name.into(),
            payload: payload.into_iter().collect(),
        });
        self
    }

    pub fn name(&self) -> &Ident {
        &self.name
    }

    pub fn param_count(&self) -> u16 {
        self.params
    }

    pub fn cases(&self) -> &[CaseDecl] {
        &self.cases
    }
}

/// A registered variant declaration.
#[derive(Debug, PartialEq, Eq)]
pub struct VariantShape {
    id: ShapeId,
    decl: VariantDecl,
}

impl VariantShape {
    pub(crate) fn new(id: ShapeId, decl: VariantDecl) -> Self {
        Self { id, decl }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn name(&self) -> &Ident {
        &self.decl.name
    }

    pub fn param_count(&self) -> u16 {
        self.decl.params
    }

    pub fn decl(&self) -> &VariantDecl {
        &self.decl
    }

    pub fn cases(&self) -> &[CaseDecl] {
        &self.decl.cases
    }

    pub fn case(&self, index: usize) -> Option<&CaseDecl> {
        self.decl.cases.get(index)
    }

    pub fn case_index(&self, name: &str) -> Option<usize> {
        self.decl.cases.iter().position(|case| &*case.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ty;

    #[test]
    fn test_record_builder() {
        let decl = RecordDecl::new("Account")
            .field("id", ty!(U64))
            .mutable_field("balance", ty!(Number));
        let shape = RecordShape::new(ShapeId(7), decl);

        assert_eq!(&**shape.name(), "Account");
        assert_eq!(shape.field_index("balance"), Some(1));
        assert_eq!(shape.field_index("owner"), None);
        assert!(!shape.is_mutable(0));
        assert!(shape.is_mutable(1));
        assert!(!shape.is_mutable(2));
    }

    #[test]
    fn test_variant_builder() {
        let decl = VariantDecl::new("Option")
            .params(1)
            .case("None", [])
            .case("Some", [ty!([a] => a)]);
        let shape = VariantShape::new(ShapeId(1), decl);

        assert_eq!(shape.param_count(), 1);
        assert_eq!(shape.case_index("Some"), Some(1));
        assert!(shape.case(0).is_some_and(|case| case.payload.is_empty()));
        assert!(shape.case(2).is_none());
    }
}
