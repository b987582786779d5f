//! The registry of declared records and variants.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::{HashMap, HashSet};

use crate::core::traversal::{Walk, walk};
use crate::core::{Ident, Ty, TyFlags, TyKind};
use crate::decl::{RecordDecl, RecordShape, VariantDecl, VariantShape};
use crate::error::TypeError;
use crate::fingerprint::Fingerprinter;

/// Structural identity of a registered declaration.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u64);

impl fmt::Debug for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShapeId({:016x})", self.0)
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// A registered declaration of either kind.
#[derive(Debug, Clone, Copy)]
pub enum Shape<'t> {
    Record(&'t RecordShape),
    Variant(&'t VariantShape),
}

impl<'t> Shape<'t> {
    pub fn id(self) -> ShapeId {
        match self {
            Shape::Record(shape) => shape.id(),
            Shape::Variant(shape) => shape.id(),
        }
    }

    pub fn name(self) -> &'t Ident {
        match self {
            Shape::Record(shape) => shape.name(),
            Shape::Variant(shape) => shape.name(),
        }
    }

    pub fn param_count(self) -> u16 {
        match self {
            Shape::Record(shape) => shape.param_count(),
            Shape::Variant(shape) => shape.param_count(),
        }
    }
}

/// Maps [`ShapeId`]s and names to registered declarations.
///
/// Records and variants share one namespace. Declarations may refer to types
/// registered later; call [`TypeTable::validate`] once everything is added.
#[derive(Debug, Default)]
pub struct TypeTable {
    records: HashMap<ShapeId, RecordShape>,
    variants: HashMap<ShapeId, VariantShape>,
    names: HashMap<Ident, ShapeId>,
    order: Vec<ShapeId>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_record(&mut self, decl: RecordDecl) -> Result<ShapeId, TypeError> {
        self.check_name(decl.name())?;

        {
            let mut seen = HashSet::new();
            for field in decl.fields() {
                if !seen.insert(&field.name) {
                    return Err(TypeError::DuplicateField {
                        shape: decl.name().clone(),
                        field: field.name.clone(),
                    });
                }
                check_params(decl.name(), decl.param_count(), &field.ty)?;
            }
        }

        let mut fp = Fingerprinter::new();
        fp.write_record(&decl);
        let id = ShapeId(fp.finish());

        self.names.insert(decl.name().clone(), id);
        self.order.push(id);
        self.records.insert(id, RecordShape::new(id, decl));
        Ok(id)
    }

    pub fn add_variant(&mut self, decl: VariantDecl) -> Result<ShapeId, TypeError> {
        self.check_name(decl.name())?;

        if decl.cases().is_empty() {
            return Err(TypeError::EmptyVariant {
                name: decl.name().clone(),
            });
        }

        {
            let mut seen = HashSet::new();
            for case in decl.cases() {
                if !seen.insert(&case.name) {
                    return Err(TypeError::DuplicateCase {
                        shape: decl.name().clone(),
                        case: case.name.clone(),
                    });
                }
                for ty in &case.payload {
                    check_params(decl.name(), decl.param_count(), ty)?;
                }
            }
        }

        let mut fp = Fingerprinter::new();
        fp.write_variant(&decl);
        let id = ShapeId(fp.finish());

        self.names.insert(decl.name().clone(), id);
        self.order.push(id);
        self.variants.insert(id, VariantShape::new(id, decl));
        Ok(id)
    }

    fn check_name(&self, name: &Ident) -> Result<(), TypeError> {
        if self.names.contains_key(name) {
            return Err(TypeError::DuplicateShape { name: name.clone() });
        }
        Ok(())
    }

    pub fn record(&self, id: ShapeId) -> Option<&RecordShape> {
        self.records.get(&id)
    }

    pub fn variant(&self, id: ShapeId) -> Option<&VariantShape> {
        self.variants.get(&id)
    }

    pub fn shape(&self, id: ShapeId) -> Option<Shape<'_>> {
        self.record(id)
            .map(Shape::Record)
            .or_else(|| self.variant(id).map(Shape::Variant))
    }

    pub fn record_named(&self, name: &str) -> Option<&RecordShape> {
        self.names.get(&Ident::from(name)).and_then(|id| self.record(*id))
    }

    pub fn variant_named(&self, name: &str) -> Option<&VariantShape> {
        self.names.get(&Ident::from(name)).and_then(|id| self.variant(*id))
    }

    pub fn shape_named(&self, name: &str) -> Option<Shape<'_>> {
        self.names.get(&Ident::from(name)).and_then(|id| self.shape(*id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registered shapes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = Shape<'_>> {
        self.order.iter().filter_map(|id| self.shape(*id))
    }

    /// Check that every `Named` reference resolves to a registered
    /// declaration and supplies the number of arguments it declares.
    ///
    /// Reports the first problem in registration order.
    pub fn validate(&self) -> Result<(), TypeError> {
        for shape in self.iter() {
            match shape {
                Shape::Record(record) => {
                    for field in record.fields() {
                        self.check_refs(record.name(), &field.ty)?;
                    }
                }
                Shape::Variant(variant) => {
                    for case in variant.cases() {
                        for ty in &case.payload {
                            self.check_refs(variant.name(), ty)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn check_refs(&self, owner: &Ident, ty: &Ty) -> Result<(), TypeError> {
        let mut result = Ok(());
        walk(ty, |node| {
            if !node.flags().contains(TyFlags::HAS_NAMED) {
                return Walk::Skip;
            }
            if let TyKind::Named { name, args } = node.kind() {
                let Some(target) = self.names.get(name).and_then(|id| self.shape(*id)) else {
                    result = Err(TypeError::UnknownType {
                        shape: owner.clone(),
                        name: name.clone(),
                    });
                    return Walk::Stop;
                };
                if usize::from(target.param_count()) != args.len() {
                    result = Err(TypeError::ArityMismatch {
                        shape: owner.clone(),
                        name: name.clone(),
                        expected: target.param_count(),
                        found: args.len(),
                    });
                    return Walk::Stop;
                }
            }
            Walk::Continue
        });
        result
    }
}

fn check_params(owner: &Ident, params: u16, ty: &Ty) -> Result<(), TypeError> {
    let mut result = Ok(());
    walk(ty, |node| match node.kind() {
        _ if !node.flags().contains(TyFlags::HAS_PARAMS) => Walk::Skip,
        TyKind::Param(index) if *index >= params => {
            result = Err(TypeError::UnboundParam {
                shape: owner.clone(),
                index: *index,
                params,
            });
            Walk::Stop
        }
        _ => Walk::Continue,
    });
    result
}
