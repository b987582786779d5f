use super::flags::TyFlags;
use super::ty::{Ident, Ty, TyList, TyNode};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TyKind {
    /// Parameter of the enclosing declaration (`Param(0)` is the first one).
    Param(u16),

    /// Scalar types.
    Scalar(Scalar),

    /// Fixed-arity heterogeneous tuple.
    Tuple(TyList),

    /// Array with element type.
    Array(Ty),

    /// Singly-linked list with element type.
    List(Ty),

    /// Reference to a declared record or variant, instantiated with `args`.
    ///
    /// Recursive and mutually recursive declarations refer to each other
    /// through this node, so a type tree is always finite.
    Named { name: Ident, args: TyList },

    /// Function type with parameters and return type.
    Function { params: TyList, ret: Ty },
}

impl TyKind {
    pub fn compute_flags(&self) -> TyFlags {
        match self {
            TyKind::Param(_) => TyFlags::HAS_PARAMS,
            TyKind::Scalar(_) => TyFlags::empty(),
            TyKind::Tuple(elems) => union_flags(elems),
            TyKind::Array(elem) | TyKind::List(elem) => elem.flags(),
            TyKind::Named { args, .. } => TyFlags::HAS_NAMED | union_flags(args),
            TyKind::Function { params, ret } => union_flags(params) | ret.flags(),
        }
    }

    pub fn alloc(self) -> Ty {
        Ty::new(TyNode::new(self))
    }

    /// Number of immediate child types.
    pub fn child_count(&self) -> usize {
        match self {
            TyKind::Param(_) | TyKind::Scalar(_) => 0,
            TyKind::Tuple(elems) => elems.len(),
            TyKind::Array(_) | TyKind::List(_) => 1,
            TyKind::Named { args, .. } => args.len(),
            TyKind::Function { params, .. } => params.len() + 1,
        }
    }

    /// Iterate over immediate child types, left to right.
    pub fn iter_children(&self) -> impl Iterator<Item = &Ty> {
        let (list, single): (&[Ty], Option<&Ty>) = match self {
            TyKind::Param(_) | TyKind::Scalar(_) => (&[][..], None),
            TyKind::Tuple(elems) => (elems.as_slice(), None),
            TyKind::Array(elem) | TyKind::List(elem) => (&[][..], Some(elem)),
            TyKind::Named { args, .. } => (args.as_slice(), None),
            TyKind::Function { params, ret } => (params.as_slice(), Some(ret)),
        };
        list.iter().chain(single)
    }
}

fn union_flags(list: &[Ty]) -> TyFlags {
    list.iter()
        .fold(TyFlags::empty(), |acc, ty| acc | ty.flags())
}

/// Scalar type variants
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scalar {
    Unit,
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    /// The adaptive default number (exact integer, rational or float).
    Number,
    Char,
    /// UTF-8 string
    Str,
    /// Raw byte string
    Bytes,
}

impl Scalar {
    pub fn name(self) -> &'static str {
        match self {
            Scalar::Unit => "Unit",
            Scalar::Bool => "Bool",
            Scalar::I8 => "I8",
            Scalar::I16 => "I16",
            Scalar::I32 => "I32",
            Scalar::I64 => "I64",
            Scalar::U8 => "U8",
            Scalar::U16 => "U16",
            Scalar::U32 => "U32",
            Scalar::U64 => "U64",
            Scalar::Number => "Number",
            Scalar::Char => "Char",
            Scalar::Str => "Str",
            Scalar::Bytes => "Bytes",
        }
    }
}
