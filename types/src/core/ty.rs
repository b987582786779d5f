use alloc::rc::Rc;
use core::fmt;
use core::hash;

use smallvec::SmallVec;

use super::flags::TyFlags;
use super::kind::TyKind;

/// Interned identifier (type, field, case and function names).
pub type Ident = string_cache::DefaultAtom;

/// Short list of types (tuple elements, type arguments, parameters).
pub type TyList = SmallVec<[Ty; 2]>;

/// Build a [`TyList`] from a slice of types.
pub fn ty_list(types: &[Ty]) -> TyList {
    types.iter().cloned().collect()
}

/// Reference-counted handle to a type node.
///
/// Equality and hashing are structural: two separately allocated `Array[I64]`
/// types are equal.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ty(Rc<TyNode>);

static_assertions::assert_eq_size!(Ty, usize);

impl Ty {
    pub fn new(node: TyNode) -> Self {
        Self(Rc::new(node))
    }

    pub fn node(&self) -> &TyNode {
        &self.0
    }

    pub fn kind(&self) -> &TyKind {
        self.node().kind()
    }

    pub fn flags(&self) -> TyFlags {
        self.node().flags()
    }
}

impl fmt::Debug for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, items: &[Ty]) -> fmt::Result {
            for (i, ty) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{ty}")?;
            }
            Ok(())
        }

        match self.kind() {
            TyKind::Param(index) => write!(f, "'{index}"),
            TyKind::Scalar(scalar) => f.write_str(scalar.name()),
            TyKind::Tuple(elems) => {
                f.write_str("(")?;
                list(f, elems)?;
                f.write_str(")")
            }
            TyKind::Array(elem) => write!(f, "Array[{elem}]"),
            TyKind::List(elem) => write!(f, "List[{elem}]"),
            TyKind::Named { name, args } if args.is_empty() => f.write_str(name),
            TyKind::Named { name, args } => {
                write!(f, "{name}[")?;
                list(f, args)?;
                f.write_str("]")
            }
            TyKind::Function { params, ret } => {
                f.write_str("(")?;
                list(f, params)?;
                write!(f, ") => {ret}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TyNode(TyFlags, TyKind);

impl TyNode {
    pub fn new(kind: TyKind) -> Self {
        let flags = kind.compute_flags();
        Self(flags, kind)
    }

    pub fn flags(&self) -> TyFlags {
        self.0
    }

    pub fn kind(&self) -> &TyKind {
        &self.1
    }
}

impl hash::Hash for TyNode {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        // Flags are computed from the kind, so we don't need to hash them.
        self.kind().hash(state);
    }
}
