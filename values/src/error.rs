use alloc::string::String;

use ombu_types::Ident;

use crate::shape::ShapeTag;

/// Errors raised when constructing or mutating values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// Wrong number of record fields, variant payload values or captures.
    #[error("`{name}` takes {expected} value(s), got {found}")]
    Arity {
        name: Ident,
        expected: usize,
        found: usize,
    },

    #[error("`{shape}` has no case with index {case}")]
    UnknownCase { shape: Ident, case: u32 },

    #[error("`{shape}` has no field `{field}`")]
    UnknownField { shape: Ident, field: String },

    #[error("field `{field}` of `{shape}` is not mutable")]
    ImmutableField { shape: Ident, field: Ident },

    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("rational number with a zero denominator")]
    ZeroDenominator,

    #[error("list tail would make the spine cyclic")]
    CyclicSpine,
}

/// Errors returned by native code when a closure is invoked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
    #[error("`{name}` expects {expected} argument(s), got {found}")]
    Arity {
        name: Ident,
        expected: u16,
        found: usize,
    },

    #[error("expected a {expected} value, got {found}")]
    Type { expected: ShapeTag, found: ShapeTag },

    #[error(transparent)]
    Value(#[from] ValueError),
}

/// Errors raised while registering native code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeError {
    #[error("function `{name}` is already registered")]
    DuplicateName { name: Ident },

    #[error("the code table is full")]
    TableFull,
}
