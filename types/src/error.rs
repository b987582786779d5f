use crate::core::Ident;

/// Errors raised while registering or validating declarations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("type `{name}` is already declared")]
    DuplicateShape { name: Ident },

    #[error("field `{field}` is declared more than once in `{shape}`")]
    DuplicateField { shape: Ident, field: Ident },

    #[error("case `{case}` is declared more than once in `{shape}`")]
    DuplicateCase { shape: Ident, case: Ident },

    #[error("variant `{name}` declares no cases")]
    EmptyVariant { name: Ident },

    #[error("`{shape}` refers to parameter '{index} but declares {params} parameter(s)")]
    UnboundParam { shape: Ident, index: u16, params: u16 },

    #[error("`{shape}` refers to undeclared type `{name}`")]
    UnknownType { shape: Ident, name: Ident },

    #[error("`{shape}` applies `{name}` to {found} argument(s), but it takes {expected}")]
    ArityMismatch {
        shape: Ident,
        name: Ident,
        expected: u16,
        found: usize,
    },
}
