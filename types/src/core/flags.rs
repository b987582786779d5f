use bitflags::bitflags;

bitflags! {
    /// Flags indicating various properties of a type.
    ///
    /// These flags are computed once when a type node is allocated and cached
    /// for efficient queries. This avoids repeated traversals when validating
    /// declarations.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct TyFlags: u16 {
        /// Mentions a declaration parameter (`Param(i)`).
        const HAS_PARAMS = 1;
        /// Refers to a declared record or variant by name.
        const HAS_NAMED = 1 << 1;
    }
}
