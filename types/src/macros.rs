//! Type construction macro for ergonomic type building.
//!
//! # Example
//!
//! ```
//! use ombu_types::ty;
//!
//! // Scalar types
//! let int_ty = ty!(I64);
//! let str_ty = ty!(Str);
//!
//! // Compound types
//! let array_int = ty!(Array[I64]);
//! let pair = ty!(Tuple(Str, List[Number]));
//!
//! // Function types
//! let func = ty!((I64, Str) => Bool);
//!
//! // Declaration parameters and references to declared types
//! let tree = ty!([a] => @"Tree"[a]);
//! ```

/// Macro for constructing types with a concise syntax.
///
/// # Syntax
///
/// | Pattern | Meaning |
/// |---------|---------|
/// | `Unit`, `Bool`, `I8`..`U64`, `Number`, `Char`, `Str`, `Bytes` | Scalar types |
/// | `Tuple(T1, T2)` | Tuple type |
/// | `Array[T]`, `List[T]` | Sequence types |
/// | `@"Name"`, `@"Name"[T1, T2]` | Declared record or variant |
/// | `(T1, T2) => R` | Function type |
/// | `[a, b] => T` | Bind declaration parameters `a` = `'0`, `b` = `'1` |
#[macro_export]
macro_rules! ty {
    // === Parameter binding ===

    // Last parameter
    (@vars $n:expr, [$var:ident] ; $($rest:tt)+) => {{
        let $var = $crate::TyKind::Param($n).alloc();
        $crate::ty!(@ty $($rest)+)
    }};

    // More parameters to bind
    (@vars $n:expr, [$var:ident, $($tail:ident),+] ; $($rest:tt)+) => {{
        let $var = $crate::TyKind::Param($n).alloc();
        $crate::ty!(@vars $n + 1, [$($tail),+] ; $($rest)+)
    }};

    // === Scalar types ===

    (@ty Unit) => { $crate::TyKind::Scalar($crate::Scalar::Unit).alloc() };
    (@ty Bool) => { $crate::TyKind::Scalar($crate::Scalar::Bool).alloc() };
    (@ty I8) => { $crate::TyKind::Scalar($crate::Scalar::I8).alloc() };
    (@ty I16) => { $crate::TyKind::Scalar($crate::Scalar::I16).alloc() };
    (@ty I32) => { $crate::TyKind::Scalar($crate::Scalar::I32).alloc() };
    (@ty I64) => { $crate::TyKind::Scalar($crate::Scalar::I64).alloc() };
    (@ty U8) => { $crate::TyKind::Scalar($crate::Scalar::U8).alloc() };
    (@ty U16) => { $crate::TyKind::Scalar($crate::Scalar::U16).alloc() };
    (@ty U32) => { $crate::TyKind::Scalar($crate::Scalar::U32).alloc() };
    (@ty U64) => { $crate::TyKind::Scalar($crate::Scalar::U64).alloc() };
    (@ty Number) => { $crate::TyKind::Scalar($crate::Scalar::Number).alloc() };
    (@ty Char) => { $crate::TyKind::Scalar($crate::Scalar::Char).alloc() };
    (@ty Str) => { $crate::TyKind::Scalar($crate::Scalar::Str).alloc() };
    (@ty Bytes) => { $crate::TyKind::Scalar($crate::Scalar::Bytes).alloc() };

    // === Sequences ===

    (@ty Array[$($inner:tt)+]) => {{
        let elem = $crate::ty!(@ty $($inner)+);
        $crate::TyKind::Array(elem).alloc()
    }};

    (@ty List[$($inner:tt)+]) => {{
        let elem = $crate::ty!(@ty $($inner)+);
        $crate::TyKind::List(elem).alloc()
    }};

    (@ty Tuple($($elems:tt)*)) => {{
        let elems = $crate::ty!(@list [] [] $($elems)*);
        $crate::TyKind::Tuple(elems).alloc()
    }};

    // === Declared types ===

    (@ty @ $name:literal) => {{
        let name = $crate::Ident::from($name);
        $crate::TyKind::Named { name, args: $crate::TyList::new() }.alloc()
    }};

    (@ty @ $name:literal [$($args:tt)*]) => {{
        let name = $crate::Ident::from($name);
        let args = $crate::ty!(@list [] [] $($args)*);
        $crate::TyKind::Named { name, args }.alloc()
    }};

    // === Function (params) => ret ===

    (@ty ($($params:tt)*) => $($ret:tt)+) => {{
        let params = $crate::ty!(@list [] [] $($params)*);
        let ret = $crate::ty!(@ty $($ret)+);
        $crate::TyKind::Function { params, ret }.alloc()
    }};

    // === Parameter reference (fallback for identifiers) ===

    (@ty $var:ident) => { $var.clone() };

    // === Comma-separated type lists ===
    // @list [collected_types] [current_type_acc] remaining

    // End of input, nothing pending
    (@list [$($done:expr),*] []) => {
        $crate::ty_list(&[$($done),*])
    };

    // End of input - emit last accumulated type
    (@list [$($done:expr),*] [$($curr:tt)+]) => {
        $crate::ty!(@list [$($done,)* $crate::ty!(@ty $($curr)+)] [])
    };

    // Comma - emit current type, continue
    (@list [$($done:expr),*] [$($curr:tt)+] , $($rest:tt)*) => {
        $crate::ty!(@list [$($done,)* $crate::ty!(@ty $($curr)+)] [] $($rest)*)
    };

    // Any other token - accumulate (bracketed groups are single tokens)
    (@list [$($done:expr),*] [$($curr:tt)*] $tok:tt $($rest:tt)*) => {
        $crate::ty!(@list [$($done),*] [$($curr)* $tok] $($rest)*)
    };

    // === Entry points ===

    // With parameters: [a, b, ...] => Type
    ([$($var:ident),+ $(,)?] => $($rest:tt)+) => {{
        $crate::ty!(@vars 0u16, [$($var),+] ; $($rest)+)
    }};

    ($($rest:tt)+) => {
        $crate::ty!(@ty $($rest)+)
    };
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::{Scalar, TyFlags, TyKind};

    #[test]
    fn test_scalar() {
        assert_eq!(ty!(I64).kind(), &TyKind::Scalar(Scalar::I64));
        assert_eq!(ty!(Bytes).kind(), &TyKind::Scalar(Scalar::Bytes));
        assert_eq!(ty!(Number).kind(), &TyKind::Scalar(Scalar::Number));
    }

    #[test]
    fn test_array_nested() {
        let t = ty!(Array[Array[U8]]);
        match t.kind() {
            TyKind::Array(elem) => match elem.kind() {
                TyKind::Array(inner) => {
                    assert_eq!(inner.kind(), &TyKind::Scalar(Scalar::U8));
                }
                _ => panic!("Expected nested Array"),
            },
            _ => panic!("Expected Array"),
        }
    }

    #[test]
    fn test_tuple_with_nested_commas() {
        let t = ty!(Tuple(I64, (Str, Bool) => Unit, List[Char]));
        let TyKind::Tuple(elems) = t.kind() else {
            panic!("Expected Tuple");
        };
        assert_eq!(elems.len(), 3);
        assert!(matches!(elems[1].kind(), TyKind::Function { params, .. } if params.len() == 2));
        assert_eq!(t.to_string(), "(I64, (Str, Bool) => Unit, List[Char])");
    }

    #[test]
    fn test_empty_tuple() {
        let t = ty!(Tuple());
        assert_eq!(t.kind(), &TyKind::Tuple(crate::TyList::new()));
    }

    #[test]
    fn test_params() {
        let t = ty!([k, v] => @"Map"[k, List[v]]);
        assert_eq!(t.to_string(), "Map['0, List['1]]");
        assert!(t.flags().contains(TyFlags::HAS_PARAMS | TyFlags::HAS_NAMED));
    }

    #[test]
    fn test_named_without_args() {
        let t = ty!(@"Color");
        assert_eq!(t.to_string(), "Color");
        assert!(!t.flags().contains(TyFlags::HAS_PARAMS));
    }
}
