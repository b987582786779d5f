//! The adaptive `Number` type: exact integers, exact rationals and floats.
//!
//! Exact values are kept in canonical form so that structural equality and
//! hashing can compare representations directly:
//!
//! - an [`Int`] is `Small` whenever it fits in an `i64`
//! - a `Big` magnitude has no high zero digit
//! - a [`Ratio`] is reduced and its denominator is greater than one

use alloc::vec::Vec;
use core::fmt;

use num_bigint::{BigInt, Sign};
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};

use crate::heap::Heap;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Int<'a> {
    Small(i64),
    /// Little-endian base 2^32 digits of the absolute value.
    Big {
        negative: bool,
        magnitude: &'a [u32],
    },
}

impl<'a> Int<'a> {
    pub fn is_negative(&self) -> bool {
        match *self {
            Int::Small(n) => n < 0,
            Int::Big { negative, .. } => negative,
        }
    }

    pub fn to_i64(&self) -> Option<i64> {
        match *self {
            Int::Small(n) => Some(n),
            Int::Big { .. } => None,
        }
    }

    pub fn to_bigint(&self) -> BigInt {
        match *self {
            Int::Small(n) => BigInt::from(n),
            Int::Big {
                negative,
                magnitude,
            } => {
                let sign = if negative { Sign::Minus } else { Sign::Plus };
                BigInt::from_slice(sign, magnitude)
            }
        }
    }

    /// Absolute value as little-endian bytes without high zero bytes.
    ///
    /// Zero has an empty magnitude.
    pub fn magnitude_le_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = match *self {
            Int::Small(n) => n.unsigned_abs().to_le_bytes().to_vec(),
            Int::Big { magnitude, .. } => {
                magnitude.iter().flat_map(|digit| digit.to_le_bytes()).collect()
            }
        };
        while bytes.last() == Some(&0) {
            bytes.pop();
        }
        bytes
    }
}

impl fmt::Debug for Int<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Int::Small(n) => write!(f, "{n}"),
            Int::Big { .. } => write!(f, "{}", self.to_bigint()),
        }
    }
}

/// An exact rational in lowest terms with a denominator greater than one.
#[derive(PartialEq, Eq, Hash)]
pub struct Ratio<'a> {
    numer: Int<'a>,
    denom: Int<'a>,
}

impl<'a> Ratio<'a> {
    pub fn numer(&self) -> Int<'a> {
        self.numer
    }

    pub fn denom(&self) -> Int<'a> {
        self.denom
    }

    pub fn to_big_rational(&self) -> BigRational {
        BigRational::new_raw(self.numer.to_bigint(), self.denom.to_bigint())
    }
}

impl fmt::Debug for Ratio<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{:?}", self.numer, self.denom)
    }
}

#[derive(Clone, Copy)]
pub enum Number<'a> {
    Int(Int<'a>),
    Ratio(&'a Ratio<'a>),
    F32(f32),
    F64(f64),
}

impl<'a> Number<'a> {
    pub fn int(n: i64) -> Self {
        Number::Int(Int::Small(n))
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Number::Int(_) | Number::Ratio(_))
    }

    pub fn to_f64(&self) -> f64 {
        match *self {
            Number::Int(int) => int.to_bigint().to_f64().unwrap_or(f64::NAN),
            Number::Ratio(ratio) => {
                let numer = ratio.numer.to_bigint().to_f64().unwrap_or(f64::NAN);
                let denom = ratio.denom.to_bigint().to_f64().unwrap_or(f64::NAN);
                numer / denom
            }
            Number::F32(x) => f64::from(x),
            Number::F64(x) => x,
        }
    }
}

/// Same sub-kind and same value. Floats use IEEE comparison.
impl PartialEq for Number<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (Number::Ratio(a), Number::Ratio(b)) => a == b,
            (Number::F32(a), Number::F32(b)) => a == b,
            (Number::F64(a), Number::F64(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Number<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(int) => write!(f, "{int:?}"),
            Number::Ratio(ratio) => write!(f, "{ratio:?}"),
            Number::F32(x) => write!(f, "{x:?}f32"),
            Number::F64(x) => write!(f, "{x:?}"),
        }
    }
}

// ============================================================================
// Arena construction
// ============================================================================

impl<'a> Heap<'a> {
    /// Store an arbitrary-precision integer in canonical form.
    pub fn big_int(&self, value: &BigInt) -> Int<'a> {
        if let Some(small) = value.to_i64() {
            return Int::Small(small);
        }
        let (sign, digits) = value.to_u32_digits();
        Int::Big {
            negative: sign == Sign::Minus,
            magnitude: self.bump().alloc_slice_copy(&digits),
        }
    }

    /// Integer from a sign and little-endian magnitude bytes.
    pub fn int_from_le_bytes(&self, negative: bool, magnitude: &[u8]) -> Int<'a> {
        let sign = if negative { Sign::Minus } else { Sign::Plus };
        self.big_int(&BigInt::from_bytes_le(sign, magnitude))
    }

    /// Store a rational, reducing it first. A whole result becomes an `Int`.
    pub fn rational(&self, value: &BigRational) -> Number<'a> {
        let value = value.reduced();
        if value.denom().is_one() {
            return Number::Int(self.big_int(value.numer()));
        }
        let ratio = Ratio {
            numer: self.big_int(value.numer()),
            denom: self.big_int(value.denom()),
        };
        Number::Ratio(self.bump().alloc(ratio))
    }

    pub fn ratio(&self, numer: &BigInt, denom: &BigInt) -> Result<Number<'a>, crate::ValueError> {
        if denom.is_zero() {
            return Err(crate::ValueError::ZeroDenominator);
        }
        Ok(self.rational(&BigRational::new_raw(numer.clone(), denom.clone())))
    }
}
