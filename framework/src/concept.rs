//! Concepts: exact signed rationals in lowest terms.
//!
//! A [`Concept`] is the only data shape the framework computes with. The
//! constructor reduces through [`crate::rational::normalize`], and every
//! arithmetic operation reduces its result again, so two concepts are equal
//! exactly when their numerators and denominators are equal.
//!
//! # Example
//!
//! ```
//! use triadic_framework::Concept;
//!
//! let c: Concept = "-6/8".parse().unwrap();
//! assert_eq!(c.to_string(), "-3/4");
//! assert_eq!(&c * &Concept::from(4), Concept::from(-3));
//! ```

use core::fmt;
use core::ops::{Mul, Neg};
use core::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::error::{Result, TriadError};
use crate::rational::{self, gcd, lcm};

/// An exact rational number `numer / denom` with `denom > 0` and
/// `gcd(|numer|, denom) = 1`.
///
/// Stored as a [`BigRational`]; ordering and equality are those of the
/// underlying ratio.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Concept(BigRational);

impl Concept {
    /// Builds `n / d` in lowest terms.
    ///
    /// # Errors
    ///
    /// Returns [`TriadError::DivisionByZero`] when `d` is zero.
    pub fn new(n: impl Into<BigInt>, d: impl Into<BigInt>) -> Result<Self> {
        let (numer, denom) = rational::normalize(n.into(), d.into())?;
        Ok(Self(BigRational::new_raw(numer, denom)))
    }

    /// The integer `n` as a concept.
    #[must_use]
    pub fn integer(n: impl Into<BigInt>) -> Self {
        Self(BigRational::from_integer(n.into()))
    }

    /// The concept `0/1`.
    #[must_use]
    pub fn zero() -> Self {
        Self::integer(0)
    }

    /// The concept `1/1`.
    #[must_use]
    pub fn one() -> Self {
        Self::integer(1)
    }

    /// Reduces a pair whose denominator is known to be non-zero.
    pub(crate) fn from_nonzero_parts(n: BigInt, d: BigInt) -> Self {
        let (numer, denom) = rational::reduce(n, d);
        Self(BigRational::new_raw(numer, denom))
    }

    /// The reduced numerator (carries the sign).
    #[must_use]
    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    /// The reduced denominator, always positive.
    #[must_use]
    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    /// The underlying ratio.
    #[must_use]
    pub fn as_ratio(&self) -> &BigRational {
        &self.0
    }

    /// Splits into `(numer, denom)`.
    #[must_use]
    pub fn into_parts(self) -> (BigInt, BigInt) {
        self.0.into_raw()
    }

    /// Whether this concept is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Whether this concept is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    /// Whether this concept is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Whether the denominator is 1.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    /// Whether the stored pair satisfies the lowest-terms invariant.
    ///
    /// Always true for values built through this module; exposed for audits.
    #[must_use]
    pub fn is_reduced(&self) -> bool {
        rational::is_reduced(self.numer(), self.denom())
    }

    /// `1 / self`.
    ///
    /// # Errors
    ///
    /// Returns [`TriadError::DivisionByZero`] when `self` is zero.
    pub fn recip(&self) -> Result<Self> {
        Self::new(self.denom().clone(), self.numer().clone())
    }

    /// `self / rhs`, reduced.
    ///
    /// # Errors
    ///
    /// Returns [`TriadError::DivisionByZero`] when `rhs` is zero.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(TriadError::DivisionByZero {
                numerator: self.numer() * rhs.denom(),
            });
        }
        Ok(Self(&self.0 / &rhs.0))
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }
}

/// The positive rational common factor of `values`: the gcd of the
/// numerators over the lcm of the denominators.
///
/// Dividing every value by the content leaves integers with no common factor.
/// Returns `None` when every value is zero (or the slice is empty).
///
/// ```
/// use triadic_framework::concept::{content, Concept};
///
/// let values = [Concept::from(18), Concept::from(6), Concept::from(8)];
/// assert_eq!(content(&values), Some(Concept::from(2)));
/// ```
#[must_use]
pub fn content(values: &[Concept]) -> Option<Concept> {
    let mut numer = BigInt::zero();
    let mut denom = BigInt::from(1);
    for value in values {
        numer = gcd(&numer, value.numer());
        denom = lcm(&denom, value.denom());
    }
    if numer.is_zero() {
        None
    } else {
        Some(Concept::from_nonzero_parts(numer, denom))
    }
}

impl Default for Concept {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for Concept {
    fn from(n: i64) -> Self {
        Self::integer(n)
    }
}

impl From<i32> for Concept {
    fn from(n: i32) -> Self {
        Self::integer(n)
    }
}

impl From<u64> for Concept {
    fn from(n: u64) -> Self {
        Self::integer(n)
    }
}

impl From<BigInt> for Concept {
    fn from(n: BigInt) -> Self {
        Self::integer(n)
    }
}

impl From<BigRational> for Concept {
    fn from(ratio: BigRational) -> Self {
        // A ratio built with `new_raw` may be unreduced.
        let (numer, denom) = ratio.into_raw();
        Self::from_nonzero_parts(numer, denom)
    }
}

impl Mul<&Concept> for &Concept {
    type Output = Concept;

    fn mul(self, rhs: &Concept) -> Concept {
        Concept(&self.0 * &rhs.0)
    }
}

impl Mul for Concept {
    type Output = Concept;

    fn mul(self, rhs: Concept) -> Concept {
        Concept(self.0 * rhs.0)
    }
}

impl Neg for Concept {
    type Output = Concept;

    fn neg(self) -> Concept {
        Concept(-self.0)
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Concept {
    type Err = TriadError;

    /// Parses `n` or `n/d` with optional surrounding whitespace. Decimal
    /// points and exponents are rejected.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TriadError::InvalidConcept { input: s.to_owned() };
        let parse = |part: &str| BigInt::from_str(part.trim()).map_err(|_| invalid());

        match s.trim().split_once('/') {
            Some((n, d)) => Self::new(parse(n)?, parse(d)?),
            None => parse(s).map(Self::integer),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Concept;
    use core::fmt;
    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Concept {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    struct ConceptVisitor;

    impl Visitor<'_> for ConceptVisitor {
        type Value = Concept;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer or a fraction string such as \"3/4\"")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Concept, E> {
            v.parse().map_err(E::custom)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Concept, E> {
            Ok(Concept::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Concept, E> {
            Ok(Concept::from(v))
        }
    }

    impl<'de> Deserialize<'de> for Concept {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(ConceptVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cmp::Ordering;

    fn c(n: i64, d: i64) -> Concept {
        Concept::new(n, d).unwrap()
    }

    #[test]
    fn construction_reduces() {
        let x = c(12, -18);
        assert_eq!(x.numer(), &BigInt::from(-2));
        assert_eq!(x.denom(), &BigInt::from(3));
        assert!(x.is_reduced());
    }

    #[test]
    fn multiplication_stays_reduced() {
        let product = &c(2, 3) * &c(9, 4);
        assert_eq!(product, c(3, 2));
        assert!(product.is_reduced());
    }

    #[test]
    fn division() {
        assert_eq!(c(3, 4).checked_div(&c(9, 8)), Ok(c(2, 3)));
        assert!(matches!(
            c(3, 4).checked_div(&Concept::zero()),
            Err(TriadError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn recip_of_negative_keeps_denominator_positive() {
        assert_eq!(c(-2, 5).recip(), Ok(c(-5, 2)));
    }

    #[test]
    fn ordering_is_numeric() {
        assert!(c(1, 3) < c(1, 2));
        assert!(c(-1, 2) < c(-1, 3));
        assert_eq!(c(2, 4).cmp(&c(1, 2)), Ordering::Equal);
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("  7 ".parse::<Concept>(), Ok(Concept::from(7)));
        assert_eq!("10/-4".parse::<Concept>(), Ok(c(-5, 2)));
        assert_eq!(c(-5, 2).to_string(), "-5/2");
        assert_eq!(Concept::from(12).to_string(), "12");
    }

    #[test]
    fn parse_rejects_floats() {
        assert!(matches!(
            "1.5".parse::<Concept>(),
            Err(TriadError::InvalidConcept { .. })
        ));
        assert!(matches!(
            "1e3".parse::<Concept>(),
            Err(TriadError::InvalidConcept { .. })
        ));
    }

    #[test]
    fn parse_zero_denominator() {
        assert!(matches!(
            "3/0".parse::<Concept>(),
            Err(TriadError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn content_of_rationals() {
        let values = [c(1, 2), c(3, 4), Concept::zero()];
        assert_eq!(content(&values), Some(c(1, 4)));
        assert_eq!(content(&[Concept::zero()]), None);
        assert_eq!(content(&[]), None);
    }

    #[test]
    fn unreduced_ratio_is_normalized() {
        let raw = BigRational::new_raw(BigInt::from(6), BigInt::from(-8));
        let x = Concept::from(raw);
        assert_eq!(x, c(-3, 4));
        assert!(x.is_reduced());
        assert_eq!(x.as_ratio(), &BigRational::new(BigInt::from(-3), BigInt::from(4)));
    }

    #[test]
    fn content_ignores_sign() {
        assert_eq!(content(&[c(-6, 1), c(9, 1)]), Some(Concept::from(3)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_fraction_text() {
        let json = serde_json::to_string(&c(-3, 4)).unwrap();
        assert_eq!(json, "\"-3/4\"");
        let back: Concept = serde_json::from_str("\"6/8\"").unwrap();
        assert_eq!(back, c(3, 4));
        let int: Concept = serde_json::from_str("42").unwrap();
        assert_eq!(int, Concept::from(42));
    }
}
