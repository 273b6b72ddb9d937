//! Balancing rules: minimal co-prime coefficient pairs.
//!
//! A rule `(a, b)` links four concepts through `b · C1 · C4 = a · C2 · C3`.
//! Both coefficients are positive integers and `gcd(a, b) = 1`; the
//! constructors refuse anything else, so every `BalancingRule` in circulation
//! is already minimal.

use core::fmt;

use num_bigint::BigInt;
use num_traits::{One, Signed};

use crate::concept::Concept;
use crate::error::{Result, RuleDefect, TriadError};
use crate::rational::gcd;

/// A co-prime pair of positive integer coefficients.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BalancingRule {
    a: BigInt,
    b: BigInt,
}

impl BalancingRule {
    /// Builds the rule `(a, b)`.
    ///
    /// # Errors
    ///
    /// Returns [`TriadError::InvalidRule`] when either coefficient is not
    /// positive or when `gcd(a, b) != 1`. Use [`BalancingRule::reduced`] to
    /// accept scaled pairs such as `(6, 8)`.
    pub fn new(a: impl Into<BigInt>, b: impl Into<BigInt>) -> Result<Self> {
        let (a, b) = (a.into(), b.into());
        check_positive(&a, &b)?;
        if !gcd(&a, &b).is_one() {
            return Err(invalid(&a, &b, RuleDefect::NotCoprime));
        }
        Ok(Self { a, b })
    }

    /// Builds the rule from a positive pair, dividing out any common factor.
    ///
    /// ```
    /// use triadic_framework::BalancingRule;
    ///
    /// let rule = BalancingRule::reduced(6, 8).unwrap();
    /// assert_eq!(rule, BalancingRule::new(3, 4).unwrap());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`TriadError::InvalidRule`] when either coefficient is not
    /// positive.
    pub fn reduced(a: impl Into<BigInt>, b: impl Into<BigInt>) -> Result<Self> {
        let (a, b) = (a.into(), b.into());
        check_positive(&a, &b)?;
        let g = gcd(&a, &b);
        Ok(Self { a: a / &g, b: b / &g })
    }

    /// Builds the rule from two concepts, which must both be integers.
    ///
    /// # Errors
    ///
    /// Returns [`TriadError::InvalidRule`] when a coefficient has a
    /// denominator other than 1, is not positive, or the pair is not co-prime.
    pub fn from_concepts(a: &Concept, b: &Concept) -> Result<Self> {
        if !a.is_integer() || !b.is_integer() {
            return Err(TriadError::InvalidRule {
                a: a.to_string(),
                b: b.to_string(),
                reason: RuleDefect::NonIntegral,
            });
        }
        Self::new(a.numer().clone(), b.numer().clone())
    }

    /// Builds the rule from a positive ratio `a / b` already in lowest terms.
    pub(crate) fn from_positive_ratio(ratio: Concept) -> Self {
        debug_assert!(ratio.is_positive());
        let (a, b) = ratio.into_parts();
        Self { a, b }
    }

    /// The canonical proportional rule `(1, 1)`.
    #[must_use]
    pub fn unit() -> Self {
        Self {
            a: BigInt::one(),
            b: BigInt::one(),
        }
    }

    /// The coefficient applied to `C2 · C3`.
    #[must_use]
    pub fn a(&self) -> &BigInt {
        &self.a
    }

    /// The coefficient applied to `C1 · C4`.
    #[must_use]
    pub fn b(&self) -> &BigInt {
        &self.b
    }

    /// The rule as the reduced ratio `a / b`.
    #[must_use]
    pub fn ratio(&self) -> Concept {
        Concept::from_nonzero_parts(self.a.clone(), self.b.clone())
    }

    /// The simplicity constant `K = 1 / (a · b)`.
    ///
    /// Smaller rules give larger `K`; the proportional rule `(1, 1)` has
    /// `K = 1`.
    #[must_use]
    pub fn simplicity(&self) -> Concept {
        Concept::from_nonzero_parts(BigInt::one(), &self.a * &self.b)
    }

    /// Whether this is the proportional rule `(1, 1)`.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.a.is_one() && self.b.is_one()
    }
}

fn check_positive(a: &BigInt, b: &BigInt) -> Result<()> {
    if a.is_positive() && b.is_positive() {
        Ok(())
    } else {
        Err(invalid(a, b, RuleDefect::NonPositive))
    }
}

fn invalid(a: &BigInt, b: &BigInt, reason: RuleDefect) -> TriadError {
    TriadError::InvalidRule {
        a: a.to_string(),
        b: b.to_string(),
        reason,
    }
}

impl fmt::Display for BalancingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.a, self.b)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::BalancingRule;
    use crate::concept::Concept;
    use serde::ser::SerializeStruct;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for BalancingRule {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("BalancingRule", 2)?;
            state.serialize_field("a", &Concept::integer(self.a.clone()))?;
            state.serialize_field("b", &Concept::integer(self.b.clone()))?;
            state.end()
        }
    }

    #[derive(Deserialize)]
    struct RawRule {
        a: Concept,
        b: Concept,
    }

    impl<'de> Deserialize<'de> for BalancingRule {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let raw = RawRule::deserialize(deserializer)?;
            BalancingRule::from_concepts(&raw.a, &raw.b).map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_coprime_pair() {
        let rule = BalancingRule::new(3, 4).unwrap();
        assert_eq!(rule.a(), &BigInt::from(3));
        assert_eq!(rule.b(), &BigInt::from(4));
        assert_eq!(rule.to_string(), "(3, 4)");
    }

    #[test]
    fn rejects_non_positive() {
        for (a, b) in [(0, 1), (1, 0), (-3, 4), (3, -4)] {
            assert!(matches!(
                BalancingRule::new(a, b),
                Err(TriadError::InvalidRule {
                    reason: RuleDefect::NonPositive,
                    ..
                })
            ));
        }
    }

    #[test]
    fn rejects_non_coprime() {
        assert!(matches!(
            BalancingRule::new(6, 8),
            Err(TriadError::InvalidRule {
                reason: RuleDefect::NotCoprime,
                ..
            })
        ));
    }

    #[test]
    fn reduced_divides_common_factor() {
        let rule = BalancingRule::reduced(12, 18).unwrap();
        assert_eq!(rule, BalancingRule::new(2, 3).unwrap());
        assert!(BalancingRule::reduced(0, 5).is_err());
    }

    #[test]
    fn rejects_fractional_coefficients() {
        let half = Concept::new(1, 2).unwrap();
        assert!(matches!(
            BalancingRule::from_concepts(&half, &Concept::one()),
            Err(TriadError::InvalidRule {
                reason: RuleDefect::NonIntegral,
                ..
            })
        ));
    }

    #[test]
    fn simplicity_constant() {
        let rule = BalancingRule::new(3, 4).unwrap();
        assert_eq!(rule.simplicity(), Concept::new(1, 12).unwrap());
        assert_eq!(BalancingRule::unit().simplicity(), Concept::one());
        assert!(BalancingRule::unit().is_unit());
    }

    #[test]
    fn ratio_is_a_over_b() {
        let rule = BalancingRule::new(1, 2).unwrap();
        assert_eq!(rule.ratio(), Concept::new(1, 2).unwrap());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_validates_on_the_way_in() {
        let rule = BalancingRule::new(3, 4).unwrap();
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#"{"a":"3","b":"4"}"#);
        let back: BalancingRule = serde_json::from_str(r#"{"a":3,"b":4}"#).unwrap();
        assert_eq!(back, rule);
        assert!(serde_json::from_str::<BalancingRule>(r#"{"a":6,"b":8}"#).is_err());
    }
}
