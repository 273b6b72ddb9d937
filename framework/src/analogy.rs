//! Proportional analogies, `A : B :: C : D`.
//!
//! Both functions here are [`compute_triad`] with the rule fixed to `(1, 1)`,
//! so they share its reduction path and trace.

use crate::concept::Concept;
use crate::error::Result;
use crate::generative::{compute_triad, TriadResult};
use crate::rule::BalancingRule;

/// Solves `C1 · C4 = C2 · C3`, i.e. `C4 = (C2 · C3) / C1`.
///
/// ```
/// use triadic_framework::{analogy_variant, Concept};
///
/// let [c1, c2, c3] = [2i64, 6, 5].map(Concept::from);
/// assert_eq!(analogy_variant(&c1, &c2, &c3).unwrap().c4(), &Concept::from(15));
/// ```
///
/// # Errors
///
/// Returns [`crate::TriadError::UndefinedRelation`] when `C1` is zero.
pub fn analogy_variant(c1: &Concept, c2: &Concept, c3: &Concept) -> Result<TriadResult> {
    compute_triad(c1, c2, c3, &BalancingRule::unit())
}

/// The "King − Man + Woman" reading: `start · add / remove`.
///
/// With concepts encoded as products of prime attributes, dividing out
/// `remove` and multiplying in `add` swaps one attribute for another, e.g.
/// King = 3·7 (male, royal), Man = 3, Woman = 5 gives Queen = 5·7.
///
/// ```
/// use triadic_framework::{substitute, Concept};
///
/// let [king, man, woman] = [21i64, 3, 5].map(Concept::from);
/// assert_eq!(substitute(&king, &man, &woman).unwrap().c4(), &Concept::from(35));
/// ```
///
/// # Errors
///
/// Returns [`crate::TriadError::UndefinedRelation`] when `remove` is zero.
pub fn substitute(start: &Concept, remove: &Concept, add: &Concept) -> Result<TriadResult> {
    analogy_variant(remove, start, add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Slot, TriadError};

    #[test]
    fn unit_rule_k_is_one() {
        let result = analogy_variant(&Concept::from(4), &Concept::from(6), &Concept::from(10)).unwrap();
        assert_eq!(result.c4(), &Concept::from(15));
        assert_eq!(result.k(), &Concept::one());
        assert!(result.rule().is_unit());
    }

    #[test]
    fn matches_generative_path() {
        let [c1, c2, c3] = [21i64, 3, 5].map(Concept::from);
        let via_analogy = analogy_variant(&c1, &c2, &c3).unwrap();
        let via_triad = compute_triad(&c1, &c2, &c3, &BalancingRule::unit()).unwrap();
        assert_eq!(via_analogy, via_triad);
        assert_eq!(via_analogy.c4(), &Concept::new(5, 7).unwrap());
    }

    #[test]
    fn zero_c1_is_undefined() {
        assert_eq!(
            analogy_variant(&Concept::zero(), &Concept::from(1), &Concept::from(1)),
            Err(TriadError::UndefinedRelation {
                operand: Slot::C1
            })
        );
    }

    #[test]
    fn substitute_swaps_attribute() {
        let [king, man, woman] = [21i64, 3, 5].map(Concept::from);
        let queen = substitute(&king, &man, &woman).unwrap();
        assert_eq!(queen.c4(), &Concept::from(35));
    }
}
