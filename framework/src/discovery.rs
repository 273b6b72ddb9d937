//! Discovery function Φ_D: infer the rule that balances four concepts.
//!
//! The rule is read off the reduced ratio
//!
//! ```text
//! a / b = (C1 · C4) / (C2 · C3)
//! ```
//!
//! so no search is involved: the Euclidean reduction of one rational yields
//! the unique co-prime pair.
//!
//! # Example
//!
//! ```
//! use triadic_framework::{check_static_balance, BalancingRule, Concept};
//!
//! // 2 · KE = m · v², with KE = 1, m = 1, v² = 2
//! let [ke, m, v2, one] = [1i64, 1, 2, 1].map(Concept::from);
//! let rule = check_static_balance(&ke, &m, &v2, &one).unwrap();
//! assert_eq!(rule, BalancingRule::new(1, 2).unwrap());
//! ```

use crate::concept::{content, Concept};
use crate::error::{Result, Slot, TriadError};
use crate::rule::BalancingRule;
use crate::trace::{ReductionStep, Term, Trace};

/// Output of [`discover`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Discovery {
    rule: BalancingRule,
    k: Concept,
    trace: Trace,
}

impl Discovery {
    /// The minimal co-prime rule.
    #[must_use]
    pub fn rule(&self) -> &BalancingRule {
        &self.rule
    }

    /// The simplicity constant `K = 1 / (a · b)`.
    #[must_use]
    pub fn k(&self) -> &Concept {
        &self.k
    }

    /// Intermediate values, in the order they were produced.
    #[must_use]
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Consumes the discovery, keeping only the rule.
    #[must_use]
    pub fn into_rule(self) -> BalancingRule {
        self.rule
    }
}

/// Finds the minimal co-prime `(a, b)` with `b · C1 · C4 = a · C2 · C3`.
///
/// # Errors
///
/// See [`discover`].
pub fn check_static_balance(
    c1: &Concept,
    c2: &Concept,
    c3: &Concept,
    c4: &Concept,
) -> Result<BalancingRule> {
    discover(c1, c2, c3, c4).map(Discovery::into_rule)
}

/// [`check_static_balance`] with the reduction trace and `K`.
///
/// # Errors
///
/// - [`TriadError::UndefinedRelation`] when `C1` or `C4` is zero.
/// - [`TriadError::NoValidRule`] when `C2 · C3` is zero or the ratio is
///   negative; only positive ratios have a positive rule.
pub fn discover(c1: &Concept, c2: &Concept, c3: &Concept, c4: &Concept) -> Result<Discovery> {
    if c1.is_zero() {
        return Err(TriadError::UndefinedRelation {
            operand: Slot::C1,
        });
    }
    if c4.is_zero() {
        return Err(TriadError::UndefinedRelation {
            operand: Slot::C4,
        });
    }

    let mut trace = Trace::new();
    let inputs = [c1.clone(), c2.clone(), c3.clone(), c4.clone()];
    trace.record(ReductionStep::Inputs {
        concepts: inputs.to_vec(),
    });

    // The ratio is invariant under a common scale; the factor is recorded so
    // the trace matches the generative side.
    if let Some(g) = content(&inputs) {
        let scaled = inputs
            .iter()
            .map(|c| c.checked_div(&g))
            .collect::<Result<Vec<_>>>()?;
        trace.record(ReductionStep::CommonFactor { factor: g, scaled });
    }

    let numerator = c1 * c4;
    trace.record(ReductionStep::Product {
        term: Term::Numerator,
        value: numerator.clone(),
    });
    let denominator = c2 * c3;
    trace.record(ReductionStep::Product {
        term: Term::Denominator,
        value: denominator.clone(),
    });

    if denominator.is_zero() {
        return Err(TriadError::NoValidRule {
            ratio: "undefined".to_owned(),
        });
    }
    let ratio = numerator.checked_div(&denominator)?;
    trace.record(ReductionStep::Ratio {
        value: ratio.clone(),
    });
    if !ratio.is_positive() {
        return Err(TriadError::NoValidRule {
            ratio: ratio.to_string(),
        });
    }

    let rule = BalancingRule::from_positive_ratio(ratio);
    let k = rule.simplicity();
    trace.record(ReductionStep::Simplicity { k: k.clone() });

    tracing::debug!(%c1, %c2, %c3, %c4, %rule, "discovered rule");

    Ok(Discovery { rule, k, trace })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::gcd;
    use num_traits::One;

    fn c(n: i64, d: i64) -> Concept {
        Concept::new(n, d).unwrap()
    }

    #[test]
    fn kinetic_energy_rule() {
        let found = discover(&c(1, 1), &c(1, 1), &c(2, 1), &c(1, 1)).unwrap();
        assert_eq!(found.rule(), &BalancingRule::new(1, 2).unwrap());
        assert_eq!(found.k(), &c(1, 2));
    }

    #[test]
    fn recovers_paper_rule() {
        let rule = check_static_balance(&c(18, 1), &c(6, 1), &c(8, 1), &c(2, 1)).unwrap();
        assert_eq!(rule, BalancingRule::new(3, 4).unwrap());
    }

    #[test]
    fn rule_is_coprime() {
        let rule = check_static_balance(&c(12, 1), &c(4, 1), &c(9, 1), &c(30, 1)).unwrap();
        assert!(gcd(rule.a(), rule.b()).is_one());
        assert_eq!(rule, BalancingRule::new(10, 1).unwrap());
    }

    #[test]
    fn rational_concepts() {
        let rule = check_static_balance(&c(1, 2), &c(1, 3), &c(3, 4), &c(2, 5)).unwrap();
        // (1/2 · 2/5) / (1/3 · 3/4) = (1/5) / (1/4) = 4/5
        assert_eq!(rule, BalancingRule::new(4, 5).unwrap());
    }

    #[test]
    fn negative_ratio_has_no_rule() {
        assert_eq!(
            check_static_balance(&c(-1, 1), &c(1, 1), &c(2, 1), &c(1, 1)),
            Err(TriadError::NoValidRule {
                ratio: "-1/2".into()
            })
        );
    }

    #[test]
    fn both_negative_sides_balance() {
        let rule = check_static_balance(&c(-2, 1), &c(-3, 1), &c(1, 1), &c(3, 1)).unwrap();
        assert_eq!(rule, BalancingRule::new(2, 1).unwrap());
    }

    #[test]
    fn zero_operands() {
        assert_eq!(
            check_static_balance(&Concept::zero(), &c(1, 1), &c(1, 1), &c(1, 1)),
            Err(TriadError::UndefinedRelation {
                operand: Slot::C1
            })
        );
        assert_eq!(
            check_static_balance(&c(1, 1), &c(1, 1), &c(1, 1), &Concept::zero()),
            Err(TriadError::UndefinedRelation {
                operand: Slot::C4
            })
        );
        assert_eq!(
            check_static_balance(&c(1, 1), &Concept::zero(), &c(1, 1), &c(1, 1)),
            Err(TriadError::NoValidRule {
                ratio: "undefined".into()
            })
        );
    }
}
