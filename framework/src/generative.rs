//! Generative function Φ_G: predict the fourth concept.
//!
//! Solves `b · C1 · C4 = a · C2 · C3` for `C4`:
//!
//! ```text
//! C4 = (a · C2 · C3) / (b · C1)
//! ```
//!
//! The inputs are first divided by their common factor `g`, the two products
//! and their quotient are each reduced, and the quotient is multiplied back
//! by `g`. Every intermediate value is recorded in the result's [`Trace`].
//!
//! # Example
//!
//! ```
//! use triadic_framework::{compute_triad, BalancingRule, Concept};
//!
//! let rule = BalancingRule::new(3, 4).unwrap();
//! let result = compute_triad(
//!     &Concept::from(18),
//!     &Concept::from(6),
//!     &Concept::from(8),
//!     &rule,
//! )
//! .unwrap();
//!
//! assert_eq!(result.c4(), &Concept::from(2));
//! assert_eq!(result.k(), &Concept::new(1, 12).unwrap());
//! ```

use crate::concept::{content, Concept};
use crate::error::{Result, Slot, TriadError};
use crate::rule::BalancingRule;
use crate::trace::{ReductionStep, Term, Trace};

/// Output of [`compute_triad`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TriadResult {
    c4: Concept,
    k: Concept,
    residual: Option<Concept>,
    rule: BalancingRule,
    trace: Trace,
}

impl TriadResult {
    /// The computed fourth concept, in lowest terms.
    #[must_use]
    pub fn c4(&self) -> &Concept {
        &self.c4
    }

    /// The simplicity constant `K = 1 / (a · b)` of the rule used.
    #[must_use]
    pub fn k(&self) -> &Concept {
        &self.k
    }

    /// `(a · C2 · C3) / (b · C1 · C4)`, recomputed from the solved `C4`.
    ///
    /// Exactly 1 whenever `C4` is non-zero. `None` when `C2 · C3 = 0`: the
    /// solved `C4` is then zero and the ratio is `0 / 0`.
    #[must_use]
    pub fn residual(&self) -> Option<&Concept> {
        self.residual.as_ref()
    }

    /// The rule the triad was computed with.
    #[must_use]
    pub fn rule(&self) -> &BalancingRule {
        &self.rule
    }

    /// Intermediate values, in the order they were produced.
    #[must_use]
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Consumes the result, keeping only `C4`.
    #[must_use]
    pub fn into_c4(self) -> Concept {
        self.c4
    }
}

/// Computes `C4 = (a · C2 · C3) / (b · C1)` for the rule `(a, b)`.
///
/// # Errors
///
/// Returns [`TriadError::UndefinedRelation`] when `C1` is zero.
pub fn compute_triad(
    c1: &Concept,
    c2: &Concept,
    c3: &Concept,
    rule: &BalancingRule,
) -> Result<TriadResult> {
    if c1.is_zero() {
        return Err(TriadError::UndefinedRelation {
            operand: Slot::C1,
        });
    }

    let mut trace = Trace::new();
    trace.record(ReductionStep::Inputs {
        concepts: vec![c1.clone(), c2.clone(), c3.clone()],
    });

    let inputs = [c1.clone(), c2.clone(), c3.clone()];
    // C1 is non-zero, so the content exists and is positive.
    let g = content(&inputs).ok_or(TriadError::UndefinedRelation {
        operand: Slot::C1,
    })?;
    let scaled = inputs
        .iter()
        .map(|c| c.checked_div(&g))
        .collect::<Result<Vec<_>>>()?;
    trace.record(ReductionStep::CommonFactor {
        factor: g.clone(),
        scaled: scaled.clone(),
    });
    let [c1s, c2s, c3s] = [&scaled[0], &scaled[1], &scaled[2]];

    let a = Concept::integer(rule.a().clone());
    let b = Concept::integer(rule.b().clone());

    let numerator = &(&a * c2s) * c3s;
    trace.record(ReductionStep::Product {
        term: Term::Numerator,
        value: numerator.clone(),
    });
    let denominator = &b * c1s;
    trace.record(ReductionStep::Product {
        term: Term::Denominator,
        value: denominator.clone(),
    });

    let quotient = numerator.checked_div(&denominator)?;
    trace.record(ReductionStep::Quotient {
        value: quotient.clone(),
    });

    let c4 = &quotient * &g;
    trace.record(ReductionStep::Rescale {
        factor: g,
        value: c4.clone(),
    });

    let k = rule.simplicity();
    trace.record(ReductionStep::Simplicity { k: k.clone() });

    let residual = if c4.is_zero() {
        None
    } else {
        Some(balance_residual(c1, c2, c3, &c4, rule)?)
    };

    tracing::debug!(%c1, %c2, %c3, %rule, %c4, %k, "computed triad");

    Ok(TriadResult {
        c4,
        k,
        residual,
        rule: rule.clone(),
        trace,
    })
}

/// `(a · C2 · C3) / (b · C1 · C4)` for a supplied `C4`.
///
/// Equals 1 exactly when the four concepts balance under `rule`. The value
/// is reported as-is; nothing is adjusted when it differs from 1.
///
/// ```
/// use triadic_framework::{balance_residual, BalancingRule, Concept};
///
/// let rule = BalancingRule::new(3, 4).unwrap();
/// let [c1, c2, c3] = [18i64, 6, 8].map(Concept::from);
/// assert_eq!(balance_residual(&c1, &c2, &c3, &Concept::from(2), &rule).unwrap(), Concept::one());
/// assert_eq!(balance_residual(&c1, &c2, &c3, &Concept::from(4), &rule).unwrap(), Concept::new(1, 2).unwrap());
/// ```
///
/// # Errors
///
/// Returns [`TriadError::UndefinedRelation`] when `C1` or `C4` is zero.
pub fn balance_residual(
    c1: &Concept,
    c2: &Concept,
    c3: &Concept,
    c4: &Concept,
    rule: &BalancingRule,
) -> Result<Concept> {
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

    let lhs = &(&Concept::integer(rule.a().clone()) * c2) * c3;
    let rhs = &(&Concept::integer(rule.b().clone()) * c1) * c4;
    let residual = lhs.checked_div(&rhs)?;
    if residual != Concept::one() {
        tracing::debug!(%c1, %c2, %c3, %c4, %rule, %residual, "triad does not balance");
    }
    Ok(residual)
}

/// Whether `b · C1 · C4 = a · C2 · C3` holds exactly.
///
/// Defined for every quadruple, including those where the residual is not.
#[must_use]
pub fn is_balanced(
    c1: &Concept,
    c2: &Concept,
    c3: &Concept,
    c4: &Concept,
    rule: &BalancingRule,
) -> bool {
    let lhs = &(&Concept::integer(rule.b().clone()) * c1) * c4;
    let rhs = &(&Concept::integer(rule.a().clone()) * c2) * c3;
    lhs == rhs
}
