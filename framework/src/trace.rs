//! Reduction traces for auditing triad computations.
//!
//! Each triad function records the intermediate values it produced, in
//! order, as a list of [`ReductionStep`]s. The trace plays no part in the
//! arithmetic; it exists so a result can be re-checked by hand or by
//! [`crate::verify`].

use core::fmt;

use crate::concept::Concept;

/// Which side of the triad equation an intermediate product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "snake_case"))]
pub enum Term {
    /// `a · C2 · C3` (generation) or `C1 · C4` (discovery).
    Numerator,
    /// `b · C1` (generation) or `C2 · C3` (discovery).
    Denominator,
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numerator => write!(f, "numerator"),
            Self::Denominator => write!(f, "denominator"),
        }
    }
}

/// A single recorded step of a triad computation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum ReductionStep {
    /// The concepts as supplied, in operand order.
    Inputs {
        /// `C1, C2, C3` and, for discovery, `C4`.
        concepts: Vec<Concept>,
    },

    /// The positive common factor of the inputs and the inputs divided by it.
    CommonFactor {
        /// Gcd of the numerators over lcm of the denominators.
        factor: Concept,
        /// Each input divided by `factor`.
        scaled: Vec<Concept>,
    },

    /// A normalized intermediate product.
    Product {
        /// Side of the equation.
        term: Term,
        /// The reduced product.
        value: Concept,
    },

    /// The normalized quotient of the two products.
    Quotient {
        /// Numerator over denominator, reduced.
        value: Concept,
    },

    /// The quotient multiplied back by the common factor.
    Rescale {
        /// The common factor restored.
        factor: Concept,
        /// The final value.
        value: Concept,
    },

    /// The discovery ratio `(C1 · C4) / (C2 · C3)`.
    Ratio {
        /// The reduced ratio `a / b`.
        value: Concept,
    },

    /// The simplicity constant `K = 1 / (a · b)`.
    Simplicity {
        /// `1 / (a · b)`.
        k: Concept,
    },
}

impl fmt::Display for ReductionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inputs { concepts } => {
                write!(f, "inputs: ")?;
                write_list(f, concepts)
            }
            Self::CommonFactor { factor, scaled } => {
                write!(f, "common factor {factor}: ")?;
                write_list(f, scaled)
            }
            Self::Product { term, value } => write!(f, "{term} = {value}"),
            Self::Quotient { value } => write!(f, "quotient = {value}"),
            Self::Rescale { factor, value } => write!(f, "rescaled by {factor} = {value}"),
            Self::Ratio { value } => write!(f, "ratio = {value}"),
            Self::Simplicity { k } => write!(f, "K = {k}"),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, values: &[Concept]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

/// An ordered list of reduction steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Trace {
    steps: Vec<ReductionStep>,
}

impl Trace {
    /// An empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step.
    pub fn record(&mut self, step: ReductionStep) {
        tracing::trace!(%step, "reduction step");
        self.steps.push(step);
    }

    /// The recorded steps, oldest first.
    #[must_use]
    pub fn steps(&self) -> &[ReductionStep] {
        &self.steps
    }

    /// Number of recorded steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The first recorded common factor, if any.
    #[must_use]
    pub fn common_factor(&self) -> Option<&Concept> {
        self.steps.iter().find_map(|step| match step {
            ReductionStep::CommonFactor { factor, .. } => Some(factor),
            _ => None,
        })
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "  {}. {step}", i + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_steps_in_order() {
        let mut trace = Trace::new();
        trace.record(ReductionStep::Inputs {
            concepts: vec![Concept::from(18), Concept::from(6)],
        });
        trace.record(ReductionStep::Simplicity {
            k: Concept::new(1, 12).unwrap(),
        });

        assert_eq!(trace.len(), 2);
        assert_eq!(trace.to_string(), "  1. inputs: 18, 6\n  2. K = 1/12\n");
    }

    #[test]
    fn finds_common_factor() {
        let mut trace = Trace::new();
        assert!(trace.common_factor().is_none());
        trace.record(ReductionStep::CommonFactor {
            factor: Concept::from(2),
            scaled: vec![Concept::from(9)],
        });
        assert_eq!(trace.common_factor(), Some(&Concept::from(2)));
    }
}
