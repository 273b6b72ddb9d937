//! Error taxonomy for triadic computations.
//!
//! Every failure is raised where it is detected and returned to the caller.
//! Variants are distinct so callers can branch on the cause, e.g. a malformed
//! rule versus a relation that is undefined at the given inputs.

use num_bigint::BigInt;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = TriadError> = core::result::Result<T, E>;

/// Which slot of a triad caused a division by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The first concept, `C1`.
    C1,
    /// The second concept, `C2`.
    C2,
    /// The third concept, `C3`.
    C3,
    /// The fourth concept, `C4`.
    C4,
}

impl core::fmt::Display for Slot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::C1 => write!(f, "C1"),
            Self::C2 => write!(f, "C2"),
            Self::C3 => write!(f, "C3"),
            Self::C4 => write!(f, "C4"),
        }
    }
}

/// Why a balancing rule was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleDefect {
    /// A coefficient is zero or negative.
    NonPositive,
    /// A coefficient has a denominator other than 1.
    NonIntegral,
    /// `gcd(a, b) != 1`.
    NotCoprime,
}

impl core::fmt::Display for RuleDefect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NonPositive => write!(f, "coefficients must be positive"),
            Self::NonIntegral => write!(f, "coefficients must be integers"),
            Self::NotCoprime => write!(f, "coefficients must be co-prime"),
        }
    }
}

/// Errors raised by the normalizer, the triad functions, the chain operator
/// and the triad network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriadError {
    /// A rational was built with a zero denominator.
    #[error("division by zero: denominator of {numerator}/0")]
    DivisionByZero {
        /// Numerator of the rejected fraction.
        numerator: BigInt,
    },

    /// The coefficients `(a, b)` do not form a valid balancing rule.
    #[error("invalid balancing rule ({a}, {b}): {reason}")]
    InvalidRule {
        /// First coefficient as supplied.
        a: String,
        /// Second coefficient as supplied.
        b: String,
        /// What is wrong with the pair.
        reason: RuleDefect,
    },

    /// The relation divides by a zero concept.
    #[error("undefined relation: {operand} is zero")]
    UndefinedRelation {
        /// The zero operand.
        operand: Slot,
    },

    /// The balance ratio has no positive co-prime representation.
    #[error("no valid balancing rule: ratio (C1*C4)/(C2*C3) = {ratio}")]
    NoValidRule {
        /// The offending ratio, or `undefined` when `C2 * C3 = 0`.
        ratio: String,
    },

    /// A chain step refers to a result that does not exist yet.
    #[error("step {step} references step {reference}, which has not run")]
    UnresolvedOperand {
        /// The step holding the reference (1-based).
        step: usize,
        /// The referenced step number.
        reference: usize,
    },

    /// A chain step failed; the chain was aborted at that step.
    #[error("chain broken at step {step}")]
    ChainBroken {
        /// The failing step (1-based).
        step: usize,
        /// The originating error.
        #[source]
        source: Box<TriadError>,
    },

    /// Text could not be parsed as an exact rational.
    #[error("invalid concept {input:?}: expected an integer or a fraction n/d")]
    InvalidConcept {
        /// The rejected text.
        input: String,
    },

    /// A triad id was registered twice in a network.
    #[error("triad {0:?} is already in the network")]
    DuplicateTriad(String),

    /// A triad id is not present in a network.
    #[error("triad {0:?} is not in the network")]
    UnknownTriad(String),
}

impl TriadError {
    /// Wraps `self` as the cause of a chain failure at `step`.
    #[must_use]
    pub fn at_step(self, step: usize) -> Self {
        Self::ChainBroken {
            step,
            source: Box::new(self),
        }
    }

    /// For [`TriadError::ChainBroken`], the innermost cause. Otherwise `self`.
    #[must_use]
    pub fn root_cause(&self) -> &TriadError {
        match self {
            Self::ChainBroken { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn chain_broken_exposes_source() {
        let err = TriadError::UndefinedRelation {
            operand: Slot::C1,
        }
        .at_step(1);

        assert_eq!(err.to_string(), "chain broken at step 1");
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("undefined relation: C1 is zero"));
    }

    #[test]
    fn root_cause_unwraps_nesting() {
        let inner = TriadError::NoValidRule {
            ratio: "-1".into(),
        };
        let err = inner.clone().at_step(2).at_step(3);
        assert_eq!(err.root_cause(), &inner);
    }

    #[test]
    fn invalid_rule_message() {
        let err = TriadError::InvalidRule {
            a: "6".into(),
            b: "8".into(),
            reason: RuleDefect::NotCoprime,
        };
        assert_eq!(
            err.to_string(),
            "invalid balancing rule (6, 8): coefficients must be co-prime"
        );
    }
}
