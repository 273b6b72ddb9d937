//! Chain operator: sequentially composed triads.
//!
//! A chain is a list of [`ChainStep`]s. Each operand of a step is either a
//! literal [`Concept`] or the `C4` of an earlier step, referenced by its
//! 1-based step number. Steps run strictly in order; the first failure
//! aborts the chain with [`TriadError::ChainBroken`] naming the failing step,
//! and no later step runs.
//!
//! # Example
//!
//! ```
//! use triadic_framework::{BalancingRule, Chain, Concept};
//!
//! let outcome = Chain::linear(
//!     Concept::from(18),
//!     [
//!         (Concept::from(6), Concept::from(8), BalancingRule::new(3, 4).unwrap()),
//!         (Concept::from(5), Concept::from(10), BalancingRule::unit()),
//!     ],
//! )
//! .run()
//! .unwrap();
//!
//! assert_eq!(outcome.final_c4(), Some(&Concept::from(25)));
//! ```

use crate::concept::Concept;
use crate::error::{Result, TriadError};
use crate::generative::{compute_triad, TriadResult};
use crate::rule::BalancingRule;

/// Where a chain step takes one of its operands from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Operand {
    /// A literal concept.
    Value(Concept),
    /// The `C4` produced by an earlier step (1-based).
    Step {
        /// The step number.
        step: usize,
    },
}

impl Operand {
    /// Reference to the result of `step` (1-based).
    #[must_use]
    pub fn step(step: usize) -> Self {
        Self::Step { step }
    }

    fn resolve<'a>(&'a self, at: usize, results: &'a [TriadResult]) -> Result<&'a Concept> {
        match self {
            Self::Value(concept) => Ok(concept),
            // Steps before `at` are exactly `1..at`, all present in `results`.
            Self::Step { step } if (1..at).contains(step) => Ok(results[*step - 1].c4()),
            Self::Step { step } => Err(TriadError::UnresolvedOperand {
                step: at,
                reference: *step,
            }),
        }
    }
}

impl From<Concept> for Operand {
    fn from(concept: Concept) -> Self {
        Self::Value(concept)
    }
}

/// One link of a chain: three operands and a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChainStep {
    /// Source of `C1`.
    pub c1: Operand,
    /// Source of `C2`.
    pub c2: Operand,
    /// Source of `C3`.
    pub c3: Operand,
    /// The rule applied at this step.
    pub rule: BalancingRule,
}

impl ChainStep {
    /// Builds a step from its operands and rule.
    pub fn new(
        c1: impl Into<Operand>,
        c2: impl Into<Operand>,
        c3: impl Into<Operand>,
        rule: BalancingRule,
    ) -> Self {
        Self {
            c1: c1.into(),
            c2: c2.into(),
            c3: c3.into(),
            rule,
        }
    }
}

/// Results of a completed chain, one per step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChainOutcome {
    results: Vec<TriadResult>,
}

impl ChainOutcome {
    /// Per-step results, in step order.
    #[must_use]
    pub fn results(&self) -> &[TriadResult] {
        &self.results
    }

    /// `C4` of the last step, or `None` for an empty chain.
    #[must_use]
    pub fn final_c4(&self) -> Option<&Concept> {
        self.results.last().map(TriadResult::c4)
    }

    /// `K` of every step, in step order.
    #[must_use]
    pub fn ks(&self) -> Vec<&Concept> {
        self.results.iter().map(TriadResult::k).collect()
    }

    /// Consumes the outcome, keeping the per-step results.
    #[must_use]
    pub fn into_results(self) -> Vec<TriadResult> {
        self.results
    }
}

/// An ordered list of dependent triad steps, consumed by [`Chain::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Chain {
    steps: Vec<ChainStep>,
}

impl Chain {
    /// An empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step.
    #[must_use]
    pub fn then(mut self, step: ChainStep) -> Self {
        self.steps.push(step);
        self
    }

    /// A chain where each step's `C4` becomes the next step's `C1`.
    ///
    /// Each link supplies `(C2, C3, rule)`; the first step uses `initial`.
    pub fn linear(
        initial: Concept,
        links: impl IntoIterator<Item = (Concept, Concept, BalancingRule)>,
    ) -> Self {
        let steps = links
            .into_iter()
            .enumerate()
            .map(|(i, (c2, c3, rule))| {
                let c1 = if i == 0 {
                    Operand::Value(initial.clone())
                } else {
                    Operand::step(i)
                };
                ChainStep::new(c1, c2, c3, rule)
            })
            .collect();
        Self { steps }
    }

    /// The steps, in order.
    #[must_use]
    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the chain has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs every step in order.
    ///
    /// # Errors
    ///
    /// Returns [`TriadError::ChainBroken`] for the first step that fails,
    /// wrapping the step's own error.
    pub fn run(self) -> Result<ChainOutcome> {
        chain_triads(self.steps).map(|results| ChainOutcome { results })
    }
}

impl FromIterator<ChainStep> for Chain {
    fn from_iter<I: IntoIterator<Item = ChainStep>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

/// Runs `steps` left to right through [`compute_triad`].
///
/// # Errors
///
/// Returns [`TriadError::ChainBroken`] with the 1-based index of the first
/// failing step. A reference to a step that has not run yet fails with
/// [`TriadError::UnresolvedOperand`] as the cause.
pub fn chain_triads(steps: impl IntoIterator<Item = ChainStep>) -> Result<Vec<TriadResult>> {
    let mut results: Vec<TriadResult> = Vec::new();

    for (i, step) in steps.into_iter().enumerate() {
        let at = i + 1;
        let result = run_step(&step, at, &results).map_err(|err| {
            tracing::debug!(step = at, error = %err, "chain broken");
            err.at_step(at)
        })?;
        results.push(result);
    }

    tracing::debug!(steps = results.len(), "chain complete");
    Ok(results)
}

fn run_step(step: &ChainStep, at: usize, results: &[TriadResult]) -> Result<TriadResult> {
    let c1 = step.c1.resolve(at, results)?;
    let c2 = step.c2.resolve(at, results)?;
    let c3 = step.c3.resolve(at, results)?;
    compute_triad(c1, c2, c3, &step.rule)
}
