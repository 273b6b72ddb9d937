//! Audit of triad results against the framework's invariants.
//!
//! [`audit`] re-derives what a [`TriadResult`] claims and records one
//! [`Finding`] per check:
//!
//! - `lowest-terms`: `C4` satisfies `gcd(|n|, d) = 1`, `d > 0`;
//! - `residual`: `(a · C2 · C3) / (b · C1 · C4)` is exactly 1;
//! - `simplicity`: `K = 1 / (a · b)`;
//! - `round-trip`: discovery on `(C1, C2, C3, C4)` returns the rule.
//!
//! Checks that are undefined at the given inputs (e.g. discovery when
//! `C4 = 0`) produce a warning rather than a failure. [`audit_balance`] runs
//! the same checks on a `C4` supplied by the caller.

use core::fmt;

use crate::concept::Concept;
use crate::discovery::check_static_balance;
use crate::generative::{balance_residual, is_balanced, TriadResult};
use crate::rule::BalancingRule;

/// Outcome level of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum Severity {
    /// The check passed.
    Pass,
    /// The check could not be applied at these inputs.
    Warning,
    /// The check failed.
    Failure,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Warning => write!(f, "WARN"),
            Self::Failure => write!(f, "FAIL"),
        }
    }
}

/// Result of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Finding {
    /// Short name of the check.
    pub check: &'static str,
    /// Outcome.
    pub severity: Severity,
    /// Human-readable detail.
    pub message: String,
}

impl Finding {
    fn pass(check: &'static str, message: impl Into<String>) -> Self {
        Self {
            check,
            severity: Severity::Pass,
            message: message.into(),
        }
    }

    fn warn(check: &'static str, message: impl Into<String>) -> Self {
        Self {
            check,
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    fn fail(check: &'static str, message: impl Into<String>) -> Self {
        Self {
            check,
            severity: Severity::Failure,
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.check, self.message)
    }
}

/// All findings from one audit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AuditReport {
    findings: Vec<Finding>,
}

impl AuditReport {
    /// The findings, in check order.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// True when no check failed. Warnings do not count against soundness.
    #[must_use]
    pub fn is_sound(&self) -> bool {
        !self.findings.iter().any(|f| f.severity == Severity::Failure)
    }

    /// Number of findings at `severity`.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for finding in &self.findings {
            writeln!(f, "{finding}")?;
        }
        Ok(())
    }
}

/// Re-checks `result` as produced from `(c1, c2, c3)`.
#[must_use]
pub fn audit(c1: &Concept, c2: &Concept, c3: &Concept, result: &TriadResult) -> AuditReport {
    let c4 = result.c4();
    let rule = result.rule();
    let mut findings = Vec::with_capacity(4);

    findings.push(lowest_terms(c4));
    findings.push(residual(c1, c2, c3, c4, rule));

    let expected_k = rule.simplicity();
    findings.push(if result.k() == &expected_k {
        Finding::pass("simplicity", format!("K = {expected_k}"))
    } else {
        Finding::fail(
            "simplicity",
            format!("K = {}, expected {expected_k}", result.k()),
        )
    });

    findings.push(round_trip(c1, c2, c3, c4, rule));

    AuditReport { findings }
}

/// Checks a caller-supplied `c4` against `(c1, c2, c3)` and `rule`.
///
/// Runs the lowest-terms, residual and round-trip checks of [`audit`]; there
/// is no computed `K` to compare.
///
/// ```
/// use triadic_framework::{audit_balance, BalancingRule, Concept};
///
/// let [c1, c2, c3] = [18i64, 6, 8].map(Concept::from);
/// let rule = BalancingRule::new(3, 4).unwrap();
/// assert!(audit_balance(&c1, &c2, &c3, &Concept::from(2), &rule).is_sound());
/// assert!(!audit_balance(&c1, &c2, &c3, &Concept::from(3), &rule).is_sound());
/// ```
#[must_use]
pub fn audit_balance(
    c1: &Concept,
    c2: &Concept,
    c3: &Concept,
    c4: &Concept,
    rule: &BalancingRule,
) -> AuditReport {
    AuditReport {
        findings: vec![
            lowest_terms(c4),
            residual(c1, c2, c3, c4, rule),
            round_trip(c1, c2, c3, c4, rule),
        ],
    }
}

fn lowest_terms(c4: &Concept) -> Finding {
    if c4.is_reduced() {
        Finding::pass("lowest-terms", format!("C4 = {c4}"))
    } else {
        Finding::fail("lowest-terms", format!("C4 = {c4} is not reduced"))
    }
}

fn residual(
    c1: &Concept,
    c2: &Concept,
    c3: &Concept,
    c4: &Concept,
    rule: &BalancingRule,
) -> Finding {
    match balance_residual(c1, c2, c3, c4, rule) {
        Ok(r) if r == Concept::one() => Finding::pass("residual", "residual = 1"),
        Ok(r) => {
            tracing::warn!(residual = %r, "triad residual is not 1");
            Finding::fail("residual", format!("residual = {r}"))
        }
        // 0 / 0 when both sides vanish; anything else over zero cannot balance.
        Err(err) if is_balanced(c1, c2, c3, c4, rule) => {
            Finding::warn("residual", format!("residual undefined: {err}"))
        }
        Err(err) => Finding::fail(
            "residual",
            format!("residual undefined and unbalanced: {err}"),
        ),
    }
}

fn round_trip(
    c1: &Concept,
    c2: &Concept,
    c3: &Concept,
    c4: &Concept,
    rule: &BalancingRule,
) -> Finding {
    match check_static_balance(c1, c2, c3, c4) {
        Ok(found) if &found == rule => Finding::pass("round-trip", format!("recovered {found}")),
        Ok(found) => Finding::fail("round-trip", format!("recovered {found}, expected {rule}")),
        Err(err) => Finding::warn("round-trip", err.to_string()),
    }
}
