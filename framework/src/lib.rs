//! Triadic Relational Framework
//!
//! Exact-rational balancing rules between four concepts, as an alternative to
//! floating-point vector-analogy arithmetic. Four concepts are related by a
//! rule `(a, b)` through the triad equation
//!
//! ```text
//! b · C1 · C4 = a · C2 · C3
//! ```
//!
//! where `a` and `b` are co-prime positive integers.
//!
//! # Dual functions
//!
//! | Function | Given | Computes |
//! |----------|-------|----------|
//! | [`compute_triad`] (Φ_G) | `C1, C2, C3, (a, b)` | `C4`, `K` |
//! | [`check_static_balance`] (Φ_D) | `C1, C2, C3, C4` | `(a, b)` |
//!
//! Both share one normalization routine ([`rational::normalize`]), so every
//! value they produce is in lowest terms and equality is exact.
//!
//! # Example
//!
//! ```
//! use triadic_framework::{check_static_balance, compute_triad, BalancingRule, Concept};
//!
//! let [c1, c2, c3] = [18i64, 6, 8].map(Concept::from);
//! let rule = BalancingRule::new(3, 4).unwrap();
//!
//! let result = compute_triad(&c1, &c2, &c3, &rule).unwrap();
//! assert_eq!(result.c4(), &Concept::from(2));
//! assert_eq!(result.k().to_string(), "1/12");
//!
//! // Discovery recovers the rule from the four concepts.
//! assert_eq!(check_static_balance(&c1, &c2, &c3, result.c4()).unwrap(), rule);
//! ```
//!
//! # Modules
//!
//! - [`rational`]: GCD reduction of integer pairs
//! - [`concept`], [`rule`]: the two value types
//! - [`generative`], [`discovery`], [`analogy`]: the triad functions
//! - [`chain`]: sequential composition
//! - [`trace`], [`verify`]: audit trail and invariant checks
//! - [`network`]: named triads with K-weighted connections

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod analogy;
pub mod chain;
pub mod concept;
pub mod discovery;
pub mod error;
pub mod generative;
pub mod network;
pub mod rational;
pub mod rule;
pub mod trace;
pub mod verify;

pub use analogy::{analogy_variant, substitute};
pub use chain::{chain_triads, Chain, ChainOutcome, ChainStep, Operand};
pub use concept::Concept;
pub use discovery::{check_static_balance, discover, Discovery};
pub use error::{Result, RuleDefect, Slot, TriadError};
pub use generative::{balance_residual, compute_triad, is_balanced, TriadResult};
pub use network::{TriadEdge, TriadNetwork, TriadNode};
pub use rule::BalancingRule;
pub use trace::{ReductionStep, Trace};
pub use verify::{audit, audit_balance, AuditReport, Finding, Severity};
