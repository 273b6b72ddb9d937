//! `triad`: command-line front end for the triadic relational framework.
//!
//! **Usage:**
//! ```text
//! triad generate <C1> <C2> <C3> <A> <B>
//! triad discover <C1> <C2> <C3> <C4>
//! triad analogy <C1> <C2> <C3>
//! triad chain --start <C1> --link <C2,C3,A,B> [--link ...]
//! triad chain --file <plan.json>
//! triad verify <C1> <C2> <C3> <C4> <A> <B>
//! triad demo
//! ```
//!
//! Concepts are exact rationals written `n` or `n/d`. Exits non-zero on any
//! error.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod output;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use triadic_framework::{
    analogy_variant, audit_balance, balance_residual, compute_triad, discover, is_balanced,
    BalancingRule, Chain, Concept, Slot, TriadError,
};

use output::{Format, Printer, VerifyReport};

/// Exact-rational balancing rules between four concepts.
#[derive(Parser)]
#[command(name = "triad", version, about = "Compute and discover triadic balancing rules")]
struct Args {
    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatArg::Text, global = true)]
    format: FormatArg,

    /// Log each operation at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Predict C4 from C1, C2, C3 and the rule (A, B).
    Generate {
        #[arg(allow_hyphen_values = true)]
        c1: Concept,
        #[arg(allow_hyphen_values = true)]
        c2: Concept,
        #[arg(allow_hyphen_values = true)]
        c3: Concept,
        a: Concept,
        b: Concept,
    },
    /// Infer the minimal co-prime rule balancing four concepts.
    Discover {
        #[arg(allow_hyphen_values = true)]
        c1: Concept,
        #[arg(allow_hyphen_values = true)]
        c2: Concept,
        #[arg(allow_hyphen_values = true)]
        c3: Concept,
        #[arg(allow_hyphen_values = true)]
        c4: Concept,
    },
    /// Solve C1 : C2 :: C3 : C4 with the rule (1, 1).
    Analogy {
        #[arg(allow_hyphen_values = true)]
        c1: Concept,
        #[arg(allow_hyphen_values = true)]
        c2: Concept,
        #[arg(allow_hyphen_values = true)]
        c3: Concept,
    },
    /// Run a chain of triads.
    Chain {
        /// Initial C1 for a linear chain.
        #[arg(long, requires = "link", conflicts_with = "file", allow_hyphen_values = true)]
        start: Option<Concept>,
        /// One link `C2,C3,A,B`; its C1 is the previous link's C4.
        #[arg(long, value_parser = parse_link, allow_hyphen_values = true)]
        link: Vec<Link>,
        /// JSON chain plan: a list of `{c1, c2, c3, rule}` steps.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Check a supplied C4 against C1, C2, C3 and the rule (A, B).
    Verify {
        #[arg(allow_hyphen_values = true)]
        c1: Concept,
        #[arg(allow_hyphen_values = true)]
        c2: Concept,
        #[arg(allow_hyphen_values = true)]
        c3: Concept,
        #[arg(allow_hyphen_values = true)]
        c4: Concept,
        a: Concept,
        b: Concept,
    },
    /// Run the paper's worked examples.
    Demo,
}

#[derive(Clone)]
struct Link {
    c2: Concept,
    c3: Concept,
    rule: BalancingRule,
}

fn parse_link(s: &str) -> std::result::Result<Link, String> {
    let parts: Vec<&str> = s.split(',').collect();
    let [c2, c3, a, b] = parts.as_slice() else {
        return Err(format!("expected C2,C3,A,B, got {s:?}"));
    };
    let concept = |p: &str| p.parse::<Concept>().map_err(|e| e.to_string());
    let rule =
        BalancingRule::from_concepts(&concept(*a)?, &concept(*b)?).map_err(|e| e.to_string())?;
    Ok(Link {
        c2: concept(*c2)?,
        c3: concept(*c3)?,
        rule,
    })
}

fn init_logging(verbose: bool) {
    let default = if verbose { "triadic_framework=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let printer = Printer::new(match args.format {
        FormatArg::Text => Format::Text,
        FormatArg::Json => Format::Json,
    });

    match args.command {
        Command::Generate { c1, c2, c3, a, b } => {
            let rule = BalancingRule::from_concepts(&a, &b).context("reading the rule")?;
            let result = compute_triad(&c1, &c2, &c3, &rule).context("generating C4")?;
            printer.triad(&result)
        }
        Command::Discover { c1, c2, c3, c4 } => {
            let found = discover(&c1, &c2, &c3, &c4).context("discovering the rule")?;
            printer.discovery(&found)
        }
        Command::Analogy { c1, c2, c3 } => {
            let result = analogy_variant(&c1, &c2, &c3).context("solving the analogy")?;
            printer.triad(&result)
        }
        Command::Chain { start, link, file } => {
            let chain = match (start, file) {
                (Some(start), _) => {
                    Chain::linear(start, link.into_iter().map(|l| (l.c2, l.c3, l.rule)))
                }
                (None, Some(path)) => read_plan(&path)?,
                (None, None) => anyhow::bail!("chain needs --start with --link, or --file"),
            };
            let outcome = chain.run().context("running the chain")?;
            printer.chain(&outcome)
        }
        Command::Verify {
            c1,
            c2,
            c3,
            c4,
            a,
            b,
        } => {
            let rule = BalancingRule::from_concepts(&a, &b).context("reading the rule")?;
            printer.verify(&verify(c1, c2, c3, c4, &rule)?)
        }
        Command::Demo => demo(&printer),
    }
}

/// Checks the supplied `c4`; the computed C4 is reported alongside.
fn verify(
    c1: Concept,
    c2: Concept,
    c3: Concept,
    c4: Concept,
    rule: &BalancingRule,
) -> Result<VerifyReport> {
    let expected = compute_triad(&c1, &c2, &c3, rule).context("generating C4")?;
    let residual = match balance_residual(&c1, &c2, &c3, &c4, rule) {
        Ok(residual) => Some(residual),
        Err(TriadError::UndefinedRelation { operand: Slot::C4 }) => None,
        Err(err) => return Err(err).context("computing the residual"),
    };
    Ok(VerifyReport {
        balanced: is_balanced(&c1, &c2, &c3, &c4, rule),
        audit: audit_balance(&c1, &c2, &c3, &c4, rule),
        residual,
        expected: expected.into_c4(),
        supplied: c4,
    })
}

fn read_plan(path: &Path) -> Result<Chain> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading chain plan {}", path.display()))?;
    let chain: Chain = serde_json::from_str(&text)
        .with_context(|| format!("parsing chain plan {}", path.display()))?;
    tracing::debug!(path = %path.display(), steps = chain.len(), "loaded chain plan");
    Ok(chain)
}

fn demo(printer: &Printer) -> Result<()> {
    let c = |n: i64| Concept::from(n);

    printer.heading("Abstract example: (18, 6, 8) with rule (3, 4)");
    let rule = BalancingRule::new(3, 4)?;
    printer.triad(&compute_triad(&c(18), &c(6), &c(8), &rule)?)?;

    printer.heading("Analogy: 21 : 3 :: 5 : C4");
    printer.triad(&analogy_variant(&c(21), &c(3), &c(5))?)?;

    printer.heading("Static balance: 2 KE = m v^2 with KE = 1, m = 1, v^2 = 2");
    printer.discovery(&discover(&c(1), &c(1), &c(2), &c(1))?)?;

    printer.heading("Chain: 18 -> (6, 8, 3, 4) -> (5, 10, 1, 1)");
    let chain = Chain::linear(
        c(18),
        [
            (c(6), c(8), BalancingRule::new(3, 4)?),
            (c(5), c(10), BalancingRule::unit()),
        ],
    );
    printer.chain(&chain.run()?)?;

    printer.heading("Fractional example: pi ~ 22/7, (44, 1, 1) with rule (7, 44)");
    printer.triad(&compute_triad(&c(44), &c(1), &c(1), &BalancingRule::new(7, 44)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_parses_four_fields() {
        let link = parse_link("6,8,3,4").unwrap();
        assert_eq!(link.c2, Concept::from(6));
        assert_eq!(link.c3, Concept::from(8));
        assert_eq!(link.rule, BalancingRule::new(3, 4).unwrap());
    }

    #[test]
    fn link_accepts_fractions() {
        let link = parse_link("1/2,-3,1,2").unwrap();
        assert_eq!(link.c2, Concept::new(1, 2).unwrap());
    }

    #[test]
    fn link_rejects_bad_shapes() {
        assert!(parse_link("6,8,3").is_err());
        assert!(parse_link("6,8,3/2,1").is_err());
        assert!(parse_link("6,8,6,8").is_err());
    }

    #[test]
    fn args_parse() {
        let args = Args::try_parse_from(["triad", "--format", "json", "generate", "18", "6", "8", "3", "4"])
            .unwrap();
        assert!(matches!(args.format, FormatArg::Json));
        assert!(matches!(args.command, Command::Generate { .. }));
    }

    #[test]
    fn negative_fractions_are_values() {
        let args = Args::try_parse_from(["triad", "generate", "-3/4", "6", "-8", "3", "4"]).unwrap();
        match args.command {
            Command::Generate { c1, c3, .. } => {
                assert_eq!(c1, Concept::new(-3, 4).unwrap());
                assert_eq!(c3, Concept::from(-8));
            }
            _ => unreachable!("parsed as generate"),
        }

        let args =
            Args::try_parse_from(["triad", "chain", "--start", "-1/2", "--link", "-6,8,3,4"]).unwrap();
        assert!(matches!(args.command, Command::Chain { start: Some(_), .. }));
    }

    #[test]
    fn verify_audits_the_supplied_c4() {
        let c = |n: i64| Concept::from(n);
        let rule = BalancingRule::new(3, 4).unwrap();

        let report = verify(c(18), c(6), c(8), c(3), &rule).unwrap();
        assert!(!report.balanced);
        assert_eq!(report.residual, Some(Concept::new(2, 3).unwrap()));
        assert_eq!(report.expected, c(2));
        assert!(!report.audit.is_sound());

        let report = verify(c(18), c(6), c(8), c(2), &rule).unwrap();
        assert!(report.balanced);
        assert!(report.audit.is_sound());
    }

    #[test]
    fn verify_accepts_generated_zero_c4() {
        let c = |n: i64| Concept::from(n);
        let report = verify(c(5), c(0), c(3), c(0), &BalancingRule::unit()).unwrap();
        assert!(report.balanced);
        assert_eq!(report.residual, None);
        assert!(report.audit.is_sound());
    }
}
