//! Text and JSON rendering of triad results.

use anyhow::Result;
use serde::Serialize;
use triadic_framework::{AuditReport, ChainOutcome, Concept, Discovery, TriadResult};

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

/// Outcome of `triad verify`.
#[derive(Debug, Serialize)]
pub struct VerifyReport {
    pub supplied: Concept,
    /// `None` when `C4 = 0`, where the ratio is undefined.
    pub residual: Option<Concept>,
    pub balanced: bool,
    pub expected: Concept,
    pub audit: AuditReport,
}

pub struct Printer {
    format: Format,
}

impl Printer {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    /// Section title; text mode only.
    pub fn heading(&self, title: &str) {
        if self.format == Format::Text {
            println!();
            println!("{title}");
            println!("{}", "=".repeat(title.chars().count()));
        }
    }

    pub fn triad(&self, result: &TriadResult) -> Result<()> {
        if self.format == Format::Json {
            return self.json(result);
        }
        println!("C4: {}", result.c4());
        println!("K: {}", result.k());
        println!("residual: {}", residual_text(result.residual()));
        println!("rule: {}", result.rule());
        println!("steps:");
        print!("{}", result.trace());
        Ok(())
    }

    pub fn discovery(&self, found: &Discovery) -> Result<()> {
        if self.format == Format::Json {
            return self.json(found);
        }
        let rule = found.rule();
        println!("a: {}, b: {}", rule.a(), rule.b());
        println!("K: {}", found.k());
        println!("steps:");
        print!("{}", found.trace());
        Ok(())
    }

    pub fn chain(&self, outcome: &ChainOutcome) -> Result<()> {
        if self.format == Format::Json {
            return self.json(outcome);
        }
        for (i, result) in outcome.results().iter().enumerate() {
            println!(
                "step {}: C4 = {}, K = {}, rule = {}",
                i + 1,
                result.c4(),
                result.k(),
                result.rule()
            );
        }
        match outcome.final_c4() {
            Some(c4) => println!("final C4: {c4}"),
            None => println!("empty chain"),
        }
        Ok(())
    }

    pub fn verify(&self, report: &VerifyReport) -> Result<()> {
        if self.format == Format::Json {
            return self.json(report);
        }
        println!("supplied C4: {}", report.supplied);
        println!("residual: {}", residual_text(report.residual.as_ref()));
        println!(
            "balanced: {}",
            if report.balanced { "yes" } else { "no" }
        );
        println!("expected C4: {}", report.expected);
        print!("{}", report.audit);
        Ok(())
    }

    fn json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

fn residual_text(residual: Option<&Concept>) -> String {
    residual.map_or_else(|| "undefined".to_owned(), ToString::to_string)
}
