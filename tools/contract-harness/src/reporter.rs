//! Collects per-fixture results and prints the run summary.

use anyhow::Result;

use crate::fixture::Fixture;

pub struct Reporter {
    passed: usize,
    failures: Vec<(String, String)>,
}

impl Reporter {
    pub fn new() -> Self {
        Self {
            passed: 0,
            failures: Vec::new(),
        }
    }

    pub fn record(&mut self, fixture: &Fixture, result: Result<()>) {
        let label = format!("{}/{}", fixture.service, fixture.name);
        match result {
            Ok(()) => {
                self.passed += 1;
                println!("  PASS {label}");
            }
            Err(e) => {
                println!("  FAIL {label}: {e:#}");
                self.failures.push((label, format!("{e:#}")));
            }
        }
    }

    pub fn print_summary(&self) {
        println!();
        println!(
            "{} passed, {} failed",
            self.passed,
            self.failures.len()
        );
        for (label, error) in &self.failures {
            println!("  {label}: {error}");
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }
}
