//! Output formatting for solver results

use crate::executor::{SolverResult, Verdict};
use chrono::TimeDelta;

/// Output formatter for solver results
pub struct OutputFormatter {
    quiet: bool,
    start_time: std::time::Instant,
}

/// Counts over a finished run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub solved: usize,
    pub failed: usize,
    pub matched: usize,
    pub mismatched: usize,
}

impl Summary {
    pub fn from_results(results: &[SolverResult]) -> Self {
        let mut summary = Summary::default();
        for result in results {
            match (&result.answer, &result.verdict) {
                (Err(_), _) => summary.failed += 1,
                (Ok(_), Some(Verdict::Matches)) => {
                    summary.solved += 1;
                    summary.matched += 1;
                }
                (Ok(_), Some(Verdict::Mismatch { .. })) => {
                    summary.solved += 1;
                    summary.mismatched += 1;
                }
                (Ok(_), None) => summary.solved += 1,
            }
        }
        summary
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.mismatched == 0
    }
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: std::time::Instant::now(),
        }
    }

    /// Format and print a single result
    pub fn print_result(&self, result: &SolverResult) {
        if self.quiet {
            self.print_quiet(result);
        } else {
            self.print_full(result);
        }
    }

    /// Print in quiet mode (just the answer)
    fn print_quiet(&self, result: &SolverResult) {
        match &result.answer {
            Ok(answer) => println!("{}", answer),
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    /// Print full output with timing and verdict
    fn print_full(&self, result: &SolverResult) {
        match &result.answer {
            Ok(_) => println!("{}", format_full(result)),
            Err(_) => eprintln!("{}", format_full(result)),
        }
    }

    /// Print a summary after all results
    /// Shows both total solve time (sum of durations) and actual elapsed wall-clock time
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let summary = Summary::from_results(results);
        let total_parse_time: TimeDelta = results
            .iter()
            .filter(|r| r.answer.is_ok())
            .filter_map(|r| r.parse_duration)
            .sum();
        let total_solve_time: TimeDelta = results
            .iter()
            .filter(|r| r.answer.is_ok())
            .map(|r| r.solve_duration)
            .sum();
        let total_compute_time = total_parse_time + total_solve_time;
        let elapsed_time = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!(
            "Parts: {} solved, {} failed",
            summary.solved, summary.failed
        );
        println!(
            "Expected answers: {} matched, {} mismatched",
            summary.matched, summary.mismatched
        );
        println!("Total parse time: {}", format_duration(total_parse_time));
        println!("Total solve time: {}", format_duration(total_solve_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(elapsed_time)
        );
        if !elapsed_time.is_zero() {
            let total_compute_secs =
                total_compute_time.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
            let speedup = total_compute_secs / elapsed_time.as_secs_f64();
            println!("Speedup factor: {:.2}x", speedup);
        }
    }
}

/// `YYYY/DD Part P: answer (parse: .., solve: .., verdict)`
fn format_full(result: &SolverResult) -> String {
    let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);

    match &result.answer {
        Ok(answer) => {
            let parse_timing = result
                .parse_duration
                .map(|d| format!("parse: {}, ", format_duration(d)))
                .unwrap_or_default();
            let verdict = result
                .verdict
                .as_ref()
                .map(|v| format!(", {}", format_verdict(v)))
                .unwrap_or_default();

            format!(
                "{}: {} ({}solve: {}{})",
                prefix,
                answer,
                parse_timing,
                format_duration(result.solve_duration),
                verdict
            )
        }
        Err(e) => format!("{}: Error - {}", prefix, e),
    }
}

fn format_verdict(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Matches => "✓ matches".to_string(),
        Verdict::Mismatch { expected } => format!("✗ expected {}", expected),
    }
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
