use crate::utils::parse::{numbers, parse_lines};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::ops::RangeInclusive;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 2, tags = ["2024", "day02", "sequences"])]
pub struct Solver;

/// One report per line, each a list of levels
#[derive(Debug)]
pub struct SharedData {
    reports: Vec<Vec<i32>>,
}

const INCREASING: RangeInclusive<i64> = 1..=3;
const DECREASING: RangeInclusive<i64> = -3..=-1;

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let reports = parse_lines(input, |line| numbers::<i32>(line.split_whitespace()))?;
        Ok(SharedData { reports })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let safe = shared.reports.iter().filter(|r| is_safe(r)).count();
        Ok(safe.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let safe = shared
            .reports
            .iter()
            .filter(|r| is_safe_with_dampener(r))
            .count();
        Ok(safe.to_string())
    }
}

/// Every step rises by 1-3, or every step falls by 1-3
fn is_safe(levels: &[i32]) -> bool {
    is_safe_iter(levels.iter().copied())
}

fn is_safe_iter(levels: impl Iterator<Item = i32> + Clone) -> bool {
    // widened so extreme levels cannot overflow
    let mut deltas = levels
        .clone()
        .zip(levels.skip(1))
        .map(|(a, b)| i64::from(b) - i64::from(a));
    deltas.clone().all(|d| INCREASING.contains(&d)) || deltas.all(|d| DECREASING.contains(&d))
}

/// Safe as-is, or safe once any single level is dropped
fn is_safe_with_dampener(levels: &[i32]) -> bool {
    is_safe(levels)
        || (0..levels.len()).any(|skip| {
            let remaining = levels
                .iter()
                .enumerate()
                .filter(move |&(i, _)| i != skip)
                .map(|(_, &level)| level);
            is_safe_iter(remaining)
        })
}
