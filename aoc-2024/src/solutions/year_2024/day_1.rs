use crate::utils::parse::{number, parse_lines};
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 1, tags = ["2024", "day01", "lists"])]
pub struct Solver;

/// The two location-id columns
#[derive(Debug)]
pub struct SharedData {
    left: Vec<i64>,
    right: Vec<i64>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let pairs = parse_lines(input, |line| {
            let mut tokens = line.split_whitespace();
            match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(left), Some(right), None) => Ok((number::<i64>(left)?, number::<i64>(right)?)),
                _ => Err(anyhow!("expected exactly two numbers, got {:?}", line)),
            }
        })?;

        let (left, right) = pairs.into_iter().unzip();
        Ok(SharedData { left, right })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_distance(&shared.left, &shared.right).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(similarity_score(&shared.left, &shared.right).to_string())
    }
}

/// Pair the smallest with the smallest, and so on, summing the gaps
fn total_distance(left: &[i64], right: &[i64]) -> u128 {
    let mut left = left.to_vec();
    let mut right = right.to_vec();
    left.sort_unstable();
    right.sort_unstable();

    left.iter()
        .zip(&right)
        .map(|(l, r)| u128::from(l.abs_diff(*r)))
        .sum()
}

/// Each left id weighted by how often it appears on the right
/// Widened to i128 so extreme ids cannot overflow
fn similarity_score(left: &[i64], right: &[i64]) -> i128 {
    let mut occurrences: HashMap<i64, i128> = HashMap::new();
    for &id in right {
        *occurrences.entry(id).or_default() += 1;
    }

    left.iter()
        .map(|id| i128::from(*id) * occurrences.get(id).copied().unwrap_or(0))
        .sum()
}
