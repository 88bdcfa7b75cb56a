use crate::utils::parse::{number, numbers, parse_lines};
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 7, tags = ["2024", "day07", "search"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    target: u64,
    operands: Vec<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Add,
    Multiply,
    Concatenate,
}

const BASIC: &[Operator] = &[Operator::Add, Operator::Multiply];
const WITH_CONCAT: &[Operator] = &[Operator::Add, Operator::Multiply, Operator::Concatenate];

impl Operator {
    /// `None` on overflow
    fn apply(self, lhs: u64, rhs: u64) -> Option<u64> {
        match self {
            Operator::Add => lhs.checked_add(rhs),
            Operator::Multiply => lhs.checked_mul(rhs),
            Operator::Concatenate => {
                let shift = 10u64.checked_pow(rhs.checked_ilog10().unwrap_or(0) + 1)?;
                lhs.checked_mul(shift)?.checked_add(rhs)
            }
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Equation>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let (target, operands) = line
                .split_once(':')
                .ok_or_else(|| anyhow!("expected `target: operands`, got {:?}", line))?;
            let target = number::<u64>(target)?;
            let operands = numbers::<u64>(operands.split_whitespace())?;
            if operands.is_empty() {
                return Err(anyhow!("no operands after {}:", target));
            }
            Ok(Equation { target, operands })
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(calibration(shared, BASIC).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(calibration(shared, WITH_CONCAT).to_string())
    }
}

/// Sum of targets reachable with `operators`
fn calibration(equations: &[Equation], operators: &[Operator]) -> u64 {
    equations
        .iter()
        .filter(|eq| is_solvable(eq, operators))
        .map(|eq| eq.target)
        .sum()
}

fn is_solvable(equation: &Equation, operators: &[Operator]) -> bool {
    let Some((&first, rest)) = equation.operands.split_first() else {
        return false;
    };
    // With a zero operand the running value can shrink again, so only prune without one.
    let monotonic = rest.iter().all(|&n| n >= 1);
    search(equation.target, first, rest, operators, monotonic)
}

/// Left-to-right evaluation; every operator is tried at each gap
fn search(target: u64, acc: u64, rest: &[u64], operators: &[Operator], monotonic: bool) -> bool {
    let Some((&next, rest)) = rest.split_first() else {
        return acc == target;
    };
    if monotonic && acc > target {
        return false;
    }
    operators.iter().any(|op| {
        op.apply(acc, next)
            .is_some_and(|value| search(target, value, rest, operators, monotonic))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use proptest::prelude::*;

    const SAMPLE: &str = "
        190: 10 19
        3267: 81 40 27
        83: 17 5
        156: 15 6
        7290: 6 8 6 15
        161011: 16 10 13
        192: 17 8 14
        21037: 9 7 18 13
        292: 11 6 16 20
    ";

    fn solve(input: &str, part: u8) -> String {
        let mut shared = Solver::parse(input).unwrap();
        Solver::solve_part(&mut shared, part).unwrap()
    }

    fn equation(target: u64, operands: &[u64]) -> Equation {
        Equation {
            target,
            operands: operands.to_vec(),
        }
    }

    #[test]
    fn test_sample_part1() {
        assert_eq!(solve(SAMPLE, 1), "3749");
    }

    #[test]
    fn test_sample_part2() {
        assert_eq!(solve(SAMPLE, 2), "11387");
    }

    #[test]
    fn test_concatenate() {
        assert_eq!(Operator::Concatenate.apply(12, 345), Some(12345));
        assert_eq!(Operator::Concatenate.apply(0, 7), Some(7));
        assert_eq!(Operator::Concatenate.apply(5, 0), Some(50));
        assert_eq!(Operator::Concatenate.apply(1, 10), Some(110));
        assert_eq!(Operator::Concatenate.apply(u64::MAX / 10, 99), None);
    }

    #[test]
    fn test_evaluates_left_to_right() {
        // 2 + 3 * 4 is 20, not 14
        assert!(is_solvable(&equation(20, &[2, 3, 4]), BASIC));
        assert!(!is_solvable(&equation(14, &[2, 3, 4]), BASIC));
    }

    #[test]
    fn test_single_operand() {
        assert!(is_solvable(&equation(7, &[7]), BASIC));
        assert!(!is_solvable(&equation(8, &[7]), WITH_CONCAT));
    }

    #[test]
    fn test_zero_operand_disables_pruning() {
        // 5 * 3 overshoots 5, then * 0 + 5 brings it back
        assert!(is_solvable(&equation(5, &[5, 3, 0, 5]), BASIC));
    }

    #[test]
    fn test_overflowing_branch_is_discarded() {
        assert!(is_solvable(&equation(u64::MAX, &[u64::MAX, 1]), BASIC));
        assert!(!is_solvable(&equation(1, &[u64::MAX, 2]), WITH_CONCAT));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Solver::parse("190 10 19"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("190:"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("190: 10 x"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("-1: 10"), Err(ParseError::InvalidFormat(_))));
    }

    proptest! {
        #[test]
        fn concatenation_only_adds_solutions(
            target in 0u64..5000,
            operands in prop::collection::vec(0u64..100, 1..5)
        ) {
            let eq = Equation { target, operands };
            if is_solvable(&eq, BASIC) {
                prop_assert!(is_solvable(&eq, WITH_CONCAT));
            }
        }

        #[test]
        fn sum_of_operands_is_always_reachable(operands in prop::collection::vec(1u64..1000, 1..6)) {
            let target = operands.iter().sum();
            let eq = Equation { target, operands };
            prop_assert!(is_solvable(&eq, BASIC));
        }
    }
}
