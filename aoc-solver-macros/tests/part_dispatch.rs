use aoc_solver::{AocParser, ParseError, PartSolver, SolveError, Solver};
use aoc_solver_macros::AocSolver;

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Levels;

impl AocParser for Levels {
    type SharedData<'a> = Vec<i32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .split_whitespace()
            .map(|n| {
                n.parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("bad level: {n}")))
            })
            .collect()
    }
}

impl PartSolver<1> for Levels {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i32>().to_string())
    }
}

impl PartSolver<2> for Levels {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .max()
            .map(|m| m.to_string())
            .ok_or_else(|| SolveError::SolveFailed("no levels".into()))
    }
}

#[test]
fn test_parts_constant_matches_attribute() {
    assert_eq!(<Levels as Solver>::PARTS, 2);
}

#[test]
fn test_dispatch_to_each_part() {
    let mut shared = Levels::parse("7 6 4 2 1").unwrap();
    assert_eq!(Levels::solve_part(&mut shared, 1).unwrap(), "20");
    assert_eq!(Levels::solve_part(&mut shared, 2).unwrap(), "7");
}

#[test]
fn test_part_error_is_propagated() {
    let mut shared = Levels::parse("").unwrap();
    let result = Levels::solve_part(&mut shared, 2);
    assert!(matches!(result, Err(SolveError::SolveFailed(_))));
}

#[test]
fn test_undeclared_part_not_implemented() {
    let mut shared = Levels::parse("1 2").unwrap();
    assert!(matches!(
        Levels::solve_part(&mut shared, 0),
        Err(SolveError::PartNotImplemented(0))
    ));
    assert!(matches!(
        Levels::solve_part(&mut shared, 3),
        Err(SolveError::PartNotImplemented(3))
    ));
}

// Single-part solvers only need PartSolver<1>
#[derive(AocSolver)]
#[aoc_solver(max_parts = 1)]
struct Borrowing;

impl AocParser for Borrowing {
    type SharedData<'a> = Vec<&'a str>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input.lines().map(str::trim).filter(|l| !l.is_empty()).collect())
    }
}

impl PartSolver<1> for Borrowing {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.join("|"))
    }
}

#[test]
fn test_borrowed_shared_data() {
    let input = String::from("  ab \n\ncd\n");
    let mut shared = Borrowing::parse(&input).unwrap();
    assert_eq!(<Borrowing as Solver>::PARTS, 1);
    assert_eq!(Borrowing::solve_part(&mut shared, 1).unwrap(), "ab|cd");
}
