use crate::utils::grid::{Grid, Point};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 4, tags = ["2024", "day04", "grid"])]
pub struct Solver;

const fn p(row: isize, col: isize) -> Point {
    Point::new(row, col)
}

/// Horizontal, vertical, diagonal and anti-diagonal runs of four cells
const LINE_PATTERNS: [[Point; 4]; 4] = [
    [p(0, 0), p(0, 1), p(0, 2), p(0, 3)],
    [p(0, 0), p(1, 0), p(2, 0), p(3, 0)],
    [p(0, 0), p(1, 1), p(2, 2), p(3, 3)],
    [p(0, 3), p(1, 2), p(2, 1), p(3, 0)],
];

/// Read in both directions
const LINE_WORDS: [&[u8]; 2] = [b"XMAS", b"SAMX"];

/// Top-left, top-right, centre, bottom-left, bottom-right
const CROSS_PATTERN: [[Point; 5]; 1] = [[p(-1, -1), p(-1, 1), p(0, 0), p(1, -1), p(1, 1)]];

/// Both diagonals spell MAS in either direction
const CROSS_WORDS: [&[u8]; 4] = [b"MMASS", b"SSAMM", b"MSAMS", b"SMASM"];

impl AocParser for Solver {
    type SharedData<'a> = Grid;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse(input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_matches(shared, &LINE_PATTERNS, &LINE_WORDS).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_matches(shared, &CROSS_PATTERN, &CROSS_WORDS).to_string())
    }
}

/// Count (origin, pattern) pairs whose cells spell one of `words`
fn count_matches<const N: usize>(grid: &Grid, patterns: &[[Point; N]], words: &[&[u8]]) -> usize {
    grid.points()
        .map(|origin| {
            patterns
                .iter()
                .filter_map(|pattern| read(grid, origin, pattern))
                .filter(|word| words.iter().any(|w| w[..] == word[..]))
                .count()
        })
        .sum()
}

/// Cells under `pattern` anchored at `origin`; `None` if any falls off the grid
fn read<const N: usize>(grid: &Grid, origin: Point, pattern: &[Point; N]) -> Option<[u8; N]> {
    let mut word = [0u8; N];
    for (slot, &offset) in word.iter_mut().zip(pattern) {
        *slot = grid.get(origin + offset)?;
    }
    Some(word)
}
