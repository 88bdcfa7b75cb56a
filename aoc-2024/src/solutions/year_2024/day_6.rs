use crate::utils::grid::{Grid, Point};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 6, tags = ["2024", "day06", "grid", "simulation"])]
pub struct Solver;

const OBSTACLE: u8 = b'#';
const FLOOR: u8 = b'.';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Facing {
    Up,
    Right,
    Down,
    Left,
}

impl Facing {
    fn from_marker(marker: u8) -> Option<Self> {
        match marker {
            b'^' => Some(Facing::Up),
            b'>' => Some(Facing::Right),
            b'v' => Some(Facing::Down),
            b'<' => Some(Facing::Left),
            _ => None,
        }
    }

    fn turn_right(self) -> Self {
        match self {
            Facing::Up => Facing::Right,
            Facing::Right => Facing::Down,
            Facing::Down => Facing::Left,
            Facing::Left => Facing::Up,
        }
    }

    fn step(self) -> Point {
        match self {
            Facing::Up => Point::new(-1, 0),
            Facing::Right => Point::new(0, 1),
            Facing::Down => Point::new(1, 0),
            Facing::Left => Point::new(0, -1),
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    LeftGrid,
    Looped,
}

#[derive(Debug)]
pub struct SharedData {
    /// Lab floor with the guard marker replaced by floor
    grid: Grid,
    start: Point,
    facing: Facing,
    /// Cells on the unobstructed patrol route, start first. Filled on first use.
    route: Option<Vec<Point>>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut grid = Grid::parse(input)?;

        let mut guards = grid.points().filter_map(|point| {
            let facing = grid.get(point).and_then(Facing::from_marker)?;
            Some((point, facing))
        });
        let (start, facing) = match (guards.next(), guards.next()) {
            (Some(guard), None) => guard,
            (None, _) => return Err(ParseError::MissingData("no guard marker (^>v<)".to_string())),
            (Some(_), Some(_)) => {
                return Err(ParseError::InvalidFormat(
                    "more than one guard marker".to_string(),
                ));
            }
        };
        drop(guards);
        grid.set(start, FLOOR);

        Ok(SharedData {
            grid,
            start,
            facing,
            route: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(route(shared)?.len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let candidates = route(shared)?.to_vec();
        let mut seen = vec![0u8; shared.grid.len()];

        // An obstacle off the route never changes the patrol; the start cell is occupied.
        let loops = candidates
            .into_iter()
            .filter(|&cell| cell != shared.start)
            .filter(|&cell| {
                patrol(&shared.grid, shared.start, shared.facing, Some(cell), &mut seen)
                    == Outcome::Looped
            })
            .count();
        Ok(loops.to_string())
    }
}

fn route(shared: &mut SharedData) -> Result<&[Point], SolveError> {
    if shared.route.is_none() {
        let mut seen = vec![0u8; shared.grid.len()];
        if patrol(&shared.grid, shared.start, shared.facing, None, &mut seen) == Outcome::Looped {
            return Err(SolveError::SolveFailed(
                "the guard never leaves the grid".into(),
            ));
        }

        let mut cells: Vec<Point> = shared
            .grid
            .points()
            .filter(|&p| shared.grid.index_of(p).is_some_and(|i| seen[i] != 0))
            .collect();
        if let Some(pos) = cells.iter().position(|&p| p == shared.start) {
            cells.swap(0, pos);
        }
        shared.route = Some(cells);
    }
    Ok(shared.route.as_deref().unwrap_or_default())
}

/// Walk until the guard leaves the grid or repeats a (cell, facing) state
///
/// `seen` is scratch space of one facing bitmask per cell; it is cleared on
/// entry and left holding the visited states. Since there are only four
/// facings per cell, the walk takes at most `4 * grid.len()` steps.
fn patrol(
    grid: &Grid,
    start: Point,
    facing: Facing,
    extra_obstacle: Option<Point>,
    seen: &mut [u8],
) -> Outcome {
    seen.fill(0);
    let (mut pos, mut facing) = (start, facing);

    loop {
        let Some(index) = grid.index_of(pos) else {
            return Outcome::LeftGrid;
        };
        if seen[index] & facing.bit() != 0 {
            return Outcome::Looped;
        }
        seen[index] |= facing.bit();

        let ahead = pos + facing.step();
        match grid.get(ahead) {
            None => return Outcome::LeftGrid,
            Some(OBSTACLE) => facing = facing.turn_right(),
            Some(_) if extra_obstacle == Some(ahead) => facing = facing.turn_right(),
            Some(_) => pos = ahead,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "
        ....#.....
        .........#
        ..........
        ..#.......
        .......#..
        ..........
        .#..^.....
        ........#.
        #.........
        ......#...
    ";

    fn solve(input: &str, part: u8) -> Result<String, SolveError> {
        let mut shared = Solver::parse(input).unwrap();
        Solver::solve_part(&mut shared, part)
    }

    #[test]
    fn test_sample_part1() {
        assert_eq!(solve(SAMPLE, 1).unwrap(), "41");
    }

    #[test]
    fn test_sample_part2() {
        assert_eq!(solve(SAMPLE, 2).unwrap(), "6");
    }

    #[test]
    fn test_route_starts_at_guard() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(shared.start, Point::new(6, 4));
        assert_eq!(shared.grid.get(shared.start), Some(FLOOR));

        let route = route(&mut shared).unwrap();
        assert_eq!(route.len(), 41);
        assert_eq!(route[0], Point::new(6, 4));
    }

    #[test]
    fn test_other_facings() {
        assert_eq!(solve("..>..", 1).unwrap(), "3");
        assert_eq!(solve("<....", 1).unwrap(), "1");
        assert_eq!(solve("..\n.v\n..", 1).unwrap(), "2");
    }

    #[test]
    fn test_turns_at_obstacle() {
        // blocked above, so it walks right
        assert_eq!(solve(".#..\n.^..\n....", 1).unwrap(), "3");
    }

    #[test]
    fn test_boxed_in_guard_is_an_error() {
        let input = ".#.\n#^#\n.#.";
        assert!(matches!(solve(input, 1), Err(SolveError::SolveFailed(_))));
    }

    #[test]
    fn test_guard_marker_errors() {
        assert!(matches!(Solver::parse("...\n.#."), Err(ParseError::MissingData(_))));
        assert!(matches!(Solver::parse("^..\n..^"), Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_patrol_reports_loop() {
        let shared = Solver::parse(".#..\n...#\n#^..\n..#.").unwrap();
        let mut seen = vec![0u8; shared.grid.len()];
        assert_eq!(
            patrol(&shared.grid, shared.start, shared.facing, None, &mut seen),
            Outcome::Looped
        );
    }
}
