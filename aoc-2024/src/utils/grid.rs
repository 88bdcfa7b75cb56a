//! Rectangular byte grid addressed by signed (row, col) points

use aoc_solver::ParseError;
use std::fmt;
use std::ops::Add;

/// A grid position; may lie outside the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: isize,
    pub col: isize,
}

impl Point {
    pub const fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Row-major grid of ASCII cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Parse trimmed, non-blank lines into a grid
    ///
    /// Every row must have the same width and the grid must not be empty.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut width = None;
        let mut cells = Vec::new();
        let mut height = 0;

        for (line_no, line) in super::parse::numbered_lines(input) {
            match width {
                None => width = Some(line.len()),
                Some(w) if w != line.len() => {
                    return Err(ParseError::InvalidFormat(format!(
                        "(line {}) row has width {}, expected {}",
                        line_no,
                        line.len(),
                        w
                    )));
                }
                Some(_) => {}
            }
            cells.extend_from_slice(line.as_bytes());
            height += 1;
        }

        let width = width.ok_or_else(|| ParseError::MissingData("empty grid".to_string()))?;
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of `point`, or `None` when it lies outside the grid
    #[inline]
    pub fn index_of(&self, point: Point) -> Option<usize> {
        let row = usize::try_from(point.row).ok()?;
        let col = usize::try_from(point.col).ok()?;
        (row < self.height && col < self.width).then_some(row * self.width + col)
    }

    #[inline]
    pub fn get(&self, point: Point) -> Option<u8> {
        self.index_of(point).map(|i| self.cells[i])
    }

    /// Overwrite the cell at `point`; returns the previous value, or `None` if outside
    pub fn set(&mut self, point: Point, value: u8) -> Option<u8> {
        let index = self.index_of(point)?;
        Some(std::mem::replace(&mut self.cells[index], value))
    }

    /// All positions in row-major order
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height as isize)
            .flat_map(move |row| (0..self.width as isize).map(move |col| Point::new(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_get() {
        let grid = Grid::parse("  ab\n  cd\n\n").unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 2));
        assert_eq!(grid.get(Point::new(1, 0)), Some(b'c'));
        assert_eq!(grid.get(Point::new(-1, 0)), None);
        assert_eq!(grid.get(Point::new(0, 2)), None);
        assert_eq!(grid.get(Point::new(2, 0)), None);
    }

    #[test]
    fn test_ragged_grid_rejected() {
        let err = Grid::parse("abc\nab\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(msg) if msg.contains("line 2")));
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert!(matches!(Grid::parse("\n \n"), Err(ParseError::MissingData(_))));
    }

    #[test]
    fn test_set() {
        let mut grid = Grid::parse("..\n.#").unwrap();
        assert_eq!(grid.set(Point::new(0, 1), b'#'), Some(b'.'));
        assert_eq!(grid.set(Point::new(5, 5), b'#'), None);

        let walls: Vec<_> = grid.points().filter(|&p| grid.get(p) == Some(b'#')).collect();
        assert_eq!(walls, vec![Point::new(0, 1), Point::new(1, 1)]);
        assert_eq!(grid.points().count(), grid.len());
    }
}
