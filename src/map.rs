// ── Occupancy map ─────────────────────────────────────────────────────────────
//
// A fixed grid of open / blocking cells addressed by (row, column).  Every
// query outside the grid resolves to blocking, so callers never need their
// own bounds checks.

use glam::Vec2;

use crate::error::GameError;

/// Built-in 24 × 24 level used when no config overrides it.
pub const DEFAULT_LEVEL: [&str; 24] = [
    "########################",
    "#......................#",
    "#......................#",
    "#......................#",
    "#.....####....####.....#",
    "#.....#..........#.....#",
    "#.....#..........#.....#",
    "#.........####.........#",
    "#.........#..#.........#",
    "#......................#",
    "#......................#",
    "#..####..........####..#",
    "#.....#..........#.....#",
    "#.....#...####...#.....#",
    "#......................#",
    "#......................#",
    "#......................#",
    "#...#####......#####...#",
    "#......................#",
    "#......................#",
    "#......................#",
    "#......................#",
    "#......................#",
    "########################",
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Open,
    Blocking,
}

impl Cell {
    fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '#' | '1' => Some(Cell::Blocking),
            '.' | '0' | ' ' => Some(Cell::Open),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OccupancyMap {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl OccupancyMap {
    /// Parse a level from row strings.  All rows must share the first row's
    /// width.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GameError> {
        let first = rows.first().ok_or(GameError::EmptyMap)?;
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(GameError::EmptyMap);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(GameError::MapShape { row, expected: width, found });
            }
            for (col, glyph) in line.chars().enumerate() {
                let cell = Cell::from_glyph(glyph)
                    .ok_or(GameError::MapGlyph { row, col, glyph })?;
                cells.push(cell);
            }
        }

        Ok(Self { width, height: rows.len(), cells })
    }

    /// The built-in level.
    pub fn default_level() -> Self {
        // An unparsable constant degrades to an empty 24×24 room.
        Self::from_rows(&DEFAULT_LEVEL).unwrap_or_else(|_| Self::walled(24, 24))
    }

    /// An open room of the given size surrounded by a one-cell wall ring.
    pub fn walled(width: usize, height: usize) -> Self {
        let mut cells = vec![Cell::Open; width * height];
        for row in 0..height {
            for col in 0..width {
                if row == 0 || col == 0 || row + 1 == height || col + 1 == width {
                    cells[row * width + col] = Cell::Blocking;
                }
            }
        }
        Self { width, height, cells }
    }

    /// A grid with no blocking cells at all.  Off-grid queries still block.
    pub fn open(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![Cell::Open; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, row: i32, col: i32) -> Cell {
        if row < 0 || col < 0 {
            return Cell::Blocking;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.height || col >= self.width {
            return Cell::Blocking;
        }
        self.cells[row * self.width + col]
    }

    /// Fail-closed occupancy query.
    #[inline]
    pub fn is_blocking(&self, row: i32, col: i32) -> bool {
        self.cell(row, col) == Cell::Blocking
    }

    /// Occupancy of the cell containing a world position.
    #[inline]
    pub fn is_blocking_at(&self, pos: Vec2) -> bool {
        if !pos.x.is_finite() || !pos.y.is_finite() {
            return true;
        }
        self.is_blocking(pos.y.floor() as i32, pos.x.floor() as i32)
    }

    /// Iterate `(row, col)` of every blocking cell inside the grid.
    pub fn blocking_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Blocking)
            .map(move |(i, _)| (i / self.width, i % self.width))
    }
}
