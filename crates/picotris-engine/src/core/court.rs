use std::fmt;

use crate::CellOutOfCourtError;

use super::{COURT_HEIGHT, COURT_WIDTH, piece::Piece};

/// A single cell of the court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    /// Occupied by a block of a settled piece.
    Filled,
}

type Row = [Cell; COURT_WIDTH];

const EMPTY_ROW: Row = [Cell::Empty; COURT_WIDTH];

/// The playfield: a fixed `10×12` grid of cells.
///
/// Row 0 is the top of the court, x grows to the right and y grows downwards.
///
/// Reads are bounds-tolerant: [`Court::get`] reports anything outside the
/// court as [`Cell::Empty`]. Placement checks go through
/// [`Court::is_occupied`], which treats out-of-bounds blocks as collisions.
///
/// # Example
///
/// ```
/// use picotris_engine::{Cell, Court, Piece, PieceKind};
///
/// let mut court = Court::EMPTY;
/// let piece = Piece::new(PieceKind::O);
/// assert!(court.is_unoccupied(&piece));
///
/// court.fill_piece(&piece);
/// assert_eq!(court.get(4, 0), Cell::Filled);
/// assert!(court.is_occupied(&piece));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Court {
    rows: [Row; COURT_HEIGHT],
}

impl Default for Court {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Court {
    pub const WIDTH: usize = COURT_WIDTH;
    pub const HEIGHT: usize = COURT_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; COURT_HEIGHT],
    };

    fn index(x: i32, y: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|x| *x < COURT_WIDTH)?;
        let y = usize::try_from(y).ok().filter(|y| *y < COURT_HEIGHT)?;
        Some((x, y))
    }

    /// Returns the cell at `(x, y)`, or [`Cell::Empty`] outside the court.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Cell {
        Self::index(x, y).map_or(Cell::Empty, |(x, y)| self.rows[y][x])
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> Result<(), CellOutOfCourtError> {
        let (cx, cy) = Self::index(x, y).ok_or(CellOutOfCourtError { x, y })?;
        self.rows[cy][cx] = cell;
        Ok(())
    }

    pub fn clear_all(&mut self) {
        self.rows = [EMPTY_ROW; COURT_HEIGHT];
    }

    /// Removes `target_row` by moving every row above it down by one.
    ///
    /// Row 0 is left empty. A `target_row` outside the court does nothing.
    pub fn shift_rows_down(&mut self, target_row: usize) {
        if target_row >= COURT_HEIGHT {
            return;
        }
        self.rows.copy_within(0..target_row, 1);
        self.rows[0] = EMPTY_ROW;
    }

    #[must_use]
    pub fn is_row_complete(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_filled()))
    }

    /// Removes every complete row and returns how many were removed.
    ///
    /// Rows are scanned from the bottom row up to row 0. After a row is
    /// removed the same index is examined again, since the row above has
    /// moved into it.
    pub fn remove_complete_rows(&mut self) -> usize {
        let mut removed = 0;
        let mut y = COURT_HEIGHT;
        while y > 0 {
            if self.is_row_complete(y - 1) {
                self.shift_rows_down(y - 1);
                removed += 1;
            } else {
                y -= 1;
            }
        }
        removed
    }

    /// Returns whether `piece` would leave the court or overlap a filled cell.
    #[must_use]
    pub fn is_occupied(&self, piece: &Piece) -> bool {
        piece.positioned_blocks().iter().any(|block| {
            Self::index(block.x, block.y).is_none_or(|(x, y)| self.rows[y][x].is_filled())
        })
    }

    #[must_use]
    pub fn is_unoccupied(&self, piece: &Piece) -> bool {
        !self.is_occupied(piece)
    }

    /// Marks the cells covered by `piece` as filled.
    ///
    /// Blocks outside the court are skipped.
    pub fn fill_piece(&mut self, piece: &Piece) {
        for block in piece.positioned_blocks() {
            if let Some((x, y)) = Self::index(block.x, block.y) {
                self.rows[y][x] = Cell::Filled;
            }
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell; COURT_WIDTH]> {
        self.rows.iter()
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.rows.iter().flatten().filter(|cell| cell.is_filled()).count()
    }

    /// Builds a court from an ASCII picture, bottom-aligned.
    ///
    /// `#` is a filled cell and any other character is empty. Lines beyond the
    /// court size are ignored. Intended for tests and tooling.
    ///
    /// ```
    /// use picotris_engine::{Cell, Court};
    ///
    /// let court = Court::from_ascii("##########\n#########.");
    /// assert!(court.is_row_complete(Court::HEIGHT - 2));
    /// assert!(!court.is_row_complete(Court::HEIGHT - 1));
    /// assert_eq!(court.get(9, 11), Cell::Empty);
    /// ```
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let mut court = Self::EMPTY;
        let skip = lines.len().saturating_sub(COURT_HEIGHT);
        let top = COURT_HEIGHT - (lines.len() - skip);
        for (row, line) in court.rows[top..].iter_mut().zip(&lines[skip..]) {
            for (cell, c) in row.iter_mut().zip(line.chars()) {
                if c == '#' {
                    *cell = Cell::Filled;
                }
            }
        }
        court
    }
}

/// One line per row, `#` for filled and `.` for empty cells.
impl fmt::Display for Court {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                f.write_str(if cell.is_filled() { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}
