//! Board cells and rank-file notation.
//!
//! Row 0 is rank 8 and row 7 is rank 1, so White advances toward decreasing
//! row indices. Column 0 is the `a` file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChessError, ChessResult};

pub const BOARD_SIZE: u8 = 8;

/// A single cell of the board. Always on the board once constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate {
    row: u8,
    column: u8,
}

impl Coordinate {
    pub fn new(row: u8, column: u8) -> ChessResult<Self> {
        if row < BOARD_SIZE && column < BOARD_SIZE {
            Ok(Self { row, column })
        } else {
            Err(ChessError::InvalidCoordinate(format!("({row}, {column})")))
        }
    }

    /// Crate-internal constructor for indices already known to be in range.
    pub(crate) const fn at(row: u8, column: u8) -> Self {
        debug_assert!(row < BOARD_SIZE && column < BOARD_SIZE);
        Self { row, column }
    }

    /// Parse a file+rank token such as `e2`.
    pub fn from_notation(text: &str) -> ChessResult<Self> {
        let invalid = || ChessError::InvalidCoordinate(text.to_string());
        let b = text.as_bytes();
        if b.len() != 2 {
            return Err(invalid());
        }
        let (file, rank) = (b[0], b[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(invalid());
        }
        Ok(Self {
            row: b'8' - rank,
            column: file - b'a',
        })
    }

    pub fn to_notation(self) -> String {
        let f = (b'a' + self.column) as char;
        let r = (b'8' - self.row) as char;
        format!("{f}{r}")
    }

    #[inline]
    pub fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub fn column(self) -> u8 {
        self.column
    }

    /// The cell `d_row` rows and `d_column` columns away, or `None` when that
    /// falls off the board.
    pub fn offset(self, d_row: i8, d_column: i8) -> Option<Coordinate> {
        let row = self.row as i8 + d_row;
        let column = self.column as i8 + d_column;
        let size = BOARD_SIZE as i8;
        if (0..size).contains(&row) && (0..size).contains(&column) {
            Some(Coordinate {
                row: row as u8,
                column: column as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn row_distance(self, other: Coordinate) -> u8 {
        self.row.abs_diff(other.row)
    }

    #[inline]
    pub fn column_distance(self, other: Coordinate) -> u8 {
        self.column.abs_diff(other.column)
    }

    /// Signed (row, column) vector from `self` to `other`.
    #[inline]
    pub fn delta_to(self, other: Coordinate) -> (i8, i8) {
        (
            other.row as i8 - self.row as i8,
            other.column as i8 - self.column as i8,
        )
    }

    /// All 64 cells, rank 8 first.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |column| Coordinate { row, column }))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}

impl FromStr for Coordinate {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coordinate::from_notation(s)
    }
}

impl TryFrom<String> for Coordinate {
    type Error = ChessError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Coordinate::from_notation(&value)
    }
}

impl From<Coordinate> for String {
    fn from(c: Coordinate) -> Self {
        c.to_notation()
    }
}

#[cfg(test)]
#[path = "coord_tests.rs"]
mod coord_tests;
