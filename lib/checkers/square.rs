use derive_more::{Display, Error};
use std::{fmt, str::FromStr};
use test_strategy::Arbitrary;

/// A square on the checkers board.
///
/// Row 0 is the top of the board, where black starts, and row 7 is the bottom, where red starts.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Arbitrary)]
pub struct Square {
    #[strategy(0u8..8)]
    row: u8,
    #[strategy(0u8..8)]
    col: u8,
}

impl Square {
    /// The number of rows and columns on the board.
    pub const SIDE: u8 = 8;

    /// The width of a square in pixels when the board is drawn.
    pub const PIXELS: f64 = 40.;

    /// The width of the border around the drawn board in pixels.
    pub const BORDER: f64 = 2.;

    /// Constructs [`Square`] from a pair of row and column, if both are on the board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if row < Self::SIDE && col < Self::SIDE {
            Some(Square { row, col })
        } else {
            None
        }
    }

    /// Maps the pixel coordinates of a press on the drawn board to the [`Square`] under it.
    ///
    /// Coordinates are relative to the top-left corner of the canvas, border included.
    /// Presses that fall outside of the 8x8 grid map to nothing.
    pub fn from_pixel(x: f64, y: f64) -> Option<Self> {
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }

        // Truncation rounds towards zero, so the border pixels belong to the outermost squares.
        let col = ((x - Self::BORDER) / Self::PIXELS) as i32;
        let row = ((y - Self::BORDER) / Self::PIXELS) as i32;
        Square::new(row.try_into().ok()?, col.try_into().ok()?)
    }

    /// This square's row.
    pub fn row(&self) -> u8 {
        self.row
    }

    /// This square's column.
    pub fn col(&self) -> u8 {
        self.col
    }

    /// Whether pieces may stand on this square.
    pub fn is_dark(&self) -> bool {
        self.row % 2 == self.col % 2
    }

    /// The square displaced by some number of rows and columns, if still on the board.
    pub fn offset(&self, rows: i8, cols: i8) -> Option<Self> {
        let row = self.row.checked_add_signed(rows)?;
        let col = self.col.checked_add_signed(cols)?;
        Square::new(row, col)
    }

    /// An iterator over all squares in row-major order.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + Clone {
        (0..Self::SIDE).flat_map(|row| (0..Self::SIDE).map(move |col| Square { row, col }))
    }

    /// An iterator over the dark squares in row-major order.
    pub fn dark() -> impl DoubleEndedIterator<Item = Self> + Clone {
        Self::iter().filter(Square::is_dark)
    }
}

/// Squares are printed as a file letter followed by a rank digit, rank 1 being the bottom row.
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from(b'a' + self.col);
        let rank = char::from(b'0' + Self::SIDE - self.row);
        write!(f, "{file}{rank}")
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse square")]
pub struct ParseSquareError;

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            &[file @ b'a'..=b'h', rank @ b'1'..=b'8'] => {
                Square::new(Self::SIDE - (rank - b'0'), file - b'a').ok_or(ParseSquareError)
            }

            _ => Err(ParseSquareError),
        }
    }
}
