use derive_more::Display;
use std::ops::Not;
use test_strategy::Arbitrary;

/// The color of a checkers [`Piece`][`crate::checkers::Piece`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
#[repr(u8)]
pub enum Color {
    #[display(fmt = "red")]
    Red,
    #[display(fmt = "black")]
    Black,
}

impl Color {
    /// The row direction in which men of this color advance.
    ///
    /// Red starts at the bottom of the board and moves towards row 0.
    pub fn forward(&self) -> i8 {
        match self {
            Color::Red => -1,
            Color::Black => 1,
        }
    }

    /// The row on which men of this color are crowned.
    pub fn crowning_row(&self) -> u8 {
        match self {
            Color::Red => 0,
            Color::Black => 7,
        }
    }
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}
