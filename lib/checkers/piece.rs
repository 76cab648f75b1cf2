use crate::checkers::{Color, Role};
use derive_more::{Display, Error};
use std::fmt::{self, Formatter, Write};
use std::str::FromStr;
use test_strategy::Arbitrary;

/// A checkers [piece][`Role`] of a certain [`Color`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
pub struct Piece(pub Color, pub Role);

impl Piece {
    /// This piece's [`Color`].
    pub fn color(&self) -> Color {
        self.0
    }

    /// This piece's [`Role`].
    pub fn role(&self) -> Role {
        self.1
    }

    /// Whether this piece is a king.
    pub fn is_king(&self) -> bool {
        self.role() == Role::King
    }

    /// This piece crowned king.
    pub fn crown(&self) -> Self {
        Piece(self.color(), Role::King)
    }

    /// The row directions in which this piece may move.
    pub fn directions(&self) -> &'static [i8] {
        match (self.role(), self.color()) {
            (Role::King, _) => &[1, -1],
            (Role::Man, Color::Black) => &[1],
            (Role::Man, Color::Red) => &[-1],
        }
    }
}

/// Men are printed as `r` and `b`, kings as `R` and `B`.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (self.color(), self.role()) {
            (Color::Red, Role::Man) => f.write_char('r'),
            (Color::Black, Role::Man) => f.write_char('b'),
            (Color::Red, Role::King) => f.write_char('R'),
            (Color::Black, Role::King) => f.write_char('B'),
        }
    }
}

/// The reason why parsing [`Piece`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse piece")]
pub struct ParsePieceError;

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "r" => Ok(Piece(Color::Red, Role::Man)),
            "b" => Ok(Piece(Color::Black, Role::Man)),
            "R" => Ok(Piece(Color::Red, Role::King)),
            "B" => Ok(Piece(Color::Black, Role::King)),
            _ => Err(ParsePieceError),
        }
    }
}
