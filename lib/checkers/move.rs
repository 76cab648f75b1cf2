use crate::checkers::{ParseSquareError, Square};
use derive_more::{DebugCustom, Display, Error, From};
use std::{fmt, str::FromStr};
use test_strategy::Arbitrary;

/// A checkers move from one [`Square`] to another.
///
/// This type makes no guarantee that the move is legal.
#[derive(DebugCustom, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
#[filter(#self.0 != #self.1)]
#[debug(fmt = "Move({self})")]
pub struct Move(pub Square, pub Square);

impl Move {
    /// The source [`Square`].
    pub fn whence(&self) -> Square {
        self.0
    }

    /// The destination [`Square`].
    pub fn whither(&self) -> Square {
        self.1
    }

    /// Whether this is a capture.
    ///
    /// A jump always spans two rows, whereas a simple move spans only one.
    pub fn is_jump(&self) -> bool {
        self.whence().row().abs_diff(self.whither().row()) == 2
    }

    /// The [`Square`] jumped over, if this is a capture.
    pub fn captured(&self) -> Option<Square> {
        if self.is_jump() {
            Square::new(
                (self.whence().row() + self.whither().row()) / 2,
                (self.whence().col() + self.whither().col()) / 2,
            )
        } else {
            None
        }
    }
}

/// Simple moves are printed as `c3-d4` and jumps as `c3xe5`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.is_jump() { 'x' } else { '-' };
        write!(f, "{}{separator}{}", self.whence(), self.whither())
    }
}

/// The reason why parsing [`Move`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseMoveError {
    #[display(fmt = "failed to parse move")]
    InvalidSquare(ParseSquareError),
    #[display(fmt = "failed to parse move")]
    #[from(ignore)]
    InvalidSyntax,
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (whence, whither) = match s.len() {
            4 => (s.get(..2), s.get(2..)),
            5 if matches!(s.get(2..3), Some("-" | "x")) => (s.get(..2), s.get(3..)),
            _ => return Err(ParseMoveError::InvalidSyntax),
        };

        match (whence, whither) {
            (Some(a), Some(b)) => Ok(Move(a.parse()?, b.parse()?)),
            _ => Err(ParseMoveError::InvalidSyntax),
        }
    }
}
