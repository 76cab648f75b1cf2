use super::Color;
use derive_more::Display;
use test_strategy::Arbitrary;

/// One of the possible outcomes of a checkers game.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
pub enum Outcome {
    #[display(fmt = "{_0} resigns, {} wins", "!*_0")]
    Resignation(Color),

    #[display(fmt = "{_0} has no moves, {} wins", "!*_0")]
    Blocked(Color),
}

impl Outcome {
    /// The winning side.
    ///
    /// Checkers has no draws here, the side that resigns or runs out of moves always loses.
    pub fn winner(&self) -> Color {
        !self.loser()
    }

    /// The losing side.
    pub fn loser(&self) -> Color {
        match *self {
            Outcome::Resignation(c) | Outcome::Blocked(c) => c,
        }
    }
}
