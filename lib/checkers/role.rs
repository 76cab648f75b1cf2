use derive_more::Display;
use test_strategy::Arbitrary;

/// The rank of a checkers [`Piece`][`crate::checkers::Piece`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Arbitrary)]
#[repr(u8)]
pub enum Role {
    /// Moves diagonally forward only.
    #[display(fmt = "man")]
    Man,
    /// Moves diagonally in either direction.
    #[display(fmt = "king")]
    King,
}
