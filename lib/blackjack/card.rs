use derive_more::Display;
use std::fmt;
use test_strategy::Arbitrary;

/// The rank of a playing [`Card`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Arbitrary)]
#[repr(u8)]
pub enum Rank {
    #[display(fmt = "A")]
    Ace = 1,
    #[display(fmt = "2")]
    Two,
    #[display(fmt = "3")]
    Three,
    #[display(fmt = "4")]
    Four,
    #[display(fmt = "5")]
    Five,
    #[display(fmt = "6")]
    Six,
    #[display(fmt = "7")]
    Seven,
    #[display(fmt = "8")]
    Eight,
    #[display(fmt = "9")]
    Nine,
    #[display(fmt = "10")]
    Ten,
    #[display(fmt = "J")]
    Jack,
    #[display(fmt = "Q")]
    Queen,
    #[display(fmt = "K")]
    King,
}

impl Rank {
    /// All ranks from ace to king.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        use Rank::*;
        [
            Ace, Two, Three, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King,
        ]
        .into_iter()
    }

    /// The numeric value of this rank, from 1 for the ace to 13 for the king.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// How many points this rank is worth, counting the ace as 1.
    pub fn points(&self) -> u8 {
        self.value().min(10)
    }
}

/// The suit of a playing [`Card`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
pub enum Suit {
    #[display(fmt = "♠")]
    Spades,
    #[display(fmt = "♥")]
    Hearts,
    #[display(fmt = "♦")]
    Diamonds,
    #[display(fmt = "♣")]
    Clubs,
}

impl Suit {
    /// All four suits.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs].into_iter()
    }
}

/// A playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
pub struct Card(pub Rank, pub Suit);

impl Card {
    /// This card's [`Rank`].
    pub fn rank(&self) -> Rank {
        self.0
    }

    /// This card's [`Suit`].
    pub fn suit(&self) -> Suit {
        self.1
    }

    /// The 52 cards of a standard deck, suit by suit.
    pub fn iter() -> impl Iterator<Item = Self> {
        Suit::iter().flat_map(|s| Rank::iter().map(move |r| Card(r, s)))
    }
}

/// Cards are printed as rank followed by suit, e.g. `10♥`.
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use test_strategy::proptest;

    #[test]
    fn there_are_52_distinct_cards() {
        assert_eq!(Card::iter().collect::<HashSet<_>>().len(), 52);
    }

    #[test]
    fn ranks_are_numbered_from_ace_to_king() {
        assert_eq!(Rank::iter().map(|r| r.value()).collect::<Vec<_>>(), (1..=13).collect::<Vec<_>>());
    }

    #[test]
    fn face_cards_are_worth_ten_points() {
        assert_eq!(Rank::Jack.points(), 10);
        assert_eq!(Rank::Queen.points(), 10);
        assert_eq!(Rank::King.points(), 10);
        assert_eq!(Rank::Ace.points(), 1);
    }

    #[proptest]
    fn points_never_exceed_ten(r: Rank) {
        assert!((1..=10).contains(&r.points()));
    }

    #[test]
    fn card_is_printed_as_rank_and_suit() {
        assert_eq!(Card(Rank::Ten, Suit::Hearts).to_string(), "10♥");
        assert_eq!(Card(Rank::Ace, Suit::Spades).to_string(), "A♠");
    }
}
