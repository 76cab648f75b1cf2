use crate::blackjack::{Card, Rank};
use arrayvec::ArrayVec;
use derive_more::Deref;
use std::fmt;

/// The cards dealt to the player or the dealer.
///
/// A round always ends before a hand grows past [`Hand::MAX`] cards.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash, Deref)]
pub struct Hand(ArrayVec<Card, 5>);

impl Hand {
    /// The most cards a hand can hold.
    pub const MAX: usize = 5;

    /// An empty hand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a card to this hand.
    ///
    /// Adding a card to a full hand is a logic error.
    pub fn add(&mut self, card: Card) {
        debug_assert!(!self.is_full());
        self.0.push(card);
    }

    /// Whether this hand holds [`Hand::MAX`] cards.
    pub fn is_full(&self) -> bool {
        self.0.is_full()
    }

    /// The blackjack value of this hand.
    ///
    /// Aces count as 1, unless counting one of them as 11 keeps the hand at 21 or below.
    pub fn value(&self) -> u8 {
        let sum: u8 = self.iter().map(|c| c.rank().points()).sum();
        let ace = self.iter().any(|c| c.rank() == Rank::Ace);

        if ace && sum + 10 <= 21 {
            sum + 10
        } else {
            sum
        }
    }

    /// Whether this hand is worth more than 21.
    pub fn is_bust(&self) -> bool {
        self.value() > 21
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut hand = Hand::new();
        for card in iter {
            hand.add(card);
        }

        hand
    }
}

/// Cards are separated by spaces.
impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }

            fmt::Display::fmt(card, f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blackjack::Suit;
    use proptest::{collection::vec, prelude::*};
    use test_strategy::proptest;

    fn hand(ranks: &[Rank]) -> Hand {
        ranks.iter().map(|&r| Card(r, Suit::Clubs)).collect()
    }

    #[test]
    fn empty_hand_is_worth_nothing() {
        assert_eq!(Hand::new().value(), 0);
    }

    #[test]
    fn ace_counts_as_eleven_when_it_fits() {
        assert_eq!(hand(&[Rank::Ace, Rank::King]).value(), 21);
        assert_eq!(hand(&[Rank::Ace, Rank::Five, Rank::Five]).value(), 21);
        assert_eq!(hand(&[Rank::Ace, Rank::Ace]).value(), 12);
    }

    #[test]
    fn ace_counts_as_one_when_eleven_would_bust() {
        assert_eq!(hand(&[Rank::Ace, Rank::Six, Rank::Queen]).value(), 17);
        assert_eq!(hand(&[Rank::Ace, Rank::Ace, Rank::King, Rank::Queen]).value(), 22);
    }

    #[test]
    fn face_cards_are_worth_ten() {
        assert_eq!(hand(&[Rank::Jack, Rank::Queen, Rank::Two]).value(), 22);
        assert!(hand(&[Rank::Jack, Rank::Queen, Rank::Two]).is_bust());
    }

    #[proptest]
    fn at_most_one_ace_is_counted_as_eleven(
        #[strategy(vec(any::<Card>(), 0..=Hand::MAX))] cards: Vec<Card>,
    ) {
        let h: Hand = cards.iter().copied().collect();
        let low: u8 = cards.iter().map(|c| c.rank().points()).sum();
        assert!(h.value() == low || h.value() == low + 10);
    }

    #[proptest]
    fn hands_over_eleven_count_every_ace_as_one(
        #[strategy(vec(any::<Card>(), 0..=Hand::MAX))] cards: Vec<Card>,
    ) {
        let low: u8 = cards.iter().map(|c| c.rank().points()).sum();
        prop_assume!(low > 11);
        assert_eq!(cards.into_iter().collect::<Hand>().value(), low);
    }

    #[test]
    fn hand_is_printed_as_space_separated_cards() {
        let h: Hand = [Card(Rank::Ace, Suit::Spades), Card(Rank::Ten, Suit::Hearts)]
            .into_iter()
            .collect();

        assert_eq!(h.to_string(), "A♠ 10♥");
    }
}
