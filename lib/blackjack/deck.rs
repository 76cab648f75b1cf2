use crate::blackjack::Card;
use arrayvec::ArrayVec;
use rand::{seq::SliceRandom, Rng};
use tracing::trace;

/// A shuffled deck of playing cards.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Deck(ArrayVec<Card, 52>);

impl Deck {
    /// A full deck of 52 cards in random order.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards: ArrayVec<Card, 52> = Card::iter().collect();
        cards.shuffle(rng);
        Deck(cards)
    }

    /// How many cards are left.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether every card has been dealt.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Deals the top card.
    ///
    /// A depleted deck is replenished and reshuffled first.
    pub fn deal<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Card {
        loop {
            match self.0.pop() {
                Some(card) => return card,
                None => {
                    trace!("reshuffling depleted deck");
                    *self = Deck::shuffled(rng);
                }
            }
        }
    }
}
