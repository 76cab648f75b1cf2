use crate::blackjack::{wager, Card, Deck, Hand, InvalidWager};
use derive_more::{Display, Error, From};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument};

/// How a round of blackjack was settled.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Settlement {
    #[display(fmt = "Sorry, you lose. Dealer has a Blackjack.")]
    DealerBlackjack,
    #[display(fmt = "Congratulations, you have a Blackjack.")]
    PlayerBlackjack,
    #[display(fmt = "You've busted! Sorry, you lose on: {_0}")]
    PlayerBusted(u8),
    #[display(fmt = "You win by taking 5 cards without going over 21.")]
    PlayerFiveCards,
    #[display(fmt = "Congratulations, You win! Dealer has busted with {_0}.")]
    DealerBusted(u8),
    #[display(fmt = "Sorry, you lose. Dealer took 5 cards without going over 21.")]
    DealerFiveCards,
    #[display(fmt = "Sorry, you lose, {_0} to {_1}.")]
    DealerHigher(u8, u8),
    #[display(fmt = "Sorry, you lose. Dealer wins on a tie.")]
    Tie,
    #[display(fmt = "You win, {_0} to {_1}!")]
    PlayerHigher(u8, u8),
}

impl Settlement {
    /// Whether the player won the bet.
    pub fn is_win(&self) -> bool {
        matches!(
            self,
            Settlement::PlayerBlackjack
                | Settlement::PlayerFiveCards
                | Settlement::DealerBusted(_)
                | Settlement::PlayerHigher(..)
        )
    }
}

/// The reason why an action at the [`Table`] was not accepted.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error, From)]
pub enum Rejection {
    #[display(fmt = "You still have to finish this game!")]
    #[from(ignore)]
    GameInProgress,
    #[display(fmt = "Start a new game first.")]
    #[from(ignore)]
    NoGameInProgress,
    #[display(fmt = "{_0}")]
    InvalidWager(InvalidWager),
}

/// The advice shown to the player.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Message {
    #[display(fmt = "Welcome to Blackjack! Place your bet and start a new game.")]
    Welcome,
    #[display(fmt = "You have {_0}. Hit or Stand?")]
    HitOrStand(u8),
    #[display(fmt = "{_0}")]
    Settled(Settlement),
    #[display(fmt = "{_0}")]
    Rejected(Rejection),
}

/// A blackjack table where one player bets against the dealer.
#[derive(Debug, Clone)]
pub struct Table {
    rng: ChaCha8Rng,
    deck: Deck,
    funds: u32,
    bet: u32,
    dealer: Hand,
    player: Hand,
    in_progress: bool,
    broke: bool,
    message: Message,
}

impl Default for Table {
    fn default() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl Table {
    /// How much the player is staked with.
    pub const STAKE: u32 = 100;

    /// A table that shuffles cards with the given random number generator.
    pub fn new(mut rng: ChaCha8Rng) -> Self {
        Table {
            deck: Deck::shuffled(&mut rng),
            rng,
            funds: Self::STAKE,
            bet: 0,
            dealer: Hand::new(),
            player: Hand::new(),
            in_progress: false,
            broke: false,
            message: Message::Welcome,
        }
    }

    /// A table that deals the same cards for the same seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// How much money the player has.
    pub fn funds(&self) -> u32 {
        self.funds
    }

    /// The amount at stake in the current or last round.
    pub fn bet(&self) -> u32 {
        self.bet
    }

    /// The dealer's [`Hand`].
    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }

    /// The player's [`Hand`].
    pub fn player(&self) -> &Hand {
        &self.player
    }

    /// The dealer's cards as the player sees them.
    ///
    /// The first card stays face down while the round is in progress.
    pub fn dealer_showing(&self) -> impl Iterator<Item = Option<Card>> + '_ {
        let hidden = self.in_progress;
        (0..).zip(self.dealer.iter()).map(move |(i, &c)| match (i, hidden) {
            (0, true) => None,
            _ => Some(c),
        })
    }

    /// Whether a round is being played.
    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// Whether the player lost everything in the last round and was staked again.
    pub fn went_broke(&self) -> bool {
        self.broke
    }

    /// What the player should be told.
    pub fn message(&self) -> Message {
        self.message
    }

    /// Starts a round betting the amount in `input`.
    ///
    /// Both hands are dealt two cards, the dealer first, and the round ends right away if either
    /// of them has a blackjack.
    #[instrument(level = "trace", skip(self), err)]
    pub fn new_game(&mut self, input: &str) -> Result<Message, Rejection> {
        if self.in_progress {
            return self.reject(Rejection::GameInProgress);
        }

        self.broke = false;
        self.bet = match wager(input, self.funds) {
            Ok(bet) => bet,
            Err(e) => return self.reject(e.into()),
        };

        self.deck = Deck::shuffled(&mut self.rng);
        self.dealer = Hand::new();
        self.player = Hand::new();

        for _ in 0..2 {
            self.dealer.add(self.deck.deal(&mut self.rng));
        }

        for _ in 0..2 {
            self.player.add(self.deck.deal(&mut self.rng));
        }

        info!(bet = self.bet, dealer = %self.dealer, player = %self.player, "round started");

        if self.dealer.value() == 21 {
            Ok(self.settle(Settlement::DealerBlackjack))
        } else if self.player.value() == 21 {
            Ok(self.settle(Settlement::PlayerBlackjack))
        } else {
            self.in_progress = true;
            self.message = Message::HitOrStand(self.player.value());
            Ok(self.message)
        }
    }

    /// Deals the player another card.
    #[instrument(level = "trace", skip(self), err)]
    pub fn hit(&mut self) -> Result<Message, Rejection> {
        if !self.in_progress {
            return self.reject(Rejection::NoGameInProgress);
        }

        let card = self.deck.deal(&mut self.rng);
        self.player.add(card);
        debug!(%card, value = self.player.value(), "player hits");

        if self.player.is_bust() {
            Ok(self.settle(Settlement::PlayerBusted(self.player.value())))
        } else if self.player.is_full() {
            Ok(self.settle(Settlement::PlayerFiveCards))
        } else {
            self.message = Message::HitOrStand(self.player.value());
            Ok(self.message)
        }
    }

    /// Ends the player's turn and lets the dealer draw.
    ///
    /// The dealer draws until reaching 17 or holding five cards.
    #[instrument(level = "trace", skip(self), err)]
    pub fn stand(&mut self) -> Result<Message, Rejection> {
        if !self.in_progress {
            return self.reject(Rejection::NoGameInProgress);
        }

        while self.dealer.value() <= 16 && !self.dealer.is_full() {
            let card = self.deck.deal(&mut self.rng);
            self.dealer.add(card);
            debug!(%card, value = self.dealer.value(), "dealer draws");
        }

        let (d, p) = (self.dealer.value(), self.player.value());

        let settlement = if self.dealer.is_bust() {
            Settlement::DealerBusted(d)
        } else if self.dealer.is_full() {
            Settlement::DealerFiveCards
        } else if d > p {
            Settlement::DealerHigher(d, p)
        } else if d == p {
            Settlement::Tie
        } else {
            Settlement::PlayerHigher(p, d)
        };

        Ok(self.settle(settlement))
    }

    fn settle(&mut self, settlement: Settlement) -> Message {
        self.in_progress = false;

        if settlement.is_win() {
            self.funds = self.funds.saturating_add(self.bet);
        } else {
            self.funds = self.funds.saturating_sub(self.bet);
        }

        info!(%settlement, funds = self.funds, "round settled");

        if self.funds == 0 {
            info!(stake = Self::STAKE, "player went broke");
            self.funds = Self::STAKE;
            self.broke = true;
        }

        self.message = Message::Settled(settlement);
        self.message
    }

    fn reject<T>(&mut self, r: Rejection) -> Result<T, Rejection> {
        debug!(rejection = %r, "action rejected");
        self.message = Message::Rejected(r);
        Err(r)
    }
}
