/// Blackjack against the dealer.
pub mod blackjack;
/// Checkers domain types and rules.
pub mod checkers;
/// The depth charge arcade simulation.
pub mod depthcharge;
