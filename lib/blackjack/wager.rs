use derive_more::{Display, Error};

/// The reason why a wager was refused.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum InvalidWager {
    #[display(fmt = "Bet amount must be an integer!")]
    NotAnInteger,
    #[display(fmt = "The bet amount can't be more than you have!")]
    ExceedsFunds,
    #[display(fmt = "The bet has to be a positive number")]
    NotPositive,
}

/// Validates the amount a player wants to bet given how much they have.
///
/// The input must be a 32 bit integer, no more than `funds`, and positive, checked in that order.
pub fn wager(input: &str, funds: u32) -> Result<u32, InvalidWager> {
    let bet: i32 = input.parse().map_err(|_| InvalidWager::NotAnInteger)?;

    if i64::from(bet) > i64::from(funds) {
        return Err(InvalidWager::ExceedsFunds);
    }

    u32::try_from(bet)
        .ok()
        .filter(|&bet| bet > 0)
        .ok_or(InvalidWager::NotPositive)
}
