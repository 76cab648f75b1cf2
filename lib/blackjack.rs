mod card;
mod deck;
mod hand;
mod table;
mod wager;

pub use card::*;
pub use deck::*;
pub use hand::*;
pub use table::*;
pub use wager::*;
