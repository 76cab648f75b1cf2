mod boat;
mod charge;
mod submarine;
mod world;

pub use boat::*;
pub use charge::*;
pub use submarine::*;
pub use world::*;
