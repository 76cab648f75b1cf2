use crate::depthcharge::World;

/// The boat that drops depth charges, sailing along the surface.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Boat {
    x: i32,
    y: i32,
}

impl Default for Boat {
    fn default() -> Self {
        Self::new()
    }
}

impl Boat {
    /// How far the boat moves on each key press.
    pub const STEP: i32 = 15;

    /// A boat in the middle of the surface.
    pub fn new() -> Self {
        Boat {
            x: World::WIDTH / 2,
            y: 80,
        }
    }

    /// The horizontal position of the boat's center.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// The vertical position of the boat's center.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Moves the boat one [`Boat::STEP`] to the left.
    pub fn port(&mut self) {
        self.x -= Self::STEP;
    }

    /// Moves the boat one [`Boat::STEP`] to the right.
    pub fn starboard(&mut self) {
        self.x += Self::STEP;
    }

    /// Brings the boat back within the field.
    pub fn update(&mut self) {
        self.x = self.x.clamp(0, World::WIDTH);
    }
}
