use crate::depthcharge::{Boat, Submarine, World};
use tracing::debug;

/// The depth charge, either hanging from the [`Boat`] or sinking towards the [`Submarine`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Charge {
    x: i32,
    y: i32,
    falling: bool,
}

impl Charge {
    /// How far the charge sinks on each frame.
    pub const SPEED: i32 = 6;

    /// A charge hanging from a [`Boat`].
    pub fn new(boat: &Boat) -> Self {
        let mut charge = Charge {
            x: 0,
            y: 0,
            falling: false,
        };

        charge.attach(boat);
        charge
    }

    /// The horizontal position of the charge's center.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// The vertical position of the charge's center.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Whether the charge has been dropped.
    pub fn is_falling(&self) -> bool {
        self.falling
    }

    /// Drops the charge from where it hangs.
    pub fn release(&mut self) {
        self.falling = true;
    }

    /// Hangs the charge from a [`Boat`], unless it is falling.
    pub fn attach(&mut self, boat: &Boat) {
        if !self.falling {
            self.x = boat.x();
            self.y = boat.y() + 23;
        }
    }

    /// Whether the charge is close enough to a [`Submarine`] to blow it up.
    pub fn reaches(&self, sub: &Submarine) -> bool {
        self.x.abs_diff(sub.x()) <= 36 && self.y.abs_diff(sub.y()) <= 21
    }

    /// Advances the charge by one frame, returning whether it hit the [`Submarine`].
    ///
    /// A charge that sinks past the bottom or hits the submarine returns to the boat.
    pub fn update(&mut self, sub: &mut Submarine) -> bool {
        if !self.falling {
            return false;
        }

        if self.y > World::HEIGHT {
            self.falling = false;
            false
        } else if self.reaches(sub) {
            debug!(x = self.x, y = self.y, "submarine hit");
            sub.explode();
            self.falling = false;
            true
        } else {
            self.y += Self::SPEED;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depthcharge::Heading;
    use test_strategy::proptest;

    #[test]
    fn charge_hangs_below_the_boat() {
        let boat = Boat::new();
        let charge = Charge::new(&boat);
        assert_eq!((charge.x(), charge.y()), (boat.x(), boat.y() + 23));
        assert!(!charge.is_falling());
    }

    #[proptest]
    fn charge_never_hits_while_hanging(#[strategy(0..=World::WIDTH)] x: i32, h: Heading) {
        let mut charge = Charge::new(&Boat::new());
        let mut sub = Submarine::new(x, h);
        assert!(!charge.update(&mut sub));
        assert!(!sub.is_exploding());
    }

    #[test]
    fn falling_charge_ignores_the_boat() {
        let mut boat = Boat::new();
        let mut charge = Charge::new(&boat);
        charge.release();

        boat.port();
        charge.attach(&boat);
        assert_eq!(charge.x(), 320);
    }

    #[test]
    fn charge_sinks_six_pixels_per_frame() {
        let mut charge = Charge::new(&Boat::new());
        let mut sub = Submarine::new(0, Heading::Right);
        charge.release();

        assert!(!charge.update(&mut sub));
        assert_eq!(charge.y(), 109);
    }

    #[proptest]
    fn charge_that_hits_returns_to_the_boat(#[strategy(320 - 36..=320 + 36)] x: i32, h: Heading) {
        let boat = Boat::new();
        let mut charge = Charge::new(&boat);
        let mut sub = Submarine::new(x, h);
        charge.release();

        let mut hit = false;
        while charge.is_falling() {
            hit = charge.update(&mut sub);
        }

        assert!(hit);
        assert_eq!(sub.explosion(), Some(1));

        charge.attach(&boat);
        assert_eq!((charge.x(), charge.y()), (boat.x(), boat.y() + 23));
    }

    #[proptest]
    fn charge_that_misses_is_recovered_below_the_field(#[strategy(0..320 - 36)] x: i32, h: Heading) {
        let mut charge = Charge::new(&Boat::new());
        let mut sub = Submarine::new(x, h);
        charge.release();

        while charge.is_falling() {
            assert!(!charge.update(&mut sub));
        }

        assert!(charge.y() > World::HEIGHT);
        assert!(!sub.is_exploding());
    }
}
