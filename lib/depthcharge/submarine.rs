use crate::depthcharge::World;
use derive_more::Display;
use rand::Rng;
use std::ops::Not;
use test_strategy::Arbitrary;
use tracing::trace;

/// The direction in which the [`Submarine`] is heading.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
pub enum Heading {
    #[display(fmt = "left")]
    Left,
    #[display(fmt = "right")]
    Right,
}

impl Not for Heading {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

/// The submarine cruising near the bottom of the field.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Submarine {
    x: i32,
    y: i32,
    heading: Heading,
    explosion: Option<u8>,
}

impl Submarine {
    /// How far the submarine moves on each frame.
    pub const SPEED: i32 = 3;

    /// How many frames an explosion lasts.
    pub const EXPLOSION: u8 = 25;

    /// The chance of turning around on any frame.
    pub const FICKLENESS: f64 = 0.02;

    /// A submarine at a given horizontal position.
    pub fn new(x: i32, heading: Heading) -> Self {
        Submarine {
            x,
            y: World::HEIGHT - 40,
            heading,
            explosion: None,
        }
    }

    /// A submarine at a random position and heading.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let x = rng.gen_range(0..World::WIDTH);
        let heading = if rng.gen_bool(0.5) {
            Heading::Left
        } else {
            Heading::Right
        };

        trace!(x, %heading, "submarine spawned");
        Submarine::new(x, heading)
    }

    /// The horizontal position of the submarine's center.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// The vertical position of the submarine's center.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// The direction the submarine is heading.
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// How many frames ago the submarine was hit, if it is exploding.
    pub fn explosion(&self) -> Option<u8> {
        self.explosion
    }

    /// Whether the submarine is exploding.
    pub fn is_exploding(&self) -> bool {
        self.explosion.is_some()
    }

    /// Sets the submarine off.
    pub fn explode(&mut self) {
        self.explosion = Some(1);
    }

    /// Advances the submarine by one frame.
    ///
    /// An exploding submarine is replaced by a new one once the explosion is over.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Some(frame) = self.explosion {
            match frame + 1 {
                Self::EXPLOSION => *self = Submarine::spawn(rng),
                next => self.explosion = Some(next),
            }

            return;
        }

        if rng.gen_bool(Self::FICKLENESS) {
            self.heading = !self.heading;
        }

        match self.heading {
            Heading::Left => {
                self.x -= Self::SPEED;
                if self.x <= 0 {
                    self.x = 0;
                    self.heading = Heading::Right;
                }
            }

            Heading::Right => {
                self.x += Self::SPEED;
                if self.x > World::WIDTH {
                    self.x = World::WIDTH;
                    self.heading = Heading::Left;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use test_strategy::proptest;

    #[proptest]
    fn submarine_spawns_within_the_field(seed: u64) {
        let sub = Submarine::spawn(&mut ChaCha8Rng::seed_from_u64(seed));
        assert!((0..World::WIDTH).contains(&sub.x()));
        assert_eq!(sub.y(), 440);
        assert!(!sub.is_exploding());
    }

    #[proptest]
    fn submarine_moves_three_pixels_per_frame(
        seed: u64,
        #[strategy(Submarine::SPEED + 1..World::WIDTH - Submarine::SPEED)] x: i32,
        h: Heading,
    ) {
        let mut sub = Submarine::new(x, h);
        sub.update(&mut ChaCha8Rng::seed_from_u64(seed));
        assert_eq!(sub.x().abs_diff(x), Submarine::SPEED as u32);
    }

    #[proptest]
    fn submarine_stays_within_the_field(seed: u64, #[strategy(0..=World::WIDTH)] x: i32, h: Heading) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut sub = Submarine::new(x, h);

        for _ in 0..500 {
            sub.update(&mut rng);
            assert!((0..=World::WIDTH).contains(&sub.x()));
        }
    }

    #[proptest]
    fn submarine_bounces_off_the_left_edge(seed: u64, #[strategy(0..=Submarine::SPEED)] x: i32) {
        let mut sub = Submarine::new(x, Heading::Left);
        sub.update(&mut ChaCha8Rng::seed_from_u64(seed));
        assert!(sub.x() == 0 || sub.x() == x + Submarine::SPEED);
        assert_eq!(sub.heading(), Heading::Right);
    }

    #[proptest]
    fn submarine_bounces_off_the_right_edge(
        seed: u64,
        #[strategy(World::WIDTH - Submarine::SPEED + 1..=World::WIDTH)] x: i32,
    ) {
        let mut sub = Submarine::new(x, Heading::Right);
        sub.update(&mut ChaCha8Rng::seed_from_u64(seed));
        assert!(sub.x() == World::WIDTH || sub.x() == x - Submarine::SPEED);
        assert_eq!(sub.heading(), Heading::Left);
    }

    #[proptest]
    fn explosion_lasts_until_the_submarine_respawns(seed: u64, #[strategy(0..=World::WIDTH)] x: i32, h: Heading) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut sub = Submarine::new(x, h);
        sub.explode();

        for frame in 2..Submarine::EXPLOSION {
            sub.update(&mut rng);
            assert_eq!(sub.explosion(), Some(frame));
            assert_eq!(sub.x(), x);
        }

        sub.update(&mut rng);
        assert!(!sub.is_exploding());
    }
}
