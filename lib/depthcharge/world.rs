use crate::depthcharge::{Boat, Charge, Submarine};
use derive_more::Display;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use test_strategy::Arbitrary;
use tracing::{debug, instrument};

/// A key the player can press.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
pub enum Key {
    #[display(fmt = "left")]
    Left,
    #[display(fmt = "right")]
    Right,
    #[display(fmt = "down")]
    Down,
}

/// The depth charge game: a boat on the surface hunting a submarine below.
#[derive(Debug, Clone)]
pub struct World {
    boat: Boat,
    charge: Charge,
    sub: Submarine,
    rng: ChaCha8Rng,
    focused: bool,
    frames: u64,
    hits: u32,
}

impl Default for World {
    fn default() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl World {
    /// The width of the field.
    pub const WIDTH: i32 = 640;

    /// The height of the field.
    pub const HEIGHT: i32 = 480;

    /// A world that moves the submarine with the given random number generator.
    pub fn new(mut rng: ChaCha8Rng) -> Self {
        let boat = Boat::new();

        World {
            charge: Charge::new(&boat),
            sub: Submarine::spawn(&mut rng),
            boat,
            rng,
            focused: true,
            frames: 0,
            hits: 0,
        }
    }

    /// A world that plays out the same way for the same seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// The [`Boat`].
    pub fn boat(&self) -> &Boat {
        &self.boat
    }

    /// The depth [`Charge`].
    pub fn charge(&self) -> &Charge {
        &self.charge
    }

    /// The [`Submarine`].
    pub fn submarine(&self) -> &Submarine {
        &self.sub
    }

    /// Whether the animation is paused.
    pub fn is_paused(&self) -> bool {
        !self.focused
    }

    /// How many frames have been played.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// How many submarines have been hit.
    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Resumes the animation.
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Pauses the animation.
    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Handles a key press, ignored while paused.
    #[instrument(level = "trace", skip(self), fields(%key))]
    pub fn press(&mut self, key: Key) {
        if self.is_paused() {
            return;
        }

        match key {
            Key::Left => self.boat.port(),
            Key::Right => self.boat.starboard(),
            Key::Down => self.charge.release(),
        }
    }

    /// Plays one frame, unless paused.
    ///
    /// The boat moves first, then the charge and finally the submarine.
    pub fn tick(&mut self) {
        if self.is_paused() {
            return;
        }

        self.boat.update();

        if self.charge.update(&mut self.sub) {
            self.hits += 1;
            debug!(hits = self.hits, frame = self.frames, "submarine destroyed");
        }

        self.sub.update(&mut self.rng);
        self.charge.attach(&self.boat);
        self.frames += 1;
    }
}
