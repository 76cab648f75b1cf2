use crate::io::Io;
use anyhow::Error as Anyhow;
use clap::Parser;
use derive_more::{Display, Error, From};
use lib::depthcharge::{Key, World};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::io::{stdin, stdout, Read, Write};
use std::{num::NonZeroU32, str::FromStr};
use tracing::instrument;

/// The reason why parsing [`WorldConfig`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse world configuration")]
pub struct ParseWorldConfigError(ron::de::SpannedError);

/// Runtime configuration for a depth charge [`World`].
#[derive(Debug, Default, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct WorldConfig {
    /// Moves the submarine the same way on every run.
    pub seed: Option<u64>,
}

impl FromStr for WorldConfig {
    type Err = ParseWorldConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}

/// Commands understood while hunting the submarine.
#[derive(Debug, Clone, Eq, PartialEq, Parser)]
#[clap(
    name = "",
    multicall = true,
    arg_required_else_help = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
enum Cmd {
    /// Steer the boat to the left.
    Left,

    /// Steer the boat to the right.
    Right,

    /// Drop the depth charge.
    Drop,

    /// Play some frames.
    Tick {
        /// How many frames to play.
        #[clap(default_value = "1")]
        frames: NonZeroU32,
    },

    /// Pause the animation.
    Blur,

    /// Resume the animation.
    Focus,

    /// Leave the game.
    Quit,
}

/// A boat hunting a submarine with depth charges.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Depthcharge {
    /// The world configuration in RON, e.g. `(seed: Some(3))`.
    #[clap(short, long, default_value = "()")]
    config: WorldConfig,
}

impl Depthcharge {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        self.run(&mut Io::new(stdout(), stdin()))
    }

    fn run<W: Write, R: Read>(self, io: &mut Io<W, R>) -> Result<(), Anyhow> {
        let mut world = match self.config.seed {
            Some(seed) => World::with_seed(seed),
            None => World::default(),
        };

        io.send(Screen(&world))?;

        loop {
            io.flush()?;

            let Some(line) = io.recv()? else {
                break Ok(());
            };

            if line.trim().is_empty() {
                continue;
            }

            match Cmd::try_parse_from(line.split_whitespace()) {
                Err(e) => {
                    io.send(e)?;
                    continue;
                }

                Ok(Cmd::Quit) => break Ok(()),
                Ok(Cmd::Left) => world.press(Key::Left),
                Ok(Cmd::Right) => world.press(Key::Right),
                Ok(Cmd::Drop) => world.press(Key::Down),
                Ok(Cmd::Blur) => world.blur(),
                Ok(Cmd::Focus) => world.focus(),
                Ok(Cmd::Tick { frames }) => {
                    for _ in 0..frames.get() {
                        world.tick();
                    }
                }
            }

            io.send(Screen(&world))?;
        }
    }
}

const COLS: usize = (World::WIDTH / 10) as usize + 1;
const ROWS: usize = (World::HEIGHT / 20) as usize;

/// The field drawn in characters, each 10 pixels wide and 20 pixels tall.
struct Screen<'a>(&'a World);

impl Screen<'_> {
    fn cell(x: i32, y: i32) -> Option<(usize, usize)> {
        let col = usize::try_from(x / 10).ok().filter(|&c| c < COLS)?;
        let row = usize::try_from(y / 20).ok().filter(|&r| r < ROWS)?;
        Some((row, col))
    }
}

impl Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let world = self.0;
        let mut field = [[' '; COLS]; ROWS];

        let sub = world.submarine();
        if let Some((row, col)) = Self::cell(sub.x(), sub.y()) {
            field[row][col] = if sub.is_exploding() { '#' } else { 'S' };
        }

        let boat = world.boat();
        if let Some((row, col)) = Self::cell(boat.x(), boat.y()) {
            field[row][col] = 'B';
        }

        let charge = world.charge();
        if let Some((row, col)) = Self::cell(charge.x(), charge.y()) {
            field[row][col] = 'o';
        }

        writeln!(f, "+{}+", "-".repeat(COLS))?;
        for row in field {
            writeln!(f, "|{}|", row.iter().collect::<String>())?;
        }

        writeln!(f, "+{}+", "-".repeat(COLS))?;

        if world.is_paused() {
            writeln!(f, "(ANIMATION PAUSED)")?;
        }

        write!(f, "frame {} hits {}", world.frames(), world.hits())
    }
}
