use crate::io::Io;
use anyhow::Error as Anyhow;
use clap::Parser;
use derive_more::{Display, Error, From};
use lib::blackjack::Table;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::io::{stdin, stdout, Read, Write};
use std::str::FromStr;
use tracing::{instrument, trace};

/// The reason why parsing [`TableConfig`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse table configuration")]
pub struct ParseTableConfigError(ron::de::SpannedError);

/// Runtime configuration for a blackjack [`Table`].
#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct TableConfig {
    /// Deals the same cards on every run.
    pub seed: Option<u64>,

    /// The wager used when none is given.
    pub bet: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig { seed: None, bet: 10 }
    }
}

impl FromStr for TableConfig {
    type Err = ParseTableConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}

/// Commands understood at the blackjack table.
#[derive(Debug, Clone, Eq, PartialEq, Parser)]
#[clap(
    name = "",
    multicall = true,
    arg_required_else_help = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
enum Cmd {
    /// Place a bet and deal a new round.
    New {
        /// How much to bet, the configured default if omitted.
        #[clap(allow_hyphen_values = true)]
        bet: Option<String>,
    },

    /// Take another card.
    Hit,

    /// Let the dealer play.
    Stand,

    /// Leave the table.
    Quit,
}

/// A game of blackjack against the dealer.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Blackjack {
    /// Seeds the shuffling of the deck, overriding the configuration.
    #[clap(short, long)]
    seed: Option<u64>,

    /// The table configuration in RON, e.g. `(seed: Some(7), bet: 25)`.
    #[clap(short, long, default_value = "()")]
    config: TableConfig,
}

impl Blackjack {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        self.run(&mut Io::new(stdout(), stdin()))
    }

    fn run<W: Write, R: Read>(self, io: &mut Io<W, R>) -> Result<(), Anyhow> {
        let mut table = match self.seed.or(self.config.seed) {
            Some(seed) => Table::with_seed(seed),
            None => Table::default(),
        };

        io.send(Screen(&table))?;

        loop {
            io.flush()?;

            let Some(line) = io.recv()? else {
                break Ok(());
            };

            if line.trim().is_empty() {
                continue;
            }

            let result = match Cmd::try_parse_from(line.split_whitespace()) {
                Err(e) => {
                    io.send(e)?;
                    continue;
                }

                Ok(Cmd::Quit) => break Ok(()),
                Ok(Cmd::Hit) => table.hit(),
                Ok(Cmd::Stand) => table.stand(),
                Ok(Cmd::New { bet }) => match bet {
                    Some(bet) => table.new_game(&bet),
                    None => table.new_game(&self.config.bet.to_string()),
                },
            };

            match result {
                Ok(message) => trace!(%message, "command accepted"),
                Err(rejection) => trace!(%rejection, "command rejected"),
            }

            io.send(Screen(&table))?;
        }
    }
}

/// The table as seen by the player.
struct Screen<'a>(&'a Table);

impl Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let table = self.0;

        if !table.player().is_empty() {
            write!(f, "Dealer")?;
            if !table.in_progress() {
                write!(f, " ({})", table.dealer().value())?;
            }

            write!(f, ":")?;
            for card in table.dealer_showing() {
                match card {
                    Some(c) => write!(f, " {}", c)?,
                    None => write!(f, " ??")?,
                }
            }

            writeln!(f)?;
            writeln!(f, "You ({}): {}", table.player().value(), table.player())?;
        }

        if table.went_broke() {
            writeln!(f, "YOU ARE BROKE! ( I will give you another ${}. )", Table::STAKE)?;
        } else {
            writeln!(f, "You have ${}", table.funds())?;
        }

        write!(f, "{}", table.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str;

    fn play(args: &[&str], input: &str) -> String {
        let applet = Blackjack::try_parse_from(args).unwrap();
        let mut buf = Vec::new();
        let mut io = Io::new(&mut buf, input.as_bytes());
        applet.run(&mut io).unwrap();
        drop(io);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn config_is_parsed_from_ron() {
        assert_eq!(
            "(seed: Some(7), bet: 25)".parse(),
            Ok(TableConfig {
                seed: Some(7),
                bet: 25
            })
        );

        assert_eq!("()".parse(), Ok(TableConfig::default()));
        assert_eq!("(bet: 5)".parse::<TableConfig>().map(|c| c.bet), Ok(5));
    }

    #[test]
    fn config_rejects_unknown_fields() {
        assert!("(wager: 5)".parse::<TableConfig>().is_err());
    }

    #[test]
    fn commands_are_parsed() {
        assert_eq!(Cmd::try_parse_from(["new"]).unwrap(), Cmd::New { bet: None });
        assert_eq!(
            Cmd::try_parse_from(["new", "-5"]).unwrap(),
            Cmd::New {
                bet: Some("-5".into())
            }
        );

        assert_eq!(Cmd::try_parse_from(["hit"]).unwrap(), Cmd::Hit);
        assert_eq!(Cmd::try_parse_from(["stand"]).unwrap(), Cmd::Stand);
    }

    #[test]
    fn seed_flag_overrides_the_configuration() {
        let a = play(&["blackjack", "--seed", "1", "--config", "(seed: Some(2))"], "new\nstand\n");
        let b = play(&["blackjack", "--seed", "1"], "new\nstand\n");
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_wagers_are_reported() {
        let out = play(&["blackjack", "--seed", "0"], "new abc\nnew 150\nnew 0\n");
        assert!(out.contains("Bet amount must be an integer!"));
        assert!(out.contains("The bet amount can't be more than you have!"));
        assert!(out.contains("The bet has to be a positive number"));
        assert!(!out.contains("Dealer"));
    }

    #[test]
    fn dealer_hole_card_is_hidden_during_play() {
        for seed in 0..20 {
            let mut table = Table::with_seed(seed);
            table.new_game("10").unwrap();

            let screen = Screen(&table).to_string();
            if table.in_progress() {
                assert!(screen.starts_with("Dealer: ?? "));
                assert!(screen.contains("Hit or Stand?"));
            } else {
                assert!(!screen.contains("??"));
            }
        }
    }

    #[test]
    fn hit_without_a_game_is_rejected() {
        let out = play(&["blackjack"], "hit\nquit\n");
        assert!(out.contains("Start a new game first."));
        assert!(out.contains("You have $100"));
    }
}
