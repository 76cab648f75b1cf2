use anyhow::Error as Anyhow;
use clap::Subcommand;
use derive_more::From;

mod blackjack;
mod checkers;
mod depthcharge;

#[derive(Debug, From, Subcommand)]
pub enum Applet {
    Checkers(checkers::Checkers),
    Blackjack(blackjack::Blackjack),
    Depthcharge(depthcharge::Depthcharge),
}

impl Default for Applet {
    fn default() -> Self {
        checkers::Checkers::default().into()
    }
}

impl Applet {
    pub fn execute(self) -> Result<(), Anyhow> {
        match self {
            Applet::Checkers(a) => a.execute(),
            Applet::Blackjack(a) => a.execute(),
            Applet::Depthcharge(a) => a.execute(),
        }
    }
}
