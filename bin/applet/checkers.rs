use crate::io::Io;
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::checkers::{Color, Game, Move, Square, Status};
use std::fmt::{self, Display};
use std::io::{stdin, stdout, Read, Write};
use tracing::{instrument, trace};

/// Commands understood while playing checkers.
#[derive(Debug, Clone, PartialEq, Parser)]
#[clap(
    name = "",
    multicall = true,
    arg_required_else_help = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
enum Cmd {
    /// Start a new game.
    New,

    /// Resign the game in favor of the opponent.
    Resign,

    /// Select a piece or the square it should move to.
    Click {
        /// A square such as `b3`.
        square: Square,
    },

    /// Press the mouse on the board, 40 pixels per square plus a 2 pixel border.
    #[clap(allow_negative_numbers = true)]
    Press { x: f64, y: f64 },

    /// Move a piece on the board.
    #[clap(after_help = r#"SYNTAX:
    <MOVE>      ::= <SQUARE:from>[-|x]<SQUARE:to>
    <SQUARE>    ::= <FILE><RANK>
    <FILE>      ::= a|b|c|d|e|f|g|h
    <RANK>      ::= 1|2|3|4|5|6|7|8"#)]
    Move {
        /// A move such as `b3-c4` or `c4xe6`.
        #[clap(value_name = "MOVE")]
        m: Move,
    },

    /// Show the board again.
    Board,

    /// Leave the game.
    Quit,
}

/// Two players sharing a checkers board.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Checkers {}

impl Checkers {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        self.run(&mut Io::new(stdout(), stdin()))
    }

    fn run<W: Write, R: Read>(self, io: &mut Io<W, R>) -> Result<(), Anyhow> {
        let mut game = Game::new();
        io.send(Screen(&game))?;

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
                Ok(Cmd::Board) => Ok(game.status()),
                Ok(Cmd::New) => game.new_game(),
                Ok(Cmd::Resign) => game.resign(),
                Ok(Cmd::Click { square }) => game.click(square),
                Ok(Cmd::Move { m }) => game.play(m),
                Ok(Cmd::Press { x, y }) => match Square::from_pixel(x, y) {
                    Some(sq) => game.click(sq),
                    None => {
                        io.send("that is outside the board")?;
                        continue;
                    }
                },
            };

            match result {
                Ok(status) => trace!(%status, "command accepted"),
                Err(rejection) => trace!(%rejection, "command rejected"),
            }

            io.send(Screen(&game))?;
        }
    }
}

/// The board as seen by the players followed by the advice for the side to move.
///
/// The selected piece is shown in parentheses and the squares it may move to are marked with `*`.
struct Screen<'a>(&'a Game);

impl Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let game = self.0;
        let targets: Vec<Square> = game
            .moves()
            .iter()
            .filter(|m| Some(m.whence()) == game.selected())
            .map(|m| m.whither())
            .collect();

        write!(f, "  ")?;
        for file in 'a'..='h' {
            write!(f, "   {}", file)?;
        }

        writeln!(f)?;
        writeln!(f, "   +---+---+---+---+---+---+---+---+")?;

        for row in 0..Square::SIDE {
            let rank = Square::SIDE - row;
            write!(f, " {} |", rank)?;

            for sq in (0..Square::SIDE).filter_map(|col| Square::new(row, col)) {
                match game.board()[sq] {
                    Some(p) if game.selected() == Some(sq) => write!(f, "({})|", p)?,
                    Some(p) => write!(f, " {} |", p)?,
                    None if targets.contains(&sq) => write!(f, " * |")?,
                    None if sq.is_dark() => write!(f, " . |")?,
                    None => write!(f, "   |")?,
                }
            }

            writeln!(f, " {}", rank)?;
            writeln!(f, "   +---+---+---+---+---+---+---+---+")?;
        }

        write!(f, "  ")?;
        for file in 'a'..='h' {
            write!(f, "   {}", file)?;
        }

        writeln!(f)?;

        if game.status() == Status::InProgress {
            let red = game.board().count(Color::Red);
            let black = game.board().count(Color::Black);
            writeln!(f, "red: {red} pieces, black: {black} pieces")?;
        }

        write!(f, "{}", game.message())
    }
}
