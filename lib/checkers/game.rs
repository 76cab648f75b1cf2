use crate::checkers::{Board, Color, Move, Moves, Outcome, Square};
use derive_more::{Display, Error};
use tracing::{debug, info, instrument};

/// The stage of a checkers [`Game`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Status {
    #[display(fmt = "no game in progress")]
    NoGame,
    #[display(fmt = "game in progress")]
    InProgress,
    #[display(fmt = "game over, {_0}")]
    GameOver(Outcome),
}

/// The reason why an action was not accepted.
///
/// A rejected action leaves the [`Game`] unchanged apart from its [`Message`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum Rejection {
    #[display(fmt = "finish the current game first")]
    GameInProgress,
    #[display(fmt = "there is no game in progress")]
    NoGameInProgress,
    #[display(fmt = "select a piece that can move")]
    NotMovable,
    #[display(fmt = "select a square to move to")]
    NotReachable,
}

/// The advice shown to the players.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Message {
    #[display(fmt = "start a new game to begin")]
    Welcome,
    #[display(fmt = "{_0}, make your move")]
    MakeMove(Color),
    #[display(fmt = "{_0}, make your move, you must jump")]
    MustJump(Color),
    #[display(fmt = "{_0}, you must continue jumping")]
    ContinueJumping(Color),
    #[display(fmt = "{_0}")]
    Rejected(Rejection),
    #[display(fmt = "{_0}")]
    GameOver(Outcome),
}

/// The turn logic of a checkers game between two players sharing the board.
///
/// Players act by selecting one of their pieces and then the square it should move to.
/// Red always moves first, captures are mandatory and a piece that captured must keep capturing
/// for as long as it can.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Game {
    board: Board,
    turn: Color,
    selected: Option<Square>,
    jumping: bool,
    moves: Moves,
    status: Status,
    message: Message,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A table without a game in progress.
    pub fn new() -> Self {
        Game {
            board: Board::default(),
            turn: Color::Red,
            selected: None,
            jumping: false,
            moves: Moves::new(),
            status: Status::NoGame,
            message: Message::Welcome,
        }
    }

    /// A game in progress from an arbitrary position.
    ///
    /// The game is immediately over if the side to move has no legal moves.
    pub fn setup(board: Board, turn: Color) -> Self {
        let mut game = Game::new();
        game.start(board, turn);
        game
    }

    /// The current position.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The square of the piece about to move, if any.
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// The legal moves for the side to move.
    ///
    /// Never empty while the game is in progress.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The current stage of the game.
    pub fn status(&self) -> Status {
        self.status
    }

    /// What the players should be told.
    pub fn message(&self) -> Message {
        self.message
    }

    /// Sets up the pieces and gives red the first move.
    #[instrument(level = "trace", skip(self), err)]
    pub fn new_game(&mut self) -> Result<Status, Rejection> {
        if self.status == Status::InProgress {
            return self.reject(Rejection::GameInProgress);
        }

        Ok(self.start(Board::default(), Color::Red))
    }

    /// The side to move gives up and the opponent wins.
    #[instrument(level = "trace", skip(self), err)]
    pub fn resign(&mut self) -> Result<Status, Rejection> {
        if self.status != Status::InProgress {
            return self.reject(Rejection::NoGameInProgress);
        }

        Ok(self.finish(Outcome::Resignation(self.turn)))
    }

    /// A player clicks on a [`Square`].
    ///
    /// Clicking on a piece that can move selects it, clicking on a square the selected piece can
    /// move to plays the move, anything else is rejected.
    #[instrument(level = "trace", skip(self), err, fields(%sq))]
    pub fn click(&mut self, sq: Square) -> Result<Status, Rejection> {
        if self.status != Status::InProgress {
            return self.reject(Rejection::NoGameInProgress);
        }

        if self.moves.iter().any(|m| m.whence() == sq) {
            self.selected = Some(sq);
            self.message = self.prompt();
            return Ok(self.status);
        }

        let Some(whence) = self.selected else {
            return self.reject(Rejection::NotMovable);
        };

        match self.moves.iter().find(|m| **m == Move(whence, sq)) {
            Some(&m) => Ok(self.make(m)),
            None => self.reject(Rejection::NotReachable),
        }
    }

    /// Selects the piece to move and its destination at once.
    #[instrument(level = "trace", skip(self), err, fields(%m))]
    pub fn play(&mut self, m: Move) -> Result<Status, Rejection> {
        if self.status != Status::InProgress {
            return self.reject(Rejection::NoGameInProgress);
        }

        if self.moves.contains(&m) {
            self.selected = Some(m.whence());
            Ok(self.make(m))
        } else if self.moves.iter().any(|n| n.whence() == m.whence()) {
            self.reject(Rejection::NotReachable)
        } else {
            self.reject(Rejection::NotMovable)
        }
    }

    fn start(&mut self, board: Board, turn: Color) -> Status {
        self.board = board;
        self.turn = turn;
        self.moves = self.board.moves(turn);
        self.status = Status::InProgress;
        info!(%turn, board = %self.board, "game started");
        self.pass_turn()
    }

    fn make(&mut self, m: Move) -> Status {
        let captured = self.board.apply(m);
        debug!(side = %self.turn, %m, ?captured, "move played");

        if m.is_jump() {
            let jumps = self.board.jumps_from(self.turn, m.whither());
            if !jumps.is_empty() {
                self.moves = jumps;
                self.selected = Some(m.whither());
                self.jumping = true;
                self.message = self.prompt();
                return self.status;
            }
        }

        self.turn = !self.turn;
        self.moves = self.board.moves(self.turn);
        self.pass_turn()
    }

    /// Hands the turn to the side whose legal moves were just generated.
    fn pass_turn(&mut self) -> Status {
        self.selected = None;
        self.jumping = false;

        let Some(first) = self.moves.first().copied() else {
            return self.finish(Outcome::Blocked(self.turn));
        };

        if self.moves.iter().all(|m| m.whence() == first.whence()) {
            self.selected = Some(first.whence());
        }

        self.message = self.prompt();
        self.status
    }

    fn prompt(&self) -> Message {
        if self.jumping {
            return Message::ContinueJumping(self.turn);
        }

        match self.moves.first() {
            Some(m) if m.is_jump() => Message::MustJump(self.turn),
            _ => Message::MakeMove(self.turn),
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Status {
        info!(%outcome, board = %self.board, "game over");
        self.moves.clear();
        self.selected = None;
        self.jumping = false;
        self.status = Status::GameOver(outcome);
        self.message = Message::GameOver(outcome);
        self.status
    }

    fn reject<T>(&mut self, r: Rejection) -> Result<T, Rejection> {
        debug!(rejection = %r, "action rejected");
        self.message = Message::Rejected(r);
        Err(r)
    }
}
