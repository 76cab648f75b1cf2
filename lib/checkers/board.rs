use crate::checkers::{Color, Move, ParsePieceError, Piece, Role, Square};
use arrayvec::ArrayVec;
use derive_more::{DebugCustom, Display, Error, From};
use proptest::sample::{Selector, SelectorStrategy};
use proptest::{prelude::*, strategy::Map};
use std::fmt::{self, Write};
use std::{mem, ops::Index, ops::Range, str::FromStr};
use tracing::trace;

/// A list of moves for one side.
///
/// No side can have more moves than there are dark squares times diagonals.
pub type Moves = ArrayVec<Move, 128>;

/// The four diagonals, in the order moves are generated.
const DIAGONALS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

/// The checkers board.
///
/// Pieces only ever stand on dark squares.
#[derive(DebugCustom, Copy, Clone, Eq, PartialEq, Hash)]
#[debug(fmt = "Board({self})")]
pub struct Board([[Option<Piece>; 8]; 8]);

/// The starting position.
///
/// Black men occupy the dark squares on the top three rows, red men the bottom three.
impl Default for Board {
    fn default() -> Self {
        let mut board = Board::empty();

        for sq in Square::dark() {
            match sq.row() {
                0..=2 => board.set(sq, Some(Piece(Color::Black, Role::Man))),
                5..=7 => board.set(sq, Some(Piece(Color::Red, Role::Man))),
                _ => None,
            };
        }

        board
    }
}

impl Arbitrary for Board {
    type Parameters = ();
    type Strategy = Map<(Range<usize>, SelectorStrategy), fn((usize, Selector)) -> Board>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (0..128, any::<Selector>()).prop_map(|(plies, selector)| {
            let mut board = Board::default();
            let mut turn = Color::Red;
            let mut moves = board.moves(turn);

            for _ in 0..plies {
                let Some(m) = selector.try_select(moves.iter().copied()) else {
                    break;
                };

                board.apply(m);

                moves = if m.is_jump() {
                    board.jumps_from(turn, m.whither())
                } else {
                    Moves::new()
                };

                if moves.is_empty() {
                    turn = !turn;
                    moves = board.moves(turn);
                }
            }

            board
        })
    }
}

impl Board {
    /// A board without any pieces.
    pub fn empty() -> Self {
        Board([[None; 8]; 8])
    }

    /// Puts a piece on a [`Square`], or clears it, returning what was there before.
    ///
    /// Putting a piece on a light square is a logic error.
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) -> Option<Piece> {
        debug_assert!(piece.is_none() || sq.is_dark());
        mem::replace(&mut self.0[sq.row() as usize][sq.col() as usize], piece)
    }

    /// An iterator over all pieces on the board in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        Square::dark().filter_map(|sq| Some((self[sq]?, sq)))
    }

    /// How many pieces of a [`Color`] are on the board.
    pub fn count(&self, c: Color) -> usize {
        self.iter().filter(|(p, _)| p.color() == c).count()
    }

    /// The legal moves for a [`Color`].
    ///
    /// If any capture is available only captures are legal.
    /// An empty list means the side has no legal moves and has lost.
    pub fn moves(&self, c: Color) -> Moves {
        let mut jumps = Moves::new();
        let mut steps = Moves::new();

        for (p, sq) in self.iter().filter(|(p, _)| p.color() == c) {
            jumps.extend(self.jumps(p, sq));
            if jumps.is_empty() {
                steps.extend(self.steps(p, sq));
            }
        }

        trace!(side = %c, jumps = jumps.len(), steps = steps.len(), "generated moves");

        if jumps.is_empty() {
            steps
        } else {
            jumps
        }
    }

    /// The captures available to the piece of a [`Color`] on a given [`Square`].
    ///
    /// Used to find out whether a piece that just jumped must keep jumping.
    pub fn jumps_from(&self, c: Color, sq: Square) -> Moves {
        match self[sq] {
            Some(p) if p.color() == c => self.jumps(p, sq).collect(),
            _ => Moves::new(),
        }
    }

    /// Moves a piece, removing the piece jumped over and crowning men that reach the last row.
    ///
    /// Returns the captured piece, if any.
    /// The move is applied unconditionally, legality must be checked beforehand.
    pub fn apply(&mut self, m: Move) -> Option<Piece> {
        let piece = self.set(m.whence(), None).map(|p| {
            if m.whither().row() == p.color().crowning_row() {
                p.crown()
            } else {
                p
            }
        });

        let captured = m.captured().and_then(|sq| self.set(sq, None));
        self.set(m.whither(), piece);
        captured
    }

    fn jumps(&self, p: Piece, sq: Square) -> impl Iterator<Item = Move> + '_ {
        DIAGONALS
            .into_iter()
            .filter(move |(r, _)| p.directions().contains(r))
            .filter_map(move |(r, c)| {
                let over = sq.offset(r, c)?;
                let whither = sq.offset(2 * r, 2 * c)?;
                match (self[over], self[whither]) {
                    (Some(q), None) if q.color() != p.color() => Some(Move(sq, whither)),
                    _ => None,
                }
            })
    }

    fn steps(&self, p: Piece, sq: Square) -> impl Iterator<Item = Move> + '_ {
        DIAGONALS
            .into_iter()
            .filter(move |(r, _)| p.directions().contains(r))
            .filter_map(move |(r, c)| {
                let whither = sq.offset(r, c)?;
                self[whither].is_none().then_some(Move(sq, whither))
            })
    }
}

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, sq: Square) -> &Self::Output {
        &self.0[sq.row() as usize][sq.col() as usize]
    }
}

/// Boards are printed row by row from the top, rows separated by `/` and empty squares as `.`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_char('/')?;
            }

            for cell in row {
                match cell {
                    Some(p) => fmt::Display::fmt(p, f)?,
                    None => f.write_char('.')?,
                }
            }
        }

        Ok(())
    }
}

/// The reason why parsing [`Board`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseBoardError {
    #[display(fmt = "failed to parse board")]
    InvalidPiece(ParsePieceError),
    #[display(fmt = "expected 8 rows of 8 squares")]
    #[from(ignore)]
    InvalidShape,
    #[display(fmt = "pieces may only stand on dark squares, found one on `{_0}`")]
    #[from(ignore)]
    LightSquare(#[error(not(source))] Square),
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.split('/').collect();
        if rows.len() != Square::SIDE as usize {
            return Err(ParseBoardError::InvalidShape);
        }

        let mut board = Board::empty();
        for (row, line) in (0..).zip(rows) {
            if line.chars().count() != Square::SIDE as usize {
                return Err(ParseBoardError::InvalidShape);
            }

            for (col, c) in (0..).zip(line.chars()) {
                let sq = Square::new(row, col).ok_or(ParseBoardError::InvalidShape)?;
                if c == '.' {
                    continue;
                } else if !sq.is_dark() {
                    return Err(ParseBoardError::LightSquare(sq));
                }

                board.set(sq, Some(c.to_string().parse()?));
            }
        }

        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn starting_position_has_twelve_men_per_side() {
        let board = Board::default();
        assert_eq!(board.count(Color::Red), 12);
        assert_eq!(board.count(Color::Black), 12);
        assert!(board.iter().all(|(p, _)| p.role() == Role::Man));
    }

    #[test]
    fn red_has_seven_opening_moves() {
        let moves = Board::default().moves(Color::Red);
        assert_eq!(moves.len(), 7);
        assert!(moves.iter().all(|m| !m.is_jump()));
        assert!(moves.iter().all(|m| m.whence().row() == 5 && m.whither().row() == 4));
    }

    #[proptest]
    fn pieces_never_stand_on_light_squares(b: Board) {
        assert!(b.iter().all(|(_, sq)| sq.is_dark()));
    }

    #[proptest]
    fn only_jumps_are_legal_if_any_jump_exists(b: Board, c: Color) {
        let moves = b.moves(c);
        let can_jump = b
            .iter()
            .any(|(p, sq)| p.color() == c && !b.jumps_from(c, sq).is_empty());

        assert_eq!(can_jump, moves.iter().any(Move::is_jump));
        assert!(!can_jump || moves.iter().all(Move::is_jump));
    }

    #[proptest]
    fn legal_moves_start_on_own_pieces_and_end_on_empty_dark_squares(b: Board, c: Color) {
        for m in b.moves(c) {
            assert_eq!(b[m.whence()].map(|p| p.color()), Some(c));
            assert_eq!(b[m.whither()], None);
            assert!(m.whither().is_dark());
        }
    }

    #[proptest]
    fn men_only_move_forward(b: Board, c: Color) {
        for m in b.moves(c) {
            if b[m.whence()].is_some_and(|p| !p.is_king()) {
                let rows = m.whither().row() as i8 - m.whence().row() as i8;
                assert_eq!(rows.signum(), c.forward());
            }
        }
    }

    #[proptest]
    fn applying_a_move_captures_one_opposing_piece_only_if_jumping(
        b: Board,
        c: Color,
        selector: Selector,
    ) {
        let moves = b.moves(c);
        prop_assume!(!moves.is_empty());

        let m = selector.select(moves);
        let mut next = b;
        let captured = next.apply(m);

        assert_eq!(next.count(c), b.count(c));

        if m.is_jump() {
            assert_eq!(captured.map(|p| p.color()), Some(!c));
            assert_eq!(next.count(!c), b.count(!c) - 1);
            assert_eq!(m.captured().map(|sq| next[sq]), Some(None));
        } else {
            assert_eq!(captured, None);
            assert_eq!(next.count(!c), b.count(!c));
        }
    }

    #[test]
    fn men_are_crowned_on_the_move_that_reaches_the_last_row() {
        let mut board: Board = "......../.r....../......../......../......../......../......../........"
            .parse()
            .unwrap();

        let m = Move(sq("b7"), sq("a8"));
        assert!(board.moves(Color::Red).contains(&m));
        board.apply(m);
        assert_eq!(board[sq("a8")], Some(Piece(Color::Red, Role::King)));
    }

    #[test]
    fn men_are_crowned_when_jumping_onto_the_last_row() {
        let mut board: Board = "......../......../......../......../......../...b..../....r.../........"
            .parse()
            .unwrap();

        let m = Move(sq("d3"), sq("f1"));
        assert_eq!(Vec::from_iter(board.moves(Color::Black)), vec![m]);
        assert_eq!(board.apply(m), Some(Piece(Color::Red, Role::Man)));
        assert_eq!(board[sq("f1")], Some(Piece(Color::Black, Role::King)));
        assert_eq!(board.count(Color::Red), 0);
    }

    #[test]
    fn kings_move_in_every_direction() {
        let board: Board = "......../......../......../...R..../......../......../......../........"
            .parse()
            .unwrap();

        let moves = board.moves(Color::Red);
        assert_eq!(moves.len(), 4);
    }

    #[test]
    fn men_cannot_capture_backwards() {
        let board: Board = "......../......../......../...r..../....b.../......../......../........"
            .parse()
            .unwrap();

        assert!(board.moves(Color::Red).iter().all(|m| !m.is_jump()));
        assert!(board.moves(Color::Black).iter().all(|m| !m.is_jump()));
    }

    #[test]
    fn jumps_from_only_considers_pieces_of_the_given_color() {
        let board: Board = "......../......../..b...../...r..../......../......../......../........"
            .parse()
            .unwrap();

        assert_eq!(board.jumps_from(Color::Red, sq("d5")).len(), 1);
        assert!(board.jumps_from(Color::Black, sq("d5")).is_empty());
        assert!(board.jumps_from(Color::Red, sq("a1")).is_empty());
    }

    #[proptest]
    fn parsing_printed_board_is_an_identity(b: Board) {
        assert_eq!(b.to_string().parse(), Ok(b));
    }

    #[test]
    fn parsing_board_fails_for_pieces_on_light_squares() {
        assert_eq!(
            ".r....../......../......../......../......../......../......../........"
                .parse::<Board>(),
            Err(ParseBoardError::LightSquare(sq("b8")))
        );
    }

    #[proptest]
    fn parsing_board_fails_for_wrong_number_of_rows(#[strategy(0usize..16)] n: usize) {
        prop_assume!(n != 8);
        let s = vec!["........"; n].join("/");
        assert_eq!(s.parse::<Board>(), Err(ParseBoardError::InvalidShape));
    }
}
