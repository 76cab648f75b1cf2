use lib::checkers::{Board, Color, Game, Move, Outcome, Status};
use proptest::sample::Selector;
use test_strategy::proptest;

/// Counts the ways a turn can be completed, following every capture sequence to its end.
fn turns(board: &Board, turn: Color, moves: &[Move], depth: u8) -> usize {
    moves
        .iter()
        .map(|&m| {
            let mut next = *board;
            next.apply(m);

            let jumps = if m.is_jump() {
                next.jumps_from(turn, m.whither())
            } else {
                Default::default()
            };

            if jumps.is_empty() {
                perft(&next, !turn, depth - 1)
            } else {
                turns(&next, turn, &jumps, depth)
            }
        })
        .sum()
}

fn perft(board: &Board, turn: Color, depth: u8) -> usize {
    match depth {
        0 => 1,
        d => turns(board, turn, &board.moves(turn), d),
    }
}

#[test]
fn perft_expands_expected_number_of_nodes() {
    let board = Board::default();
    assert_eq!(perft(&board, Color::Red, 1), 7);
    assert_eq!(perft(&board, Color::Red, 2), 49);
    assert_eq!(perft(&board, Color::Red, 3), 302);
    assert_eq!(perft(&board, Color::Red, 4), 1469);
}

#[proptest(cases = 64)]
fn random_games_keep_the_board_consistent(#[strategy(1usize..400)] plies: usize, selector: Selector) {
    let mut game = Game::new();
    game.new_game()?;

    for _ in 0..plies {
        if game.status() != Status::InProgress {
            break;
        }

        let before = *game.board();
        let turn = game.turn();
        let m = *selector.select(game.moves());
        game.play(m)?;

        assert!(game.board().iter().all(|(_, sq)| sq.is_dark()));
        assert!(game.board().count(turn) == before.count(turn));
        assert_eq!(
            game.board().count(!turn) + usize::from(m.is_jump()),
            before.count(!turn)
        );
    }

    if let Status::GameOver(outcome) = game.status() {
        assert!(game.board().moves(outcome.loser()).is_empty());
    }
}

#[test]
fn capturing_the_last_piece_ends_the_game() {
    let board = "......../......../......../......../......../.b....../r.r...../...r....";
    let mut game = Game::setup(board.parse().unwrap(), Color::Red);

    assert_eq!(game.status(), Status::InProgress);
    assert_eq!(game.message().to_string(), "red, make your move, you must jump");
    assert_eq!(game.selected(), None);

    game.click("c2".parse().unwrap()).unwrap();
    let status = game.click("a4".parse().unwrap()).unwrap();

    assert_eq!(status, Status::GameOver(Outcome::Blocked(Color::Black)));
    assert_eq!(game.message().to_string(), "black has no moves, red wins");
    assert_eq!(game.board().count(Color::Black), 0);

    assert_eq!(game.new_game(), Ok(Status::InProgress));
    assert_eq!(game.board(), &Board::default());
}
