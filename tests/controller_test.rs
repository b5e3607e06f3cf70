//! Tests for the turn controller.

mod common;

use blossom_games::{GameController, GameStatus, PROMO_CODE_LEN, TurnError, TurnResult};
use blossom_tictactoe::{Difficulty, Outcome, Player, Square, TicTacToeErrorKind};
use common::ZeroRng;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn started(difficulty: Difficulty) -> GameController {
    let mut controller = GameController::new(difficulty);
    controller.start();
    controller
}

#[test]
fn test_human_moves_first_and_turns_alternate() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut controller = started(Difficulty::Hard);
    assert!(controller.is_human_turn());
    assert_eq!(controller.to_move(), Player::X);

    assert_eq!(
        controller.play_human(0, &mut rng).unwrap(),
        TurnResult::Continue
    );
    assert_eq!(controller.to_move(), Player::O);
    assert!(matches!(
        controller.play_human(1, &mut rng),
        Err(TurnError::NotYourTurn(Player::X))
    ));

    let (pos, result) = controller.play_computer(&mut rng).unwrap();
    assert_eq!(pos, 4);
    assert_eq!(result, TurnResult::Continue);
    assert_eq!(
        controller.board().get(4),
        Some(Square::Occupied(Player::O))
    );
    assert!(matches!(
        controller.play_computer(&mut rng),
        Err(TurnError::NotYourTurn(Player::O))
    ));
}

#[test]
fn test_occupied_cell_rejected_without_losing_turn() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut controller = started(Difficulty::Hard);
    controller.play_human(0, &mut rng).unwrap();
    controller.play_computer(&mut rng).unwrap();

    let err = controller.play_human(4, &mut rng).unwrap_err();
    match err {
        TurnError::Rules(e) => assert!(matches!(e.kind(), TicTacToeErrorKind::InvalidState(_))),
        other => panic!("unexpected error {:?}", other),
    }
    assert!(controller.is_human_turn());

    let err = controller.play_human(9, &mut rng).unwrap_err();
    assert!(matches!(err, TurnError::Rules(_)));
}

#[test]
fn test_human_win_earns_promo_code() {
    let mut rng = ZeroRng;
    let mut controller = started(Difficulty::Easy);

    // The blundering computer always takes the lowest empty cell.
    controller.play_human(4, &mut rng).unwrap();
    assert_eq!(controller.play_computer(&mut rng).unwrap().0, 0);
    controller.play_human(2, &mut rng).unwrap();
    assert_eq!(controller.play_computer(&mut rng).unwrap().0, 1);

    let report = match controller.play_human(6, &mut rng).unwrap() {
        TurnResult::Finished(report) => report,
        TurnResult::Continue => panic!("anti-diagonal should win"),
    };

    assert_eq!(report.status(), GameStatus::Won);
    assert_eq!(
        report.outcome(),
        Outcome::Win {
            winner: Player::X,
            line: [2, 4, 6]
        }
    );
    let code = report.promo_code().unwrap();
    assert_eq!(code.len(), PROMO_CODE_LEN);
    assert_eq!(report.message(), format!("Победа! Промокод: {}", code));
    assert_eq!(controller.status(), GameStatus::Won);
    assert_eq!(controller.winning_line(), Some([2, 4, 6]));
    assert_eq!(controller.promo_code(), Some(code));
}

#[test]
fn test_computer_win_is_a_loss_without_code() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut controller = started(Difficulty::Hard);

    controller.play_human(0, &mut rng).unwrap();
    controller.play_computer(&mut rng).unwrap(); // center
    controller.play_human(1, &mut rng).unwrap();
    assert_eq!(controller.play_computer(&mut rng).unwrap().0, 2); // block
    controller.play_human(8, &mut rng).unwrap(); // ignores the threat at 6

    let (pos, result) = controller.play_computer(&mut rng).unwrap();
    assert_eq!(pos, 6);
    let TurnResult::Finished(report) = result else {
        panic!("computer should have won");
    };
    assert_eq!(report.status(), GameStatus::Lost);
    assert_eq!(report.promo_code(), None);
    assert_eq!(report.message(), "Проигрыш");
    assert_eq!(controller.winning_line(), Some([2, 4, 6]));
}

#[test]
fn test_full_board_is_a_draw() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut controller = started(Difficulty::Hard);

    let mut last = TurnResult::Continue;
    for (human, computer) in [(0, Some(4)), (1, Some(2)), (6, Some(3)), (5, Some(8)), (7, None)] {
        last = controller.play_human(human, &mut rng).unwrap();
        if let Some(expected) = computer {
            let (pos, result) = controller.play_computer(&mut rng).unwrap();
            assert_eq!(pos, expected);
            assert_eq!(result, TurnResult::Continue);
        }
    }

    let TurnResult::Finished(report) = last else {
        panic!("board should be full");
    };
    assert_eq!(report.status(), GameStatus::Draw);
    assert_eq!(report.outcome(), Outcome::Draw);
    assert_eq!(report.message(), "Ничья");
    assert_eq!(controller.winning_line(), None);
}

#[test]
fn test_no_moves_after_game_over() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut controller = started(Difficulty::Hard);
    for pos in [0, 1] {
        controller.play_human(pos, &mut rng).unwrap();
        controller.play_computer(&mut rng).unwrap();
    }
    controller.play_human(8, &mut rng).unwrap();
    controller.play_computer(&mut rng).unwrap();
    assert_eq!(controller.status(), GameStatus::Lost);

    assert!(matches!(
        controller.play_human(3, &mut rng),
        Err(TurnError::NotPlaying(GameStatus::Lost))
    ));
    assert!(matches!(
        controller.play_computer(&mut rng),
        Err(TurnError::NotPlaying(GameStatus::Lost))
    ));
}

#[test]
fn test_start_resets_finished_game() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut controller = started(Difficulty::Hard);
    for pos in [0, 1] {
        controller.play_human(pos, &mut rng).unwrap();
        controller.play_computer(&mut rng).unwrap();
    }
    controller.play_human(8, &mut rng).unwrap();
    controller.play_computer(&mut rng).unwrap();

    controller.start();
    assert_eq!(controller.status(), GameStatus::Playing);
    assert_eq!(controller.board().empty_cells().len(), 9);
    assert_eq!(controller.outcome(), None);
    assert!(controller.is_human_turn());
}
