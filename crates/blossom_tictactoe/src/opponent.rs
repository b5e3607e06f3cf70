//! Computer opponent.
//!
//! A greedy heuristic rather than a game-tree search: win if possible,
//! otherwise block, otherwise prefer the center, then a corner, then anything.
//! It does not look ahead for forks, so a careful player can beat it.

use crate::difficulty::Difficulty;
use crate::error::TicTacToeError;
use crate::rules::{CENTER, CORNERS, evaluate};
use crate::types::{Board, Player, Square};
use rand::Rng;
use tracing::{debug, instrument};

/// The side the computer plays.
pub const COMPUTER: Player = Player::O;

/// Chooses the computer's next cell, playing as [`COMPUTER`].
///
/// See [`select_move_as`].
#[instrument(skip(rng))]
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<usize, TicTacToeError> {
    select_move_as(board, COMPUTER, difficulty, rng)
}

/// Chooses the next cell for `bot`.
///
/// Fails with an invalid-state error when the board has no empty cell. The
/// returned index always points at an empty cell.
#[instrument(skip(rng))]
pub fn select_move_as<R: Rng + ?Sized>(
    board: &Board,
    bot: Player,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<usize, TicTacToeError> {
    let available = board.empty_cells();
    if available.is_empty() {
        return Err(TicTacToeError::invalid_state(
            "cannot select a move on a full board",
        ));
    }

    let roll: f64 = rng.random();
    if roll < difficulty.mistake_chance() {
        let pos = pick(&available, rng);
        debug!(pos, roll, %difficulty, "Random mistake");
        return Ok(pos);
    }

    if let Some(pos) = find_winning_move(board, &available, bot) {
        debug!(pos, "Taking winning move");
        return Ok(pos);
    }

    if let Some(pos) = find_winning_move(board, &available, bot.opponent()) {
        debug!(pos, "Blocking opponent");
        return Ok(pos);
    }

    if board.is_empty(CENTER) {
        debug!("Taking center");
        return Ok(CENTER);
    }

    let corners: Vec<usize> = CORNERS
        .iter()
        .copied()
        .filter(|&pos| board.is_empty(pos))
        .collect();
    if !corners.is_empty() {
        let pos = pick(&corners, rng);
        debug!(pos, "Taking corner");
        return Ok(pos);
    }

    let pos = pick(&available, rng);
    debug!(pos, "Taking remaining cell");
    Ok(pos)
}

/// First cell, in ascending order, where `mark` would complete a line.
fn find_winning_move(board: &Board, available: &[usize], mark: Player) -> Option<usize> {
    available.iter().copied().find(|&pos| {
        let next = board.with_square(pos, Square::Occupied(mark));
        evaluate(&next).and_then(|outcome| outcome.winner()) == Some(mark)
    })
}

fn pick<R: Rng + ?Sized>(cells: &[usize], rng: &mut R) -> usize {
    cells[rng.random_range(0..cells.len())]
}
