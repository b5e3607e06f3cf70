//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`] snapshot. Nothing here mutates the board
//! or keeps state between calls.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{Line, WINNING_LINES, check_winner};

use crate::types::{Board, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Index of the center square.
pub const CENTER: usize = 4;

/// Corner indices in preference order.
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// Terminal result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A player completed a line.
    Win {
        /// The winning player.
        winner: Player,
        /// The completed line.
        line: Line,
    },
    /// The board is full and nobody completed a line.
    Draw,
}

impl Outcome {
    /// Returns the winner, or `None` for a draw.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win { winner, .. } => Some(*winner),
            Outcome::Draw => None,
        }
    }

    /// Returns the winning line, or `None` for a draw.
    pub fn line(&self) -> Option<Line> {
        match self {
            Outcome::Win { line, .. } => Some(*line),
            Outcome::Draw => None,
        }
    }
}

/// Evaluates a board.
///
/// Returns `None` while the game is undecided. A completed line is checked
/// before fullness, so a full board with three in a row is a win, not a draw.
#[instrument]
pub fn evaluate(board: &Board) -> Option<Outcome> {
    if let Some((winner, line)) = check_winner(board) {
        return Some(Outcome::Win { winner, line });
    }
    if is_full(board) {
        return Some(Outcome::Draw);
    }
    None
}
