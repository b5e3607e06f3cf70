//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Player, Square};
use tracing::instrument;

/// A winning line as three board indices.
pub type Line = [usize; 3];

/// The eight winning lines in scan order.
///
/// Rows top to bottom, columns left to right, then the main diagonal before
/// the anti-diagonal. When a board holds more than one completed line the
/// earliest one in this order is reported.
pub const WINNING_LINES: [Line; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks if there is a winner on the board.
///
/// Returns the player and the first line, in [`WINNING_LINES`] order, that
/// the player fully occupies.
#[instrument]
pub fn check_winner(board: &Board) -> Option<(Player, Line)> {
    WINNING_LINES.iter().find_map(|&line| {
        let [a, b, c] = line;
        let squares = board.squares();
        match squares[a] {
            Square::Occupied(player) if squares[b] == squares[a] && squares[c] == squares[a] => {
                Some((player, line))
            }
            _ => None,
        }
    })
}
