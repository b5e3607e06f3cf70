//! Core domain types for tic-tac-toe.

use crate::error::TicTacToeError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Player {
    /// Player X, the human side. Moves first.
    X,
    /// Player O, the computer side.
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

impl From<Option<Player>> for Square {
    fn from(value: Option<Player>) -> Self {
        value.map_or(Square::Empty, Square::Occupied)
    }
}

/// Snapshot of a 3x3 board.
///
/// Squares are stored in row-major order, index 0 is the top-left corner and
/// index 8 the bottom-right one. A board is never changed in place by the
/// rules; [`Board::with_move`] returns the next snapshot instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; CELL_COUNT],
}

impl Board {
    /// Creates a new empty board.
    pub const fn new() -> Self {
        Self {
            squares: [Square::Empty; CELL_COUNT],
        }
    }

    /// Creates a board from nine squares.
    pub const fn from_squares(squares: [Square; CELL_COUNT]) -> Self {
        Self { squares }
    }

    /// Creates a board from a slice, which must hold exactly nine squares.
    #[track_caller]
    pub fn from_slice(squares: &[Square]) -> Result<Self, TicTacToeError> {
        let squares: [Square; CELL_COUNT] = squares.try_into().map_err(|_| {
            TicTacToeError::invalid_argument(format!(
                "board must have {} cells, got {}",
                CELL_COUNT,
                squares.len()
            ))
        })?;
        Ok(Self { squares })
    }

    /// Gets the square at the given position (0-8).
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Checks if a square is empty. Out-of-range positions are never empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; CELL_COUNT] {
        &self.squares
    }

    /// Indices of the empty squares, ascending.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, square)| **square == Square::Empty)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Returns the board that results from `player` taking `pos`.
    ///
    /// Fails if `pos` is out of range or already occupied.
    #[track_caller]
    pub fn with_move(&self, pos: usize, player: Player) -> Result<Self, TicTacToeError> {
        match self.get(pos) {
            None => Err(TicTacToeError::invalid_argument(format!(
                "position {} out of bounds (must be 0-8)",
                pos
            ))),
            Some(Square::Occupied(owner)) => Err(TicTacToeError::invalid_state(format!(
                "square {} is already occupied by {}",
                pos, owner
            ))),
            Some(Square::Empty) => {
                let mut next = *self;
                next.squares[pos] = Square::Occupied(player);
                Ok(next)
            }
        }
    }

    /// Places a mark without any checks. Used for hypothetical boards.
    pub(crate) fn with_square(&self, pos: usize, square: Square) -> Self {
        let mut next = *self;
        next.squares[pos] = square;
        next
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their 1-based number, matching keyboard input.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(player) => player.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[Option<Player>; CELL_COUNT]> for Board {
    fn from(cells: [Option<Player>; CELL_COUNT]) -> Self {
        Self {
            squares: cells.map(Square::from),
        }
    }
}

/// Parses a compact board notation.
///
/// `X` and `O` (any case) are marks, `.`, `-` and `_` are empty squares.
/// Whitespace and `|` separators are ignored, so both `"XX.OO...."` and
/// `"XX.|OO.|..."` describe the same board.
impl FromStr for Board {
    type Err = TicTacToeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut squares = Vec::with_capacity(CELL_COUNT);
        for c in s.chars() {
            let square = match c {
                'X' | 'x' => Square::Occupied(Player::X),
                'O' | 'o' => Square::Occupied(Player::O),
                '.' | '-' | '_' => Square::Empty,
                '|' => continue,
                c if c.is_whitespace() => continue,
                other => {
                    return Err(TicTacToeError::invalid_argument(format!(
                        "unexpected character {:?} in board",
                        other
                    )));
                }
            };
            squares.push(square);
        }
        Self::from_slice(&squares)
    }
}
