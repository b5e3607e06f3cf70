//! Pure tic-tac-toe logic.
//!
//! Two stateless entry points:
//!
//! - [`evaluate`] decides whether a board is won, drawn or still open.
//! - [`select_move`] picks the computer's next cell for a difficulty level.
//!
//! Callers own the game state; both functions take a [`Board`] snapshot and
//! never change it.
//!
//! ```
//! use blossom_tictactoe::{Board, Difficulty, Outcome, Player, evaluate, select_move};
//! use rand::SeedableRng;
//!
//! let board: Board = "XX.|OO.|...".parse()?;
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let pos = select_move(&board, Difficulty::Hard, &mut rng)?;
//! assert_eq!(pos, 5);
//!
//! let next = board.with_move(pos, Player::O)?;
//! assert_eq!(
//!     evaluate(&next),
//!     Some(Outcome::Win { winner: Player::O, line: [3, 4, 5] })
//! );
//! # Ok::<(), blossom_tictactoe::TicTacToeError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod difficulty;
mod error;
mod opponent;
mod position;
mod rules;
mod types;

pub use difficulty::Difficulty;
pub use error::{TicTacToeError, TicTacToeErrorKind};
pub use opponent::{COMPUTER, select_move, select_move_as};
pub use position::Position;
pub use rules::{
    CENTER, CORNERS, Line, Outcome, WINNING_LINES, check_winner, evaluate, is_draw, is_full,
};
pub use types::{Board, CELL_COUNT, Player, Square};
