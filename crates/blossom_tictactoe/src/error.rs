//! Error types for tic-tac-toe rules and move selection.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TicTacToeErrorKind {
    /// The operation is not allowed in the current board state.
    #[display("Invalid state: {}", _0)]
    InvalidState(String),

    /// The caller passed malformed input.
    #[display("Invalid argument: {}", _0)]
    InvalidArgument(String),
}

/// Tic-tac-toe error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Tic-tac-toe error: {} at {}:{}", kind, file, line)]
pub struct TicTacToeError {
    /// Error category and message.
    pub kind: TicTacToeErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl TicTacToeError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument(skip(kind))]
    pub fn new(kind: TicTacToeErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for an [`TicTacToeErrorKind::InvalidState`] error.
    #[track_caller]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(TicTacToeErrorKind::InvalidState(message.into()))
    }

    /// Shorthand for an [`TicTacToeErrorKind::InvalidArgument`] error.
    #[track_caller]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(TicTacToeErrorKind::InvalidArgument(message.into()))
    }

    /// Returns the error category.
    pub fn kind(&self) -> &TicTacToeErrorKind {
        &self.kind
    }
}
