//! Turn controller: owns the board and alternates human and computer moves.

use crate::promo::generate_promo_code;
use blossom_tictactoe::{
    Board, COMPUTER, Difficulty, Line, Outcome, Player, TicTacToeError, evaluate, select_move,
};
use rand::Rng;
use tracing::{debug, info, instrument};

/// The side the human plays. Moves first.
pub const HUMAN: Player = Player::X;

/// Game status from the human player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum GameStatus {
    /// No game started yet.
    Idle,
    /// A game is running.
    Playing,
    /// The human won.
    Won,
    /// The computer won.
    Lost,
    /// Nobody won.
    Draw,
}

impl GameStatus {
    /// True once the game has ended.
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost | GameStatus::Draw)
    }
}

/// Summary of a finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    status: GameStatus,
    outcome: Outcome,
    promo_code: Option<String>,
}

impl GameReport {
    /// Final status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Raw outcome, including the winning line.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Promo code, present only when the human won.
    pub fn promo_code(&self) -> Option<&str> {
        self.promo_code.as_deref()
    }

    /// Message sent to the result chat.
    pub fn message(&self) -> String {
        match (self.status, self.promo_code()) {
            (GameStatus::Won, Some(code)) => format!("Победа! Промокод: {}", code),
            (GameStatus::Won, None) => "Победа!".to_string(),
            (GameStatus::Lost, _) => "Проигрыш".to_string(),
            _ => "Ничья".to_string(),
        }
    }
}

/// What a move led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnResult {
    /// The game goes on; the other side moves next.
    Continue,
    /// The move ended the game.
    Finished(GameReport),
}

/// Error returned when a move is refused.
#[derive(Debug, Clone, derive_more::Display, derive_more::From)]
pub enum TurnError {
    /// No game is running.
    #[display("No game in progress (status: {})", _0)]
    NotPlaying(GameStatus),

    /// The other side is to move.
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(Player),

    /// The board rejected the move.
    #[display("{}", _0)]
    #[from]
    Rules(TicTacToeError),
}

impl std::error::Error for TurnError {}

/// Owns one game at a time and applies moves in strict alternation.
#[derive(Debug, Clone)]
pub struct GameController {
    board: Board,
    status: GameStatus,
    to_move: Player,
    difficulty: Difficulty,
    outcome: Option<Outcome>,
    promo_code: Option<String>,
}

impl GameController {
    /// Creates an idle controller.
    #[instrument]
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            board: Board::new(),
            status: GameStatus::Idle,
            to_move: HUMAN,
            difficulty,
            outcome: None,
            promo_code: None,
        }
    }

    /// Starts a fresh game with the human to move.
    #[instrument(skip(self))]
    pub fn start(&mut self) {
        info!(difficulty = %self.difficulty, "Starting new game");
        self.board = Board::new();
        self.status = GameStatus::Playing;
        self.to_move = HUMAN;
        self.outcome = None;
        self.promo_code = None;
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Side to move next.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Difficulty used for computer moves.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Changes the difficulty; takes effect on the next computer move.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Outcome of the finished game.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Line to highlight after a win.
    pub fn winning_line(&self) -> Option<Line> {
        self.outcome.and_then(|o| o.line())
    }

    /// Promo code earned in the finished game.
    pub fn promo_code(&self) -> Option<&str> {
        self.promo_code.as_deref()
    }

    /// True while the human may place a mark.
    pub fn is_human_turn(&self) -> bool {
        self.status == GameStatus::Playing && self.to_move == HUMAN
    }

    /// Places the human's mark at `pos`.
    ///
    /// `rng` is only used for the promo code if the move wins.
    #[instrument(skip(self, rng))]
    pub fn play_human<R: Rng + ?Sized>(
        &mut self,
        pos: usize,
        rng: &mut R,
    ) -> Result<TurnResult, TurnError> {
        self.check_turn(HUMAN)?;
        self.apply(pos, HUMAN, rng)
    }

    /// Lets the computer choose and place its mark.
    ///
    /// Returns the chosen cell together with the result.
    #[instrument(skip(self, rng))]
    pub fn play_computer<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<(usize, TurnResult), TurnError> {
        self.check_turn(COMPUTER)?;
        let pos = select_move(&self.board, self.difficulty, rng)?;
        debug!(pos, "Computer chose");
        let result = self.apply(pos, COMPUTER, rng)?;
        Ok((pos, result))
    }

    fn check_turn(&self, player: Player) -> Result<(), TurnError> {
        if self.status != GameStatus::Playing {
            return Err(TurnError::NotPlaying(self.status));
        }
        if self.to_move != player {
            return Err(TurnError::NotYourTurn(player));
        }
        Ok(())
    }

    fn apply<R: Rng + ?Sized>(
        &mut self,
        pos: usize,
        player: Player,
        rng: &mut R,
    ) -> Result<TurnResult, TurnError> {
        self.board = self.board.with_move(pos, player)?;

        match evaluate(&self.board) {
            None => {
                self.to_move = player.opponent();
                Ok(TurnResult::Continue)
            }
            Some(outcome) => Ok(TurnResult::Finished(self.finish(outcome, rng))),
        }
    }

    fn finish<R: Rng + ?Sized>(&mut self, outcome: Outcome, rng: &mut R) -> GameReport {
        let status = match outcome.winner() {
            Some(HUMAN) => GameStatus::Won,
            Some(_) => GameStatus::Lost,
            None => GameStatus::Draw,
        };
        let promo_code = (status == GameStatus::Won).then(|| generate_promo_code(rng));

        info!(%status, ?outcome, "Game over");
        self.status = status;
        self.outcome = Some(outcome);
        self.promo_code = promo_code.clone();

        GameReport {
            status,
            outcome,
            promo_code,
        }
    }
}
