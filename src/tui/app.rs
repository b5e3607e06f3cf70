//! Application state and logic.

use super::input::{Command, command_for_key, move_cursor};
use crate::controller::{GameController, GameReport, GameStatus, TurnError, TurnResult};
use crate::effects::{Effects, SoundCue, haptics};
use crate::notifier::Notifier;
use crate::settings::{AppSettings, Theme};
use blossom_tictactoe::Position;
use crossterm::event::KeyCode;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// The human won; the session stops after the promo code was shown.
    Won(GameReport),
    /// The human declined another game after a loss or draw.
    Declined,
    /// The human quit or input ran out.
    Quit,
}

/// Screen currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Board with the move cursor.
    Playing,
    /// Board with the winning line and the result panel.
    Result(GameReport),
}

/// Main application state.
pub struct App<E, R> {
    controller: GameController,
    effects: E,
    rng: R,
    notifier: Option<Arc<dyn Notifier>>,
    theme: Theme,
    computer_delay: Duration,
    cursor: Position,
    screen: Screen,
    status_message: String,
    delivery: Option<String>,
    pending_notice: Option<String>,
    end: Option<SessionEnd>,
}

impl<E, R> App<E, R> {
    /// The turn controller.
    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    /// Mark glyph theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Cell under the keyboard cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Screen currently shown.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// One-line status under the board.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// State of the result notification, once one was attempted.
    pub fn delivery(&self) -> Option<&str> {
        self.delivery.as_deref()
    }

    /// Pause before each computer move.
    pub fn computer_delay(&self) -> Duration {
        self.computer_delay
    }

    /// Set once the session is over.
    pub fn end(&self) -> Option<&SessionEnd> {
        self.end.as_ref()
    }

    /// How the session ends when input runs out: a shown win stays a win.
    pub fn end_on_input_closed(&self) -> SessionEnd {
        match &self.screen {
            Screen::Result(report) if report.status() == GameStatus::Won => {
                SessionEnd::Won(report.clone())
            }
            _ => SessionEnd::Quit,
        }
    }

    /// True while the computer is to move.
    pub fn is_computer_turn(&self) -> bool {
        self.screen == Screen::Playing
            && self.controller.status() == GameStatus::Playing
            && !self.controller.is_human_turn()
    }

    /// True when a finished game still has to be reported.
    pub fn has_pending_notice(&self) -> bool {
        self.pending_notice.is_some()
    }
}

impl<E: Effects, R: Rng> App<E, R> {
    /// Creates the app and starts the first game.
    pub fn new(effects: E, settings: &AppSettings, rng: R) -> Self {
        let mut app = Self {
            controller: GameController::new(*settings.difficulty()),
            effects,
            rng,
            notifier: None,
            theme: *settings.theme(),
            computer_delay: Duration::from_millis(*settings.computer_delay_ms()),
            cursor: Position::Center,
            screen: Screen::Playing,
            status_message: String::new(),
            delivery: None,
            pending_notice: None,
            end: None,
        };
        app.start_game();
        app
    }

    /// Sends finished-game messages through `notifier`.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Clears the board and starts a new game.
    pub fn start_game(&mut self) {
        self.controller.start();
        self.screen = Screen::Playing;
        self.cursor = Position::Center;
        self.delivery = None;
        self.pending_notice = None;
        self.status_message = "Ваш ход".to_string();
        self.effects.play(SoundCue::Start);
        info!(difficulty = %self.controller.difficulty(), "Game started");
    }

    /// Handles a key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, code: KeyCode) {
        let Some(command) = command_for_key(code) else {
            debug!("Ignoring key");
            return;
        };

        match self.screen.clone() {
            Screen::Playing => self.handle_playing(command),
            Screen::Result(report) => self.handle_result(command, report),
        }
    }

    fn handle_playing(&mut self, command: Command) {
        match command {
            Command::Place(position) => self.place(position),
            Command::Select => self.place(self.cursor),
            Command::Cursor(key) => self.cursor = move_cursor(self.cursor, key),
            Command::Quit => {
                info!("Player quit");
                self.end = Some(SessionEnd::Quit);
            }
            Command::Yes | Command::No => {}
        }
    }

    fn handle_result(&mut self, command: Command, report: GameReport) {
        if matches!(command, Command::Cursor(_) | Command::Place(_)) {
            return;
        }

        if report.status() == GameStatus::Won {
            self.end = Some(SessionEnd::Won(report));
            return;
        }

        match command {
            Command::Yes | Command::Select => self.start_game(),
            _ => {
                info!("Player declined a rematch");
                self.end = Some(SessionEnd::Declined);
            }
        }
    }

    fn place(&mut self, position: Position) {
        if !self.controller.is_human_turn() {
            debug!("Computer is still thinking");
            return;
        }

        self.cursor = position;
        match self
            .controller
            .play_human(position.to_index(), &mut self.rng)
        {
            Ok(result) => {
                debug!(%position, "Human move");
                self.effects.play(SoundCue::Click);
                self.effects.vibrate(haptics::CLICK);
                self.status_message = "Компьютер думает...".to_string();
                self.apply(result);
            }
            Err(TurnError::Rules(e)) => {
                debug!(error = %e, "Move rejected");
                self.status_message = format!("Клетка {} уже занята", position.to_index() + 1);
            }
            Err(e) => {
                warn!(error = %e, "Move refused");
                self.status_message = e.to_string();
            }
        }
    }

    /// Lets the computer make its move. Returns the chosen cell.
    #[instrument(skip(self))]
    pub fn computer_turn(&mut self) -> Result<usize, TurnError> {
        let (pos, result) = self.controller.play_computer(&mut self.rng)?;
        self.effects.play(SoundCue::Click);
        self.status_message = format!("Компьютер выбрал клетку {}. Ваш ход", pos + 1);
        self.apply(result);
        Ok(pos)
    }

    fn apply(&mut self, result: TurnResult) {
        if let TurnResult::Finished(report) = result {
            self.finish(report);
        }
    }

    fn finish(&mut self, report: GameReport) {
        match report.status() {
            GameStatus::Won => {
                self.effects.celebrate();
                self.effects.play(SoundCue::Win);
                self.effects.vibrate(haptics::WIN);
            }
            GameStatus::Lost => {
                self.effects.play(SoundCue::Loss);
                self.effects.vibrate(haptics::LOSS);
            }
            _ => {
                self.effects.play(SoundCue::Draw);
                self.effects.vibrate(haptics::DRAW);
            }
        }

        info!(status = %report.status(), "Game finished");
        self.status_message = report.message();
        if self.notifier.is_some() {
            self.pending_notice = Some(report.message());
            self.delivery = Some("Отправка результата...".to_string());
        }
        self.screen = Screen::Result(report);
    }

    /// Delivers the pending result message, if any. Failures are shown, not returned.
    pub async fn send_result(&mut self) {
        let Some(message) = self.pending_notice.take() else {
            return;
        };
        let Some(notifier) = self.notifier.clone() else {
            return;
        };

        match notifier.notify(&message).await {
            Ok(()) => self.delivery = Some("Результат отправлен".to_string()),
            Err(e) => {
                warn!(error = %e, "Result notification failed");
                self.delivery = Some(format!("Не удалось отправить результат: {}", e.message));
            }
        }
    }
}
