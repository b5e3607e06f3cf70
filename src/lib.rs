//! Blossom Games library - tic-tac-toe against a casual computer opponent
//!
//! The rules and the opponent live in [`blossom_tictactoe`]; this crate adds
//! everything around them.
//!
//! # Architecture
//!
//! - **Controller**: owns the board, alternates human and computer moves
//! - **Settings**: difficulty, theme, effect toggles and Telegram credentials in TOML
//! - **Effects**: sound cues, vibration patterns and celebration
//! - **Notifier**: posts finished-game messages to a Telegram chat
//! - **TUI**: full-screen ratatui front-end driven by crossterm key events
//!
//! # Example
//!
//! ```
//! use blossom_games::{GameController, GameStatus, TurnResult};
//! use blossom_tictactoe::Difficulty;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let mut controller = GameController::new(Difficulty::Hard);
//! controller.start();
//!
//! assert_eq!(controller.play_human(0, &mut rng)?, TurnResult::Continue);
//! let (pos, _) = controller.play_computer(&mut rng)?;
//! assert_eq!(pos, 4);
//! assert_eq!(controller.status(), GameStatus::Playing);
//! # Ok::<(), blossom_games::TurnError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod controller;
mod effects;
mod notifier;
mod promo;
mod settings;
mod tui;

/// Command-line definitions shared with the binary.
pub mod cli;

// Crate-level exports - Turn controller
pub use controller::{GameController, GameReport, GameStatus, HUMAN, TurnError, TurnResult};

// Crate-level exports - Effects
pub use effects::{
    CONFETTI, Effects, NoEffects, SoundCue, TerminalEffects, Tone, Waveform, haptics,
};

// Crate-level exports - Notifications
pub use notifier::{Notifier, NotifyError, TelegramNotifier};

// Crate-level exports - Promo codes
pub use promo::{PROMO_CODE_LEN, generate_promo_code};

// Crate-level exports - Settings
pub use settings::{
    AppSettings, BOT_TOKEN_ENV, CHAT_ID_ENV, SettingsError, SettingsStore, TelegramConfig, Theme,
};

// Crate-level exports - Terminal front-end
pub use tui::{
    App, Command, Screen, SessionEnd, WIN_HIGHLIGHT, cell_width, command_for_key, draw,
    move_cursor, result_text, run_app, run_tui,
};
