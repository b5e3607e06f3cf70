//! User settings and their TOML store.

use blossom_tictactoe::{Difficulty, Player};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Environment variable that supplies the bot token when the file has none.
pub const BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
/// Environment variable that supplies the chat id when the file has none.
pub const CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

/// Visual theme for the marks.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    /// Flower for X, gem for O.
    #[default]
    Flowers,
    /// Heart for X, star for O.
    Hearts,
    /// Cat for X, fish for O.
    Cats,
}

impl Theme {
    /// Glyph drawn for a player's mark.
    pub fn glyph(self, player: Player) -> &'static str {
        match (self, player) {
            (Theme::Flowers, Player::X) => "✿",
            (Theme::Flowers, Player::O) => "◆",
            (Theme::Hearts, Player::X) => "♥",
            (Theme::Hearts, Player::O) => "★",
            (Theme::Cats, Player::X) => "🐱",
            (Theme::Cats, Player::O) => "🐟",
        }
    }
}

/// Telegram Bot API credentials.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather.
    #[serde(default)]
    bot_token: String,

    /// Chat that receives game results.
    #[serde(default)]
    chat_id: String,

    /// API root, without a trailing slash.
    #[serde(default = "default_api_base")]
    api_base: String,
}

fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_base: default_api_base(),
        }
    }
}

impl TelegramConfig {
    /// Creates credentials for the public Telegram API.
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            api_base: default_api_base(),
        }
    }

    /// Points the client at a different API root.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// True when both the token and the chat id are set.
    pub fn is_configured(&self) -> bool {
        !self.bot_token.trim().is_empty() && !self.chat_id.trim().is_empty()
    }

    /// Fills empty fields from the given lookup, normally the process environment.
    #[instrument(skip_all)]
    pub fn fill_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.bot_token.is_empty()
            && let Some(token) = lookup(BOT_TOKEN_ENV)
        {
            debug!("Bot token taken from environment");
            self.bot_token = token;
        }
        if self.chat_id.is_empty()
            && let Some(chat_id) = lookup(CHAT_ID_ENV)
        {
            debug!("Chat id taken from environment");
            self.chat_id = chat_id;
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct AppSettings {
    /// Computer opponent strength.
    #[serde(default)]
    difficulty: Difficulty,

    /// Mark glyphs.
    #[serde(default)]
    theme: Theme,

    /// Play sound cues.
    #[serde(default = "default_true")]
    sound_enabled: bool,

    /// Play vibration patterns.
    #[serde(default = "default_true")]
    haptics_enabled: bool,

    /// Pause before the computer moves, in milliseconds.
    #[serde(default = "default_computer_delay_ms")]
    computer_delay_ms: u64,

    /// Where game results are sent.
    #[serde(default)]
    telegram: TelegramConfig,
}

fn default_true() -> bool {
    true
}

fn default_computer_delay_ms() -> u64 {
    700
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            theme: Theme::default(),
            sound_enabled: true,
            haptics_enabled: true,
            computer_delay_ms: default_computer_delay_ms(),
            telegram: TelegramConfig::default(),
        }
    }
}

impl AppSettings {
    /// Sets the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Sets the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Turns sound cues on or off.
    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    /// Turns vibration patterns on or off.
    pub fn with_haptics(mut self, enabled: bool) -> Self {
        self.haptics_enabled = enabled;
        self
    }

    /// Sets the computer's thinking delay.
    pub fn with_computer_delay_ms(mut self, delay_ms: u64) -> Self {
        self.computer_delay_ms = delay_ms;
        self
    }

    /// Replaces the Telegram credentials.
    pub fn with_telegram(mut self, telegram: TelegramConfig) -> Self {
        self.telegram = telegram;
        self
    }

    /// Mutable access to the Telegram credentials.
    pub fn telegram_mut(&mut self) -> &mut TelegramConfig {
        &mut self.telegram
    }
}

/// Loads and saves [`AppSettings`] as a TOML file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store backed by `path`. Nothing is read until [`Self::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads settings, falling back to defaults when the file does not exist.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<AppSettings, SettingsError> {
        if !self.path.exists() {
            info!("Settings file not found, using defaults");
            return Ok(AppSettings::default());
        }

        debug!("Loading settings from file");
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| SettingsError::new(format!("Failed to read settings file: {}", e)))?;

        let settings: AppSettings = toml::from_str(&content)
            .map_err(|e| SettingsError::new(format!("Failed to parse settings: {}", e)))?;

        info!(difficulty = %settings.difficulty, theme = %settings.theme, "Settings loaded");
        Ok(settings)
    }

    /// Writes settings, creating parent directories as needed.
    #[instrument(skip(self, settings), fields(path = %self.path.display()))]
    pub fn save(&self, settings: &AppSettings) -> Result<(), SettingsError> {
        let content = toml::to_string_pretty(settings)
            .map_err(|e| SettingsError::new(format!("Failed to serialize settings: {}", e)))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::new(format!("Failed to create settings directory: {}", e))
            })?;
        }

        std::fs::write(&self.path, content)
            .map_err(|e| SettingsError::new(format!("Failed to write settings file: {}", e)))?;

        info!("Settings saved");
        Ok(())
    }
}

/// Settings error.
#[derive(Debug, Clone, Display, Error)]
#[display("Settings error: {} at {}:{}", message, file, line)]
pub struct SettingsError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SettingsError {
    /// Creates a new settings error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
