//! Command-line interface for blossom_games.

use blossom_tictactoe::Difficulty;
use crate::settings::Theme;
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Blossom Games - tic-tac-toe against a casual computer opponent
#[derive(Parser, Debug)]
#[command(name = "blossom_games")]
#[command(about = "Tic-tac-toe against a casual computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the settings file
    #[arg(long, global = true, default_value = "blossom_settings.toml")]
    pub settings: PathBuf,

    /// Log file used while the game owns the terminal
    #[arg(long, global = true, default_value = "blossom_games.log")]
    pub log_file: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Override the configured difficulty (easy, medium, hard)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Seed for the computer's random choices
        #[arg(long)]
        seed: Option<u64>,

        /// Do not send results to Telegram even if configured
        #[arg(long)]
        no_notify: bool,

        /// Disable the computer's thinking pause
        #[arg(long)]
        fast: bool,
    },

    /// Inspect or change settings
    Settings {
        /// Settings action
        #[command(subcommand)]
        action: SettingsAction,
    },
}

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print the effective settings (the bot token is masked)
    Show,

    /// Write a settings file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Change the difficulty
    SetDifficulty {
        /// New difficulty (easy, medium, hard)
        difficulty: Difficulty,
    },

    /// Change the mark glyphs
    SetTheme {
        /// New theme (flowers, hearts, cats)
        theme: Theme,
    },

    /// Turn sound cues on or off
    SetSound {
        /// on/off, yes/no or true/false
        #[arg(action = ArgAction::Set, value_parser = BoolishValueParser::new())]
        enabled: bool,
    },

    /// Turn vibration patterns on or off
    SetHaptics {
        /// on/off, yes/no or true/false
        #[arg(action = ArgAction::Set, value_parser = BoolishValueParser::new())]
        enabled: bool,
    },

    /// Store Telegram credentials for result notifications
    SetTelegram {
        /// Bot token issued by BotFather
        bot_token: String,
        /// Chat that receives game results
        chat_id: String,
    },
}
