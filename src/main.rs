//! Blossom Games - terminal tic-tac-toe
//!
//! Plays against the computer and manages the settings file.

use anyhow::{Result, bail};
use blossom_games::cli::{Cli, Command, SettingsAction};
use blossom_games::{
    App, AppSettings, Notifier, SessionEnd, SettingsStore, TelegramConfig, TelegramNotifier,
    TerminalEffects, run_tui,
};
use blossom_tictactoe::Difficulty;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // The game owns the terminal, so it logs to a file
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if matches!(cli.command, Command::Play { .. }) {
        let log_file = std::fs::File::create(&cli.log_file)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Arc::new(log_file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let store = SettingsStore::new(&cli.settings);

    match cli.command {
        Command::Play {
            difficulty,
            seed,
            no_notify,
            fast,
        } => run_play(&store, difficulty, seed, no_notify, fast).await,
        Command::Settings { action } => run_settings(&store, action),
    }
}

/// Loads settings and fills missing Telegram credentials from the environment.
fn load_settings(store: &SettingsStore) -> Result<AppSettings> {
    let mut settings = store.load()?;
    settings
        .telegram_mut()
        .fill_from(|key| std::env::var(key).ok().filter(|v| !v.is_empty()));
    Ok(settings)
}

/// Run the full-screen game
#[instrument(skip(store))]
async fn run_play(
    store: &SettingsStore,
    difficulty: Option<Difficulty>,
    seed: Option<u64>,
    no_notify: bool,
    fast: bool,
) -> Result<()> {
    let mut settings = load_settings(store)?;
    if let Some(difficulty) = difficulty {
        settings = settings.with_difficulty(difficulty);
    }
    if fast {
        settings = settings.with_computer_delay_ms(0);
    }

    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let effects = TerminalEffects::new(
        std::io::stdout(),
        *settings.sound_enabled(),
        *settings.haptics_enabled(),
    );
    let mut app = App::new(effects, &settings, rng);

    if !no_notify && settings.telegram().is_configured() {
        let notifier: Arc<dyn Notifier> =
            Arc::new(TelegramNotifier::new(settings.telegram().clone()));
        app = app.with_notifier(notifier);
    }

    match run_tui(app).await? {
        SessionEnd::Won(report) => {
            info!(message = %report.message(), "Session ended with a win");
            if let Some(code) = report.promo_code() {
                println!("Ваш промокод: {}", code);
            }
        }
        SessionEnd::Declined => info!("Player declined a rematch"),
        SessionEnd::Quit => info!("Player quit"),
    }
    Ok(())
}

/// Run a settings subcommand
#[instrument(skip_all)]
fn run_settings(store: &SettingsStore, action: SettingsAction) -> Result<()> {
    match action {
        SettingsAction::Show => {
            let settings = load_settings(store)?;
            let token = settings.telegram().bot_token();
            let masked = if token.is_empty() {
                "(not set)".to_string()
            } else {
                format!("{}…", token.chars().take(4).collect::<String>())
            };
            println!("settings file:   {}", store.path().display());
            println!("difficulty:      {}", settings.difficulty());
            println!("theme:           {}", settings.theme());
            println!("sound:           {}", settings.sound_enabled());
            println!("haptics:         {}", settings.haptics_enabled());
            println!("computer delay:  {} ms", settings.computer_delay_ms());
            println!("telegram token:  {}", masked);
            println!("telegram chat:   {}", settings.telegram().chat_id());
            println!("telegram api:    {}", settings.telegram().api_base());
        }
        SettingsAction::Init { force } => {
            if store.path().exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    store.path().display()
                );
            }
            store.save(&AppSettings::default())?;
            println!("wrote {}", store.path().display());
        }
        SettingsAction::SetDifficulty { difficulty } => {
            let settings = store.load()?.with_difficulty(difficulty);
            store.save(&settings)?;
            println!("difficulty set to {}", difficulty);
        }
        SettingsAction::SetTheme { theme } => {
            let settings = store.load()?.with_theme(theme);
            store.save(&settings)?;
            println!("theme set to {}", theme);
        }
        SettingsAction::SetSound { enabled } => {
            let settings = store.load()?.with_sound(enabled);
            store.save(&settings)?;
            println!("sound {}", if enabled { "on" } else { "off" });
        }
        SettingsAction::SetHaptics { enabled } => {
            let settings = store.load()?.with_haptics(enabled);
            store.save(&settings)?;
            println!("haptics {}", if enabled { "on" } else { "off" });
        }
        SettingsAction::SetTelegram { bot_token, chat_id } => {
            let settings = store
                .load()?
                .with_telegram(TelegramConfig::new(bot_token, chat_id));
            store.save(&settings)?;
            println!("telegram credentials saved to {}", store.path().display());
        }
    }
    Ok(())
}
