//! Full-screen terminal front-end.
//!
//! The board is drawn with ratatui and keys are read from crossterm on a
//! blocking task, then forwarded over a channel so the game loop can be
//! driven by any key source.

mod app;
mod input;
mod ui;

pub use app::{App, Screen, SessionEnd};
pub use input::{Command, command_for_key, move_cursor};
pub use ui::{WIN_HIGHLIGHT, cell_width, draw, result_text};

use crate::effects::Effects;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::Rng;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

const INPUT_POLL: Duration = Duration::from_millis(100);

/// Runs `app` full-screen until the session ends, then restores the terminal.
pub async fn run_tui<E: Effects, R: Rng>(mut app: App<E, R>) -> Result<SessionEnd> {
    info!("Starting terminal UI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (key_tx, mut key_rx) = mpsc::unbounded_channel();
    let reader = spawn_key_reader(key_tx);

    let res = run_app(&mut terminal, &mut app, &mut key_rx).await;

    drop(key_rx);
    if let Err(e) = reader.await {
        warn!(error = %e, "Key reader task failed");
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Reads key presses until the receiving side is dropped.
///
/// Raw mode swallows Ctrl+C, so it is forwarded as Esc.
fn spawn_key_reader(tx: mpsc::UnboundedSender<KeyCode>) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(INPUT_POLL) {
                Ok(false) => {}
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        let code = if key.modifiers.contains(KeyModifiers::CONTROL)
                            && key.code == KeyCode::Char('c')
                        {
                            KeyCode::Esc
                        } else {
                            key.code
                        };
                        if tx.send(code).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!(error = %e, "Failed to read terminal event");
                        break;
                    }
                },
                Err(e) => {
                    warn!(error = %e, "Failed to poll terminal events");
                    break;
                }
            }
        }
        debug!("Key reader stopped");
    })
}

/// Game loop: draw, run the computer when it is due, otherwise wait for a key.
///
/// Returns when the session ends or `keys` is closed.
#[instrument(skip_all)]
pub async fn run_app<B, E, R>(
    terminal: &mut Terminal<B>,
    app: &mut App<E, R>,
    keys: &mut mpsc::UnboundedReceiver<KeyCode>,
) -> Result<SessionEnd>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
    E: Effects,
    R: Rng,
{
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        if let Some(end) = app.end() {
            info!(?end, "Session over");
            return Ok(end.clone());
        }

        if app.has_pending_notice() {
            app.send_result().await;
            continue;
        }

        if app.is_computer_turn() {
            let delay = app.computer_delay();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            app.computer_turn().context("computer move failed")?;
            continue;
        }

        match keys.recv().await {
            Some(code) => app.handle_key(code),
            None => {
                debug!("Input closed");
                return Ok(app.end_on_input_closed());
            }
        }
    }
}
