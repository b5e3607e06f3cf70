//! Scripted sessions through the terminal front-end on a test backend.

mod common;

use async_trait::async_trait;
use blossom_games::{
    App, AppSettings, Effects, GameStatus, NoEffects, Notifier, NotifyError, Screen, SessionEnd,
    SoundCue, Theme, WIN_HIGHLIGHT, cell_width, draw, run_app,
};
use blossom_tictactoe::{Difficulty, Player, Square};
use common::ZeroRng;
use crossterm::event::KeyCode;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

#[derive(Default, Clone)]
struct RecordingNotifier {
    sent: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(message.to_string());
        if self.fail {
            return Err(NotifyError::new("Bad Request: chat not found".to_string()));
        }
        Ok(())
    }
}

#[derive(Default, Clone)]
struct RecordingEffects {
    log: Arc<Mutex<Vec<String>>>,
}

impl Effects for RecordingEffects {
    fn play(&mut self, cue: SoundCue) {
        self.log.lock().unwrap().push(format!("play {}", cue));
    }

    fn vibrate(&mut self, pattern: &[u32]) {
        self.log.lock().unwrap().push(format!("vibrate {:?}", pattern));
    }

    fn celebrate(&mut self) {
        self.log.lock().unwrap().push("celebrate".to_string());
    }
}

fn settings(difficulty: Difficulty) -> AppSettings {
    AppSettings::default()
        .with_difficulty(difficulty)
        .with_computer_delay_ms(0)
}

fn terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(80, 30)).unwrap()
}

/// Queues `codes` and closes the channel behind them.
fn keys(codes: &[KeyCode]) -> mpsc::UnboundedReceiver<KeyCode> {
    let (tx, rx) = mpsc::unbounded_channel();
    for code in codes {
        tx.send(*code).unwrap();
    }
    rx
}

fn chars(s: &str) -> Vec<KeyCode> {
    s.chars().map(KeyCode::Char).collect()
}

fn screen_rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buffer = terminal.backend().buffer();
    buffer
        .content
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect())
        .collect()
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    screen_rows(terminal).join("\n")
}

#[tokio::test]
async fn test_win_ends_session_with_promo_code() {
    let notifier = RecordingNotifier::default();
    let effects = RecordingEffects::default();
    let mut app = App::new(effects.clone(), &settings(Difficulty::Easy), ZeroRng)
        .with_notifier(Arc::new(notifier.clone()));
    let mut terminal = terminal();

    // The blundering computer takes cells 1 and 2 while X fills the anti diagonal.
    let mut input = chars("537");
    input.push(KeyCode::Enter);
    let end = run_app(&mut terminal, &mut app, &mut keys(&input))
        .await
        .unwrap();

    let report = match end {
        SessionEnd::Won(report) => report,
        other => panic!("expected a win, got {:?}", other),
    };
    let code = report.promo_code().unwrap().to_string();
    assert_eq!(code, "AAAAA");

    let text = screen_text(&terminal);
    assert!(text.contains("Поздравляем!"));
    assert!(text.contains(&format!("Ваш промокод: {}", code)));
    assert!(text.contains("Результат отправлен"));
    assert!(!text.contains("Попробовать снова?"));

    assert_eq!(
        notifier.sent.lock().unwrap().as_slice(),
        [format!("Победа! Промокод: {}", code)]
    );

    let log = effects.log.lock().unwrap().clone();
    assert_eq!(log.first().map(String::as_str), Some("play start"));
    assert!(log.contains(&"celebrate".to_string()));
    assert!(log.contains(&"play win".to_string()));
    assert!(log.contains(&"vibrate [100, 50, 100, 50, 200]".to_string()));
}

#[tokio::test]
async fn test_winning_line_is_highlighted_by_style() {
    let mut app = App::new(NoEffects, &settings(Difficulty::Easy), ZeroRng);
    let mut terminal = terminal();

    for key in chars("537") {
        app.handle_key(key);
        if app.is_computer_turn() {
            app.computer_turn().unwrap();
        }
    }
    assert!(matches!(app.screen(), Screen::Result(_)));
    terminal.draw(|frame| draw(frame, &app)).unwrap();

    let width = cell_width(Theme::Flowers) as usize;
    let highlighted = terminal
        .backend()
        .buffer()
        .content
        .iter()
        .filter(|cell| cell.bg == WIN_HIGHLIGHT)
        .count();
    // Three cells, each three rows tall.
    assert_eq!(highlighted, 3 * width * 3);

    let glyph = Theme::Flowers.glyph(Player::X);
    let marked = terminal
        .backend()
        .buffer()
        .content
        .iter()
        .filter(|cell| cell.symbol() == glyph && cell.bg == WIN_HIGHLIGHT)
        .count();
    assert_eq!(marked, 3);
}

#[tokio::test]
async fn test_wide_glyphs_keep_grid_aligned() {
    let settings = settings(Difficulty::Hard).with_theme(Theme::Cats);
    let mut app = App::new(NoEffects, &settings, StdRng::seed_from_u64(1));
    app.handle_key(KeyCode::Char('1'));
    assert_eq!(app.computer_turn().unwrap(), 4);

    let mut terminal = terminal();
    terminal.draw(|frame| draw(frame, &app)).unwrap();

    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    let mut separator_columns = Vec::new();
    for row in buffer.content.chunks(width) {
        // Block borders sit on the outer columns; the grid lives inside.
        let columns: Vec<usize> = (1..width - 1)
            .filter(|&x| row[x].symbol() == "│")
            .collect();
        if !columns.is_empty() {
            separator_columns.push(columns);
        }
    }

    assert_eq!(separator_columns.len(), 9);
    assert!(separator_columns.iter().all(|c| c == &separator_columns[0]));
    let gap = separator_columns[0][1] - separator_columns[0][0];
    assert_eq!(gap, cell_width(Theme::Cats) as usize + 1);

    assert!(buffer.content.iter().any(|cell| cell.symbol() == "🐱"));
    assert!(buffer.content.iter().any(|cell| cell.symbol() == "🐟"));
}

#[tokio::test]
async fn test_loss_then_input_ends() {
    let notifier = RecordingNotifier::default();
    let mut app = App::new(NoEffects, &settings(Difficulty::Hard), StdRng::seed_from_u64(9))
        .with_notifier(Arc::new(notifier.clone()));
    let mut terminal = terminal();

    let end = run_app(&mut terminal, &mut app, &mut keys(&chars("129")))
        .await
        .unwrap();

    assert_eq!(end, SessionEnd::Quit);
    assert_eq!(app.controller().status(), GameStatus::Lost);
    assert_eq!(app.controller().winning_line(), Some([2, 4, 6]));

    let text = screen_text(&terminal);
    assert!(text.contains("Увы!"));
    assert!(text.contains("Попробовать снова? [д/н]"));
    assert_eq!(
        notifier.sent.lock().unwrap().as_slice(),
        ["Проигрыш".to_string()]
    );
}

#[tokio::test]
async fn test_draw_then_decline() {
    let mut app = App::new(NoEffects, &settings(Difficulty::Hard), StdRng::seed_from_u64(2));
    let mut terminal = terminal();

    let end = run_app(&mut terminal, &mut app, &mut keys(&chars("12768н")))
        .await
        .unwrap();

    assert_eq!(end, SessionEnd::Declined);
    assert_eq!(app.controller().status(), GameStatus::Draw);
    let text = screen_text(&terminal);
    assert!(text.contains("Силы оказались равны"));
    assert!(!text.contains("промокод"));
}

#[tokio::test]
async fn test_rematch_starts_fresh_game() {
    let effects = RecordingEffects::default();
    let mut app = App::new(
        effects.clone(),
        &settings(Difficulty::Hard),
        StdRng::seed_from_u64(4),
    );
    let mut terminal = terminal();

    let end = run_app(&mut terminal, &mut app, &mut keys(&chars("129дq")))
        .await
        .unwrap();

    assert_eq!(end, SessionEnd::Quit);
    assert_eq!(app.controller().status(), GameStatus::Playing);
    assert_eq!(app.controller().board().empty_cells().len(), 9);
    assert_eq!(*app.screen(), Screen::Playing);

    let starts = effects
        .log
        .lock()
        .unwrap()
        .iter()
        .filter(|entry| *entry == "play start")
        .count();
    assert_eq!(starts, 2);
}

#[tokio::test]
async fn test_unknown_and_occupied_keys_keep_session_alive() {
    let mut app = App::new(NoEffects, &settings(Difficulty::Hard), StdRng::seed_from_u64(6));
    let mut terminal = terminal();

    let input = [
        KeyCode::Char('1'),
        KeyCode::F(5),
        KeyCode::Char('z'),
        KeyCode::Tab,
        KeyCode::Null,
        KeyCode::Char('5'),
        KeyCode::Char('1'),
    ];
    let end = run_app(&mut terminal, &mut app, &mut keys(&input))
        .await
        .unwrap();

    assert_eq!(end, SessionEnd::Quit);
    assert_eq!(app.controller().status(), GameStatus::Playing);
    assert_eq!(app.controller().board().empty_cells().len(), 7);
    assert_eq!(app.status_message(), "Клетка 1 уже занята");
    assert!(screen_text(&terminal).contains("Клетка 1 уже занята"));
}

#[tokio::test]
async fn test_arrow_keys_move_cursor_and_enter_places() {
    let mut app = App::new(NoEffects, &settings(Difficulty::Hard), StdRng::seed_from_u64(7));
    let mut terminal = terminal();

    let input = [KeyCode::Up, KeyCode::Left, KeyCode::Enter];
    run_app(&mut terminal, &mut app, &mut keys(&input))
        .await
        .unwrap();

    assert_eq!(
        app.controller().board().get(0),
        Some(Square::Occupied(Player::X))
    );
    assert_eq!(
        app.controller().board().get(4),
        Some(Square::Occupied(Player::O))
    );
}

#[tokio::test]
async fn test_failed_notification_is_shown_not_fatal() {
    let notifier = RecordingNotifier {
        fail: true,
        ..Default::default()
    };
    let mut app = App::new(NoEffects, &settings(Difficulty::Hard), StdRng::seed_from_u64(8))
        .with_notifier(Arc::new(notifier));
    let mut terminal = terminal();

    let end = run_app(&mut terminal, &mut app, &mut keys(&chars("129н")))
        .await
        .unwrap();

    assert_eq!(end, SessionEnd::Declined);
    assert_eq!(
        app.delivery(),
        Some("Не удалось отправить результат: Bad Request: chat not found")
    );
    assert!(screen_text(&terminal).contains("Не удалось отправить результат"));
}
