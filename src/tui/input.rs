//! Keyboard commands and cursor movement.

use blossom_tictactoe::Position;
use crossterm::event::KeyCode;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place a mark on a numbered cell (keys 1-9).
    Place(Position),
    /// Move the cursor with an arrow key.
    Cursor(KeyCode),
    /// Enter or space: place at the cursor, or confirm on the result screen.
    Select,
    /// Play again.
    Yes,
    /// Do not play again.
    No,
    /// Leave the game.
    Quit,
}

/// Maps a key to a command. Unknown keys map to `None` and are ignored.
///
/// Both Latin and Cyrillic letters work for the yes/no/quit keys.
pub fn command_for_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            Some(Command::Cursor(code))
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Select),
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char(c) => {
            if let Some(digit) = c.to_digit(10) {
                return (digit as usize)
                    .checked_sub(1)
                    .and_then(Position::from_index)
                    .map(Command::Place);
            }
            match c.to_lowercase().next()? {
                'y' | 'д' => Some(Command::Yes),
                'n' | 'н' => Some(Command::No),
                'q' | 'й' => Some(Command::Quit),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Moves the cursor one cell in the arrow's direction, stopping at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let index = cursor.to_index();
    let (row, col) = (index / 3, index % 3);

    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => return cursor,
    };

    Position::from_index(row * 3 + col).unwrap_or(cursor)
}
