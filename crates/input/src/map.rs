//! Key mapping from terminal events to commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A game command bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    Left,
    Right,
    SoftDrop,
    RotateCw,
    RotateCcw,
    Pause,
    Reset,
}

/// Map a key to its command, if it has one.
pub fn map_key(key: KeyEvent) -> Option<KeyCommand> {
    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    match code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(KeyCommand::Left),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(KeyCommand::Right),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(KeyCommand::SoftDrop),

        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(KeyCommand::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('y') => Some(KeyCommand::RotateCcw),

        KeyCode::Char('p') => Some(KeyCommand::Pause),
        KeyCode::Char('r') => Some(KeyCommand::Reset),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }
    matches!(
        key.code,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')
    )
}
