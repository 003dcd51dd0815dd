//! Key-event mapping for terminal environments.
//!
//! Match-3 input is tap-driven (no held-key repeats), so this stays a pair
//! of stateless mappers over crossterm key events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::GameAction;

/// Map a key press to a game action. Arrow keys and hjkl move the cursor;
/// Space or Enter selects; `n` asks for a hint; `r` restarts.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(GameAction::CursorUp),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(GameAction::CursorDown),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(GameAction::CursorLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(GameAction::CursorRight),
        KeyCode::Char(' ') | KeyCode::Enter => Some(GameAction::Select),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(GameAction::Hint),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
        _ => None,
    }
}

/// Quit on `q`, Escape or Ctrl-C.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_vim_keys_move_cursor() {
        assert_eq!(handle_key_event(key(KeyCode::Up)), Some(GameAction::CursorUp));
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j'))),
            Some(GameAction::CursorDown)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('h'))),
            Some(GameAction::CursorLeft)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Right)),
            Some(GameAction::CursorRight)
        );
    }

    #[test]
    fn select_hint_restart() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char(' '))),
            Some(GameAction::Select)
        );
        assert_eq!(handle_key_event(key(KeyCode::Enter)), Some(GameAction::Select));
        assert_eq!(
            handle_key_event(key(KeyCode::Char('n'))),
            Some(GameAction::Hint)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('r'))),
            Some(GameAction::Restart)
        );
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(handle_key_event(key(KeyCode::Char('x'))), None);
        assert_eq!(handle_key_event(key(KeyCode::Tab)), None);
    }

    #[test]
    fn quit_keys() {
        assert!(should_quit(key(KeyCode::Char('q'))));
        assert!(should_quit(key(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(key(KeyCode::Char('c'))));
    }
}
