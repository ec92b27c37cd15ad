//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if should_quit(key) {
        return Some(GameAction::Quit);
    }

    match key.code {
        // Movement
        KeyCode::Up | KeyCode::Char(' ') => Some(GameAction::Jump),
        KeyCode::Left => Some(GameAction::Left),
        KeyCode::Right => Some(GameAction::Right),
        KeyCode::Down => Some(GameAction::Down),

        // Actions
        KeyCode::Char('x') | KeyCode::Char('X') => Some(GameAction::Fire),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(GameAction::SpeedUp),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(GameAction::SlowDown),

        // Level flow
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
        KeyCode::Char('l') | KeyCode::Char('L') => Some(GameAction::LevelMenu),
        KeyCode::Char(c @ '1'..='9') => Some(GameAction::SelectLevel(c as u8 - b'0')),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char('e') | KeyCode::Char('E')
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Line editing on the level select prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    Digit(char),
    Backspace,
    Submit,
    Cancel,
}

/// Map keyboard input on the level select prompt.
pub fn handle_menu_key(key: KeyEvent) -> Option<MenuInput> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(MenuInput::Cancel);
    }
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => Some(MenuInput::Digit(c)),
        KeyCode::Backspace => Some(MenuInput::Backspace),
        KeyCode::Enter => Some(MenuInput::Submit),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(MenuInput::Cancel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(GameAction::Left)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Right)),
            Some(GameAction::Right)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(GameAction::Down)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(GameAction::Jump)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(GameAction::Jump)
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('x'))),
            Some(GameAction::Fire)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('p'))),
            Some(GameAction::Pause)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('f'))),
            Some(GameAction::SpeedUp)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('s'))),
            Some(GameAction::SlowDown)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('r'))),
            Some(GameAction::Restart)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('l'))),
            Some(GameAction::LevelMenu)
        );
    }

    #[test]
    fn test_level_digits() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('1'))),
            Some(GameAction::SelectLevel(1))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('9'))),
            Some(GameAction::SelectLevel(9))
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('0'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Char('e'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('e'))),
            Some(GameAction::Quit)
        );
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(
            handle_menu_key(KeyEvent::from(KeyCode::Char('7'))),
            Some(MenuInput::Digit('7'))
        );
        assert_eq!(
            handle_menu_key(KeyEvent::from(KeyCode::Enter)),
            Some(MenuInput::Submit)
        );
        assert_eq!(
            handle_menu_key(KeyEvent::from(KeyCode::Backspace)),
            Some(MenuInput::Backspace)
        );
        assert_eq!(
            handle_menu_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(MenuInput::Cancel)
        );
        assert_eq!(handle_menu_key(KeyEvent::from(KeyCode::Char('a'))), None);
    }
}
