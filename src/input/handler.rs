use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// What a key event means to the game shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// A normalized steering input for the engine
    Steer(Direction),
    /// Soft restart signal (only honored once the game is over)
    Restart,
    /// Leave the game
    Quit,
    /// Key is not bound
    None,
}

/// Normalizes raw key events into [`KeyAction`]s
///
/// Every input source funnels through here, so the engine only ever sees
/// arbitrated directions: arrow keys, WASD and hjkl all collapse into the
/// same four headings.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Steering - arrow keys
            KeyCode::Up => KeyAction::Steer(Direction::Up),
            KeyCode::Down => KeyAction::Steer(Direction::Down),
            KeyCode::Left => KeyAction::Steer(Direction::Left),
            KeyCode::Right => KeyAction::Steer(Direction::Right),

            // Steering - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Steer(Direction::Right),

            // Steering - vi keys
            KeyCode::Char('k') | KeyCode::Char('K') => KeyAction::Steer(Direction::Up),
            KeyCode::Char('j') | KeyCode::Char('J') => KeyAction::Steer(Direction::Down),
            KeyCode::Char('h') | KeyCode::Char('H') => KeyAction::Steer(Direction::Left),
            KeyCode::Char('l') | KeyCode::Char('L') => KeyAction::Steer(Direction::Right),

            // Session keys
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
