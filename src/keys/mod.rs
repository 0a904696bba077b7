use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Logical key actions in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Up,
    Down,
    Left,
    Right,
    Enter,
    /// Pick the answer at this zero-based position.
    Choice(usize),
    Menu,
    Options,
    Themes,
    Restart,
    Reload,
    Discard,
    Tab,
    Help,
    Quit,
    Cancel,
}

impl KeyAction {
    /// Human-readable help text for this key action.
    pub fn help_text(&self) -> &'static str {
        match self {
            KeyAction::Up => "Move up",
            KeyAction::Down => "Move down",
            KeyAction::Left => "Decrease / previous",
            KeyAction::Right => "Increase / next",
            KeyAction::Enter => "Select / Continue",
            KeyAction::Choice(_) => "Pick answer",
            KeyAction::Menu => "Toggle menu",
            KeyAction::Options => "Gameplay options",
            KeyAction::Themes => "Choose theme",
            KeyAction::Restart => "Play again",
            KeyAction::Reload => "Reload questions",
            KeyAction::Discard => "Discard and return to start",
            KeyAction::Tab => "Switch menu tab",
            KeyAction::Help => "Toggle help",
            KeyAction::Quit => "Quit",
            KeyAction::Cancel => "Close / Cancel",
        }
    }

    /// Short key label for display in menus.
    pub fn key_label(&self) -> &'static str {
        match self {
            KeyAction::Up => "k/\u{2191}",
            KeyAction::Down => "j/\u{2193}",
            KeyAction::Left => "h/\u{2190}",
            KeyAction::Right => "l/\u{2192}",
            KeyAction::Enter => "Enter",
            KeyAction::Choice(_) => "1-4",
            KeyAction::Menu => "m",
            KeyAction::Options => "o",
            KeyAction::Themes => "t",
            KeyAction::Restart => "r",
            KeyAction::Reload => "R",
            KeyAction::Discard => "x",
            KeyAction::Tab => "Tab",
            KeyAction::Help => "?",
            KeyAction::Quit => "q",
            KeyAction::Cancel => "Esc",
        }
    }
}

/// Map a key event to a logical action.
pub fn map_key(event: KeyEvent) -> Option<KeyAction> {
    match event.code {
        // Ctrl+C as quit
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(KeyAction::Quit)
        }

        // Vim-style navigation
        KeyCode::Char('k') => Some(KeyAction::Up),
        KeyCode::Char('j') => Some(KeyAction::Down),
        KeyCode::Char('h') => Some(KeyAction::Left),
        KeyCode::Char('l') => Some(KeyAction::Right),

        // Arrow keys
        KeyCode::Up => Some(KeyAction::Up),
        KeyCode::Down => Some(KeyAction::Down),
        KeyCode::Left => Some(KeyAction::Left),
        KeyCode::Right => Some(KeyAction::Right),

        // Answers
        KeyCode::Char(c @ '1'..='9') => Some(KeyAction::Choice(c as usize - '1' as usize)),

        // Actions
        KeyCode::Enter | KeyCode::Char(' ') => Some(KeyAction::Enter),
        KeyCode::Char('m') => Some(KeyAction::Menu),
        KeyCode::Char('o') => Some(KeyAction::Options),
        KeyCode::Char('t') => Some(KeyAction::Themes),
        KeyCode::Char('r') => Some(KeyAction::Restart),
        KeyCode::Char('R') => Some(KeyAction::Reload),
        KeyCode::Char('x') => Some(KeyAction::Discard),
        KeyCode::Char('q') => Some(KeyAction::Quit),
        KeyCode::Char('?') => Some(KeyAction::Help),
        KeyCode::Tab => Some(KeyAction::Tab),
        KeyCode::Esc => Some(KeyAction::Cancel),

        _ => None,
    }
}
