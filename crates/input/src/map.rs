//! Key mapping from terminal events to game actions and menu commands.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Commands available outside active play (and a few global ones during it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    Start,
    OpenMenu,
    CycleMode,
    LevelUp,
    LevelDown,
    ToggleSound,
    ToggleTheme,
}

impl MenuCommand {
    /// Commands honored while a game is running or paused.
    pub fn is_global(self) -> bool {
        matches!(self, MenuCommand::OpenMenu | MenuCommand::ToggleTheme)
    }
}

/// Presses and OS key repeats count; releases do not.
pub fn is_press(key: KeyEvent) -> bool {
    matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
}

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(GameAction::MoveLeft),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(GameAction::MoveRight),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(GameAction::SoftDrop),

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(GameAction::Rotate),

        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('c') | KeyCode::Char('C')
            if !key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(GameAction::Hold)
        }
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),

        _ => None,
    }
}

/// Map keyboard input on the menu and game-over screens.
pub fn handle_menu_key(key: KeyEvent) -> Option<MenuCommand> {
    match key.code {
        KeyCode::Enter => Some(MenuCommand::Start),
        KeyCode::Esc => Some(MenuCommand::OpenMenu),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(MenuCommand::CycleMode),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => Some(MenuCommand::LevelUp),
        KeyCode::Char('-') | KeyCode::Left => Some(MenuCommand::LevelDown),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(MenuCommand::ToggleSound),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(MenuCommand::ToggleTheme),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
