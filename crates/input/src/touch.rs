//! On-screen touch controls.
//!
//! A row of buttons drawn below the board. Left mouse clicks inside a button
//! yield the same [`GameAction`] the keyboard would.

use arrayvec::ArrayVec;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::GameAction;

pub const BUTTON_WIDTH: u16 = 6;
pub const BUTTON_HEIGHT: u16 = 3;
pub const BUTTON_GAP: u16 = 1;

/// Button order left to right.
const LAYOUT: [GameAction; 7] = [
    GameAction::MoveLeft,
    GameAction::Rotate,
    GameAction::MoveRight,
    GameAction::SoftDrop,
    GameAction::HardDrop,
    GameAction::Hold,
    GameAction::Pause,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchButton {
    pub action: GameAction,
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl TouchButton {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }

    /// Short label drawn inside the button.
    pub fn label(&self) -> &'static str {
        match self.action {
            GameAction::MoveLeft => "<",
            GameAction::MoveRight => ">",
            GameAction::SoftDrop => "v",
            GameAction::Rotate => "ROT",
            GameAction::HardDrop => "DROP",
            GameAction::Hold => "HOLD",
            GameAction::Pause => "||",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TouchControls {
    buttons: ArrayVec<TouchButton, 7>,
}

impl TouchControls {
    /// Lay the buttons out in one row starting at `(origin_x, origin_y)`.
    pub fn layout(origin_x: u16, origin_y: u16) -> Self {
        let mut buttons = ArrayVec::new();
        let mut x = origin_x;
        for action in LAYOUT {
            buttons.push(TouchButton {
                action,
                x,
                y: origin_y,
                w: BUTTON_WIDTH,
                h: BUTTON_HEIGHT,
            });
            x = x.saturating_add(BUTTON_WIDTH + BUTTON_GAP);
        }
        Self { buttons }
    }

    /// Total width of the row in columns.
    pub fn width() -> u16 {
        LAYOUT.len() as u16 * (BUTTON_WIDTH + BUTTON_GAP) - BUTTON_GAP
    }

    pub fn buttons(&self) -> &[TouchButton] {
        &self.buttons
    }

    pub fn hit(&self, x: u16, y: u16) -> Option<GameAction> {
        self.buttons
            .iter()
            .find(|button| button.contains(x, y))
            .map(|button| button.action)
    }
}

/// Map a mouse event to an action when it is a left click on a button.
pub fn handle_mouse_event(event: MouseEvent, controls: &TouchControls) -> Option<GameAction> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => controls.hit(event.column, event.row),
        _ => None,
    }
}
