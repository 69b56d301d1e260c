//! Dark and light color palettes.

use crate::fb::{CellStyle, Rgb};
use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub kind: ThemeKind,
    pub background: Rgb,
    pub board_bg: Rgb,
    pub grid: Rgb,
    pub border: Rgb,
    pub text: Rgb,
    pub label: Rgb,
    pub ghost: Rgb,
    pub accent: Rgb,
    pub button_bg: Rgb,
}

impl Theme {
    pub const DARK: Theme = Theme {
        kind: ThemeKind::Dark,
        background: Rgb::new(0, 0, 0),
        board_bg: Rgb::new(30, 30, 40),
        grid: Rgb::new(90, 90, 100),
        border: Rgb::new(200, 200, 200),
        text: Rgb::new(200, 200, 200),
        label: Rgb::new(220, 220, 220),
        ghost: Rgb::new(140, 140, 140),
        accent: Rgb::new(255, 215, 0),
        button_bg: Rgb::new(50, 50, 65),
    };

    pub const LIGHT: Theme = Theme {
        kind: ThemeKind::Light,
        background: Rgb::new(240, 240, 245),
        board_bg: Rgb::new(255, 255, 255),
        grid: Rgb::new(200, 200, 210),
        border: Rgb::new(60, 60, 70),
        text: Rgb::new(40, 40, 50),
        label: Rgb::new(20, 20, 30),
        ghost: Rgb::new(150, 150, 160),
        accent: Rgb::new(200, 80, 0),
        button_bg: Rgb::new(215, 215, 225),
    };

    pub fn from_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Dark => Self::DARK,
            ThemeKind::Light => Self::LIGHT,
        }
    }

    /// The other palette.
    pub fn toggled(&self) -> Self {
        match self.kind {
            ThemeKind::Dark => Self::LIGHT,
            ThemeKind::Light => Self::DARK,
        }
    }

    pub fn piece(&self, kind: PieceKind) -> Rgb {
        Rgb::from_u32(kind.color_rgb())
    }

    pub fn base(&self) -> CellStyle {
        CellStyle::new(self.text, self.background)
    }

    pub fn label_style(&self) -> CellStyle {
        CellStyle::new(self.label, self.background).bold()
    }

    pub fn accent_style(&self) -> CellStyle {
        CellStyle::new(self.accent, self.background).bold()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::DARK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_round_trips() {
        let theme = Theme::default();
        assert_eq!(theme.kind, ThemeKind::Dark);
        assert_eq!(theme.toggled().kind, ThemeKind::Light);
        assert_eq!(theme.toggled().toggled(), theme);
    }

    #[test]
    fn piece_colors_come_from_catalog() {
        assert_eq!(Theme::LIGHT.piece(PieceKind::I), Rgb::new(0x00, 0xf0, 0xf0));
        assert_eq!(Theme::DARK.piece(PieceKind::Z), Rgb::new(0xf0, 0, 0));
    }
}
