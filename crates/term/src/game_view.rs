//! GameView: maps a `GameSnapshot` (or the menu) into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use std::fmt::Write as _;

use arrayvec::{ArrayString, ArrayVec};

use crate::core::{GameSnapshot, PieceSnapshot};
use crate::fb::{CellStyle, FrameBuffer};
use crate::input::touch::BUTTON_HEIGHT;
use crate::input::TouchControls;
use crate::theme::Theme;
use crate::types::{GameMode, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, LEADERBOARD_SIZE};

/// Side panel width in columns.
const PANEL_W: u16 = 16;
const PANEL_GAP: u16 = 2;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Screen positions shared by drawing and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Top-left corner of the board frame.
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    pub panel_x: u16,
    pub touch_x: u16,
    pub touch_y: u16,
}

/// One leaderboard line on the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub mode: GameMode,
}

/// Everything the menu screen shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuView {
    pub mode: GameMode,
    pub start_level: u32,
    pub sound_enabled: bool,
    pub leaderboard: ArrayVec<LeaderboardRow, LEADERBOARD_SIZE>,
}

/// Terminal renderer for game and menu screens.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    theme: Theme,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            theme: Theme::default(),
        }
    }
}

impl GameView {
    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let frame_h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let total_w = frame_w + PANEL_GAP + PANEL_W;
        let total_h = frame_h + 1 + BUTTON_HEIGHT;

        let frame_x = viewport.width.saturating_sub(total_w) / 2;
        let frame_y = viewport.height.saturating_sub(total_h) / 2;
        Layout {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
            panel_x: frame_x + frame_w + PANEL_GAP,
            touch_x: viewport.width.saturating_sub(TouchControls::width()) / 2,
            touch_y: frame_y + frame_h + 1,
        }
    }

    /// Button positions matching what `render_into` draws.
    pub fn touch_controls(&self, viewport: Viewport) -> TouchControls {
        let layout = self.layout(viewport);
        TouchControls::layout(layout.touch_x, layout.touch_y)
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        let theme = &self.theme;
        fb.resize(viewport.width, viewport.height);
        fb.clear(theme.base().cell(' '));

        let layout = self.layout(viewport);
        let board_bg = CellStyle::new(theme.grid, theme.board_bg);

        fb.fill_rect(
            layout.frame_x + 1,
            layout.frame_y + 1,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            board_bg,
        );
        draw_border(
            fb,
            layout.frame_x,
            layout.frame_y,
            layout.frame_w,
            layout.frame_h,
            CellStyle::new(theme.border, theme.background),
        );

        // Locked board cells.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match PieceKind::from_color_index(snap.board[y as usize][x as usize]) {
                    Some(kind) => self.draw_block(fb, &layout, x as i8, y as i8, kind),
                    None => self.fill_cell_rect(fb, &layout, x, y, '·', board_bg.dim()),
                }
            }
        }

        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            let ghost = CellStyle::new(theme.ghost, theme.board_bg).dim();
            for (x, y) in active.cells_at_row(ghost_y) {
                if in_board(x, y) {
                    self.fill_cell_rect(fb, &layout, x as u16, y as u16, '░', ghost);
                }
            }
        }

        if let Some(active) = snap.active {
            for (x, y) in active.cells() {
                self.draw_block(fb, &layout, x, y, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, &layout, viewport);
        self.draw_touch_bar(fb, viewport);

        if snap.paused() {
            self.draw_overlay(fb, &layout, &["PAUSED", "", "P resume"]);
        } else if snap.game_over() {
            self.draw_game_over(fb, snap, &layout);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Render the start menu with settings and the leaderboard.
    pub fn render_menu_into(&self, menu: &MenuView, viewport: Viewport, fb: &mut FrameBuffer) {
        let theme = &self.theme;
        fb.resize(viewport.width, viewport.height);
        fb.clear(theme.base().cell(' '));

        let layout = self.layout(viewport);
        let x = layout.frame_x;
        let w = layout.frame_w + PANEL_GAP + PANEL_W;
        let base = theme.base();
        let label = theme.label_style();
        let accent = theme.accent_style();

        let mut y = layout.frame_y + 1;
        fb.put_str_centered(x, y, w, "B L O C K F A L L", accent);
        y += 3;

        let value_x = x + 12;
        fb.put_str(x + 2, y, "MODE", label);
        let end = fb.put_str(value_x, y, "< ", base);
        let end = fb.put_str(end, y, mode_label(menu.mode), accent);
        fb.put_str(end, y, " >", base);
        y += 2;

        fb.put_str(x + 2, y, "LEVEL", label);
        fb.put_u32(value_x, y, menu.start_level, accent);
        y += 2;

        fb.put_str(x + 2, y, "SOUND", label);
        fb.put_str(value_x, y, if menu.sound_enabled { "ON" } else { "OFF" }, accent);
        y += 3;

        fb.put_str_centered(x, y, w, "TOP SCORES", label);
        y += 2;
        if menu.leaderboard.is_empty() {
            fb.put_str_centered(x, y, w, "no scores yet", base.dim());
            y += 1;
        }
        for (i, row) in menu.leaderboard.iter().enumerate() {
            let cx = fb.put_u32(x + 2, y, i as u32 + 1, base);
            fb.put_str(cx, y, ".", base);
            fb.put_str(x + 5, y, mode_label(row.mode), base);
            fb.put_u32(x + 15, y, row.score, accent);
            let cx = fb.put_u32(x + 25, y, row.lines, base.dim());
            fb.put_str(cx, y, "L", base.dim());
            let cx = fb.put_str(x + 31, y, "Lv", base.dim());
            fb.put_u32(cx, y, row.level, base.dim());
            y += 1;
        }

        y += 2;
        fb.put_str_centered(x, y, w, "ENTER start   M mode   +/- level", base);
        fb.put_str_centered(x, y + 1, w, "S sound   T theme   Q quit", base);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, layout: &Layout, x: i8, y: i8, kind: PieceKind) {
        if !in_board(x, y) {
            return;
        }
        let style = CellStyle::new(self.theme.piece(kind), self.theme.board_bg).bold();
        self.fill_cell_rect(fb, layout, x as u16, y as u16, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = layout.frame_x + 1 + cell_x * self.cell_w;
        let py = layout.frame_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        layout: &Layout,
        viewport: Viewport,
    ) {
        let panel_x = layout.panel_x;
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }
        let theme = &self.theme;
        let label = theme.label_style();
        let value = theme.base();

        let mut y = layout.frame_y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 2;

        fb.put_str(panel_x, y, "LEVEL", label);
        fb.put_u32(panel_x, y + 1, snap.level, value);
        y += 2;

        fb.put_str(panel_x, y, "LINES", label);
        let cx = fb.put_u32(panel_x, y + 1, snap.lines, value);
        let cx = fb.put_str(cx, y + 1, " / ", value);
        match snap.mode.target_lines() {
            Some(target) => fb.put_u32(cx, y + 1, target, value),
            None => fb.put_str(cx, y + 1, "∞", value),
        };
        y += 2;

        if snap.mode == GameMode::Sprint {
            fb.put_str(panel_x, y, "TIME", label);
            fb.put_str(panel_x, y + 1, &format_elapsed(snap.elapsed_ms), value);
        }
        y += 3;

        fb.put_str(panel_x, y, "NEXT", label);
        if let Some(next) = snap.next {
            self.draw_preview(fb, panel_x, y + 1, &next, false);
        }
        y += 5;

        fb.put_str(panel_x, y, "HOLD", label);
        if let Some(hold) = snap.hold {
            self.draw_preview(fb, panel_x, y + 1, &hold, !snap.can_hold);
        }
        y += 6;

        if snap.combo > 1 {
            let cx = fb.put_str(panel_x, y, "COMBO x", theme.accent_style());
            fb.put_u32(cx, y, snap.combo, theme.accent_style());
        }
        if let Some(banner) = clear_banner(snap.last_clear) {
            fb.put_str(panel_x, y + 1, &banner, theme.accent_style());
        }
    }

    /// Piece shape at panel scale (one cell per two columns).
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &PieceSnapshot, dim: bool) {
        let mut style = CellStyle::new(self.theme.piece(piece.kind), self.theme.background);
        if dim {
            style = style.dim();
        }
        for (dx, dy) in piece.shape.filled_cells() {
            fb.fill_rect(x + dx as u16 * 2, y + dy as u16, 2, 1, '█', style);
        }
    }

    fn draw_touch_bar(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let style = CellStyle::new(self.theme.label, self.theme.button_bg).bold();
        for button in self.touch_controls(viewport).buttons() {
            fb.fill_rect(button.x, button.y, button.w, button.h, ' ', style);
            fb.put_str_centered(button.x, button.y + button.h / 2, button.w, button.label(), style);
        }
    }

    /// Centered block of lines over the board.
    fn draw_overlay(&self, fb: &mut FrameBuffer, layout: &Layout, lines: &[&str]) {
        let style = CellStyle::new(self.theme.label, self.theme.background).bold();
        let half = (lines.len() as u16 + 2) / 2;
        let top = (layout.frame_y + layout.frame_h / 2).saturating_sub(half);
        let inner_x = layout.frame_x + 1;
        let inner_w = layout.frame_w - 2;
        fb.fill_rect(inner_x, top, inner_w, lines.len() as u16 + 2, ' ', style);
        for (i, line) in lines.iter().enumerate() {
            fb.put_str_centered(inner_x, top + 1 + i as u16, inner_w, line, style);
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout) {
        let mut score = ArrayString::<24>::new();
        let _ = write!(score, "SCORE {}", snap.score);
        let mut lines = ArrayString::<24>::new();
        let _ = write!(lines, "LINES {}", snap.lines);
        let mut level = ArrayString::<24>::new();
        let _ = write!(level, "LEVEL {}", snap.level);
        let mut time = ArrayString::<24>::new();
        if snap.mode == GameMode::Sprint {
            let _ = write!(time, "TIME {}", format_elapsed(snap.elapsed_ms));
        }
        let title = if snap.won() { "YOU WIN!" } else { "GAME OVER" };
        self.draw_overlay(
            fb,
            layout,
            &[
                title,
                "",
                score.as_str(),
                lines.as_str(),
                level.as_str(),
                time.as_str(),
                "",
                "ENTER again",
                "ESC menu",
            ],
        );
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn in_board(x: i8, y: i8) -> bool {
    x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8
}

fn mode_label(mode: GameMode) -> &'static str {
    match mode {
        GameMode::Classic => "CLASSIC",
        GameMode::Marathon => "MARATHON",
        GameMode::Sprint => "SPRINT",
    }
}

/// `MM:SS` for an elapsed play time.
pub fn format_elapsed(elapsed_ms: u64) -> ArrayString<16> {
    let total_secs = elapsed_ms / 1000;
    let mut out = ArrayString::new();
    let _ = write!(out, "{:02}:{:02}", total_secs / 60, total_secs % 60);
    out
}

/// Banner for a multi-line clear: `TETRIS!` for four, `Nx COMBO!` for two or three.
pub fn clear_banner(lines: u32) -> Option<ArrayString<16>> {
    let mut out = ArrayString::new();
    match lines {
        0 | 1 => return None,
        4 => out.push_str("TETRIS!"),
        n => {
            let _ = write!(out, "{n}x COMBO!");
        }
    }
    Some(out)
}
