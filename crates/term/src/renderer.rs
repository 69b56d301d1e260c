//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame, and any frame after a resize, repaints every cell. Later
//! frames only write the runs of cells that changed. Each frame is bracketed by
//! synchronized-update markers so terminals that support them never show a
//! half-drawn board.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Switch to raw mode on the alternate screen with mouse capture for the
    /// touch bar.
    pub fn enter(&mut self, title: &str) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(terminal::SetTitle(title))?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(event::EnableMouseCapture)?;
        self.flush_buf()
    }

    /// Restore the terminal. Safe to call after a failed frame.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(event::DisableMouseCapture)?;
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("failed to disable raw mode")?;
        Ok(())
    }

    /// Force the next draw to repaint every cell (terminal resize, theme swap).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb` and keep it as the diff base for the next frame.
    ///
    /// The caller's buffer is swapped with the previous frame, so the caller
    /// gets a same-sized buffer back to render into without cloning.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::BeginSynchronizedUpdate)?;
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            _ => {
                encode_full_into(fb, &mut self.buf)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.buf.queue(terminal::EndSynchronizedUpdate)?;
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout
            .write_all(&self.buf)
            .and_then(|()| self.stdout.flush())
            .context("failed to write to terminal")
    }
}

/// Queues cells while remembering what the terminal already has, so colors,
/// attributes and cursor moves are only emitted when they change.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    attrs: Option<(bool, bool)>,
    cursor: Option<(u16, u16)>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            out,
            fg: None,
            bg: None,
            attrs: None,
            cursor: None,
        }
    }

    fn paint(&mut self, fb: &FrameBuffer, x: u16, y: u16) -> Result<()> {
        let cell = fb.get(x, y).unwrap_or_default();
        if self.cursor != Some((x, y)) {
            self.out.queue(cursor::MoveTo(x, y))?;
        }
        self.style(cell.style)?;
        self.out.queue(Print(cell.ch))?;
        self.cursor = Some((x + 1, y));
        Ok(())
    }

    fn style(&mut self, style: CellStyle) -> Result<()> {
        // A reset clears colors too, so attributes go first.
        let attrs = (style.bold, style.dim);
        if self.attrs != Some(attrs) {
            self.out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                self.out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.attrs = Some(attrs);
            self.fg = None;
            self.bg = None;
        }
        if self.fg != Some(style.fg) {
            self.out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
            self.fg = Some(style.fg);
        }
        if self.bg != Some(style.bg) {
            self.out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
            self.bg = Some(style.bg);
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Encode a repaint of every cell into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut painter = Painter::new(out);
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            painter.paint(fb, x, y)?;
        }
    }
    painter.finish()
}

/// Encode only the cells of `next` that differ from `prev` into `out`.
///
/// Frames of different sizes are repainted in full.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        return encode_full_into(next, out);
    }
    let mut painter = Painter::new(out);
    for_each_changed_run(prev, next, |x, y, len| {
        for dx in 0..len {
            painter.paint(next, x + dx, y)?;
        }
        Ok(())
    })?;
    painter.finish()
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Calls `f(x, y, len)` for each maximal horizontal run of differing cells.
/// Both frames must have the same size.
fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let differs = |x: u16, y: u16| prev.get(x, y) != next.get(x, y);

    for y in 0..next.height() {
        let mut run_start: Option<u16> = None;
        for x in 0..next.width() {
            match (differs(x, y), run_start) {
                (true, None) => run_start = Some(x),
                (false, Some(start)) => {
                    f(start, y, x - start)?;
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            f(start, y, next.width() - start)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    fn runs(a: &FrameBuffer, b: &FrameBuffer) -> Vec<(u16, u16, u16)> {
        let mut runs = Vec::new();
        for_each_changed_run(a, b, |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        runs
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    #[test]
    fn full_frame_paints_rows_in_order() {
        let mut fb = FrameBuffer::new(2, 2);
        let style = Theme::default().base();
        fb.put_str(0, 0, "AB", style);
        fb.put_str(0, 1, "CD", style);

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("AB"));
        assert!(text.contains("CD"));
        assert!(text.find("AB") < text.find("CD"));
    }

    #[test]
    fn uniform_style_is_emitted_once() {
        let mut fb = FrameBuffer::new(10, 3);
        let style = Theme::default().label_style();
        fb.fill_rect(0, 0, 10, 3, '#', style);

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let mut bold = Vec::new();
        bold.queue(SetAttribute(Attribute::Bold)).unwrap();
        assert_eq!(count(&out, &bold), 1);
    }

    #[test]
    fn identical_frames_encode_no_glyphs() {
        let mut a = FrameBuffer::new(4, 2);
        a.put_str(0, 0, "wxyz", CellStyle::default());
        let b = a.clone();

        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();
        assert!(!String::from_utf8_lossy(&out).contains('w'));
    }

    #[test]
    fn resized_frame_falls_back_to_full_repaint() {
        let a = FrameBuffer::new(2, 1);
        let mut b = FrameBuffer::new(3, 1);
        b.put_str(0, 0, "abc", CellStyle::default());

        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("abc"));
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(6, 2);
        let mut b = FrameBuffer::new(6, 2);
        b.put_str(1, 0, "XXX", style);
        b.put_str(5, 1, "Y", style);

        assert_eq!(runs(&a, &b), vec![(1, 0, 3), (5, 1, 1)]);
    }

    #[test]
    fn style_change_alone_is_a_change() {
        let a = FrameBuffer::new(3, 1);
        let mut b = FrameBuffer::new(3, 1);
        b.set(2, 0, CellStyle::default().bold().cell(' '));

        assert_eq!(runs(&a, &b), vec![(2, 0, 1)]);
    }
}
