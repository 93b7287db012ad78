//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). The grid's row 0 is the bottom of the
//! playfield, so rows are flipped on the way to screen coordinates.

use crate::core::grid::{Pos, COLS, ROWS};
use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{ColorTag, PieceKind};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Screen geometry of the framed board for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal view of the playfield and side panel.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up a typical terminal glyph.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers reuse one framebuffer across frames and it is only resized when
    /// the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_w = COLS as u16 * self.cell_w;
        let board_h = ROWS as u16 * self.cell_h;
        let w = board_w + 2;
        let h = board_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        fb.fill_rect(frame.x + 1, frame.y + 1, board_w, board_h, ' ', bg);
        self.draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG));

        // Locked cells.
        for (y, row) in snap.grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (cx, cy) = (x as u16, y as u16);
                match cell {
                    Some(kind) => self.draw_piece_cell(fb, frame, cx, cy, *kind),
                    None => self.draw_empty_cell(fb, frame, cx, cy),
                }
            }
        }

        // Ghost first so the active piece wins where they overlap.
        if let Some(ghost) = snap.ghost_cells {
            let style = CellStyle::new(Rgb::new(140, 140, 140), BOARD_BG).dim();
            for pos in ghost {
                self.fill_cell(fb, frame, pos, '░', style);
            }
        }

        if let (Some(active), Some(cells)) = (snap.active, snap.active_cells) {
            for pos in cells {
                self.draw_piece_cell(fb, frame, pos.x() as u16, pos.y() as u16, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over {
            self.draw_overlay_text(fb, frame, "GAME OVER");
        } else if snap.paused {
            self.draw_overlay_text(fb, frame, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
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

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        self.fill_grid_rect(fb, frame, x, y, '·', style);
    }

    fn draw_piece_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::new(color_rgb(kind.color()), BOARD_BG).bold();
        self.fill_grid_rect(fb, frame, x, y, '█', style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, pos: Pos, ch: char, style: CellStyle) {
        self.fill_grid_rect(fb, frame, pos.x() as u16, pos.y() as u16, ch, style);
    }

    /// Fill the screen rectangle of grid cell `(x, y)`, with `y = 0` at the bottom.
    fn fill_grid_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        x: u16,
        y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let screen_row = (ROWS as u16 - 1).saturating_sub(y);
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + screen_row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_W {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        for (name, number) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("BEST", snap.high_score),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), number, value);
            y = y.saturating_add(3);
        }

        if snap.combo > 0 {
            fb.put_str(panel_x, y, "COMBO", label);
            fb.put_u32(panel_x, y.saturating_add(1), snap.combo as u32, value);
        }
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "HOLD", label);
        y = y.saturating_add(1);
        match snap.hold {
            Some(kind) => {
                let style = if snap.can_hold { value } else { value.dim() };
                self.draw_preview(fb, panel_x, y, kind, style);
            }
            None => fb.put_str(panel_x, y, "-", value),
        }
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, panel_x, y, snap.next, value);
    }

    /// Draw a piece at rotation 0 in a 4x2 box, top-left at `(x, y)`.
    fn draw_preview(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        kind: PieceKind,
        style: CellStyle,
    ) {
        let style = CellStyle {
            fg: color_rgb(kind.color()),
            ..style
        };
        let shape = crate::core::shape(kind, 0);
        let top = shape.iter().map(|&(_, dy)| dy).max().unwrap_or(0);
        for &(dx, dy) in shape.iter() {
            let col = x.saturating_add(dx.max(0) as u16 * 2);
            let row = y.saturating_add((top - dy).max(0) as u16);
            fb.fill_rect(col, row, 2, 1, '█', style);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

/// Narrowest side panel that still fits a preview and the score digits.
const PANEL_MIN_W: u16 = 12;

pub fn color_rgb(tag: ColorTag) -> Rgb {
    match tag {
        ColorTag::Cyan => Rgb::new(80, 220, 220),
        ColorTag::Yellow => Rgb::new(240, 220, 80),
        ColorTag::Purple => Rgb::new(200, 120, 220),
        ColorTag::Orange => Rgb::new(255, 165, 0),
        ColorTag::Blue => Rgb::new(80, 120, 220),
        ColorTag::Green => Rgb::new(100, 220, 120),
        ColorTag::Red => Rgb::new(220, 80, 80),
    }
}
