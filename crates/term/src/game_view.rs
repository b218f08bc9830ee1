//! GameView: maps a [`RenderSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_shape, RenderSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Rotation, FIELD_COL, FIELD_ROW};

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
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

/// Screen position of the board frame's top-left corner
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 makes board cells roughly square in most terminal fonts.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers reuse one framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_into(&self, snap: &RenderSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let board_w = FIELD_COL as u16 * self.cell_w;
        let board_h = FIELD_ROW as u16 * self.cell_h;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;
        let origin = Origin {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
        };

        fb.fill_rect(
            origin.x + 1,
            origin.y + 1,
            board_w,
            board_h,
            ' ',
            CellStyle::plain(Rgb::new(80, 80, 90), PLAYFIELD_BG),
        );
        draw_border(
            fb,
            origin,
            frame_w,
            frame_h,
            CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG),
        );

        self.draw_board(fb, origin, snap);

        if let Some(active) = snap.active {
            for &(dc, dr) in get_shape(active.kind, active.rotation).iter() {
                self.draw_board_cell(fb, origin, active.col + dc, active.row + dr, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, origin, frame_w);

        if snap.paused() {
            draw_overlay_text(fb, origin, frame_w, frame_h, "PAUSED");
        } else if snap.game_over() {
            draw_overlay_text(fb, origin, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &RenderSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, origin: Origin, snap: &RenderSnapshot) {
        let flash = CellStyle::plain(Rgb::new(255, 255, 255), Rgb::new(90, 90, 100)).bold();
        let empty = CellStyle::plain(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();

        for (y, row) in snap.board.iter().enumerate() {
            let highlighted = snap.flashing_rows[y] && snap.flash_highlight;
            for (x, cell) in row.iter().enumerate() {
                let (col, r) = (x as i8, y as i8);
                if highlighted {
                    self.fill_cell(fb, origin, col, r, '▓', flash);
                } else if let Some(kind) = cell {
                    self.draw_board_cell(fb, origin, col, r, *kind);
                } else {
                    self.fill_cell(fb, origin, col, r, '·', empty);
                }
            }
        }
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        origin: Origin,
        col: i8,
        row: i8,
        kind: PieceKind,
    ) {
        let style = CellStyle::plain(piece_color(kind), PLAYFIELD_BG).bold();
        self.fill_cell(fb, origin, col, row, '█', style);
    }

    /// Fill one board cell; cells outside the visible grid are skipped.
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        origin: Origin,
        col: i8,
        row: i8,
        ch: char,
        style: CellStyle,
    ) {
        if !(0..FIELD_COL as i8).contains(&col) || !(0..FIELD_ROW as i8).contains(&row) {
            return;
        }
        let px = origin.x + 1 + col as u16 * self.cell_w;
        let py = origin.y + 1 + row as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &RenderSnapshot,
        viewport: Viewport,
        origin: Origin,
        frame_w: u16,
    ) {
        let panel_x = origin.x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = origin.y;
        for (name, number) in [
            ("SCORE", snap.score),
            ("LINES", snap.lines),
            ("SPEED", snap.tick_rate),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        fb.put_str(panel_x + 5, y, snap.next.as_str(), value);
        y = y.saturating_add(2);

        let preview = CellStyle::plain(piece_color(snap.next), PANEL_BG).bold();
        for &(dc, dr) in get_shape(snap.next, Rotation::North).iter() {
            fb.fill_rect(
                panel_x + dc as u16 * self.cell_w,
                y + dr as u16,
                self.cell_w,
                1,
                '█',
                preview,
            );
        }
    }
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::T => Rgb::new(200, 120, 220),
    }
}

fn draw_border(fb: &mut FrameBuffer, origin: Origin, w: u16, h: u16, style: CellStyle) {
    let Origin { x, y } = origin;
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

fn draw_overlay_text(
    fb: &mut FrameBuffer,
    origin: Origin,
    frame_w: u16,
    frame_h: u16,
    text: &str,
) {
    let text_w = text.chars().count() as u16;
    let x = origin.x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let y = origin.y.saturating_add(frame_h / 2);
    let style = CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x, y, text, style);
}
