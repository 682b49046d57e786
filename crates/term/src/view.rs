//! BoardView: maps a `BoardSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). Row 0 of the board is drawn at the bottom of
//! the frame. With horizontal wraparound the side walls are drawn dashed.

use crate::core::BoardSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::ShapeId;

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

const PALETTE: [Rgb; 8] = [
    Rgb::new(0, 200, 220),
    Rgb::new(230, 200, 0),
    Rgb::new(170, 60, 200),
    Rgb::new(60, 200, 60),
    Rgb::new(220, 50, 50),
    Rgb::new(50, 90, 220),
    Rgb::new(240, 140, 20),
    Rgb::new(200, 200, 200),
];

const BACKGROUND: Rgb = Rgb::new(25, 25, 35);

/// Fill colour of cells locked by `id`
pub fn shape_color(id: ShapeId) -> Rgb {
    PALETTE[id.index() % PALETTE.len()]
}

/// Renders a board with a border and a short status panel.
pub struct BoardView {
    /// Board cell width in terminal columns
    cell_w: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl BoardView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Frame size of the bordered board, excluding the status panel
    pub fn frame_size(&self, snap: &BoardSnapshot) -> (u16, u16) {
        let w = (snap.width as u16).saturating_mul(self.cell_w).saturating_add(2);
        let h = (snap.height as u16).saturating_add(2);
        (w, h)
    }

    pub fn render(&self, snap: &BoardSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Render into an existing framebuffer, resizing it to the viewport
    pub fn render_into(&self, snap: &BoardSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let (frame_w, frame_h) = self.frame_size(snap);
        let left = viewport.width.saturating_sub(frame_w) / 2;
        let top = viewport.height.saturating_sub(frame_h) / 2;

        self.draw_border(fb, snap.loop_x, left, top, frame_w, frame_h);

        let empty = CellStyle::new(Rgb::new(70, 70, 80), BACKGROUND);
        for y in 0..snap.height {
            for x in 0..snap.width {
                match snap.stacked(x, y) {
                    Some(id) => self.draw_block(fb, snap, left, top, x, y, ' ', solid(id)),
                    None => self.draw_block(fb, snap, left, top, x, y, '·', empty),
                }
            }
        }

        if let Some(active) = snap.active {
            let ghost = CellStyle::new(shape_color(active.shape_id), BACKGROUND).dim();
            for p in &snap.ghost_cells {
                self.draw_block(fb, snap, left, top, p.x as usize, p.y as usize, '░', ghost);
            }
            for p in &snap.active_cells {
                let style = solid(active.shape_id);
                self.draw_block(fb, snap, left, top, p.x as usize, p.y as usize, ' ', style);
            }
        }

        self.draw_status(fb, snap, left.saturating_add(frame_w).saturating_add(2), top);
    }

    fn draw_border(&self, fb: &mut FrameBuffer, loop_x: bool, x: u16, y: u16, w: u16, h: u16) {
        let style = CellStyle::default();
        let side = if loop_x { '┆' } else { '│' };
        let (right, bottom) = (x + w.saturating_sub(1), y + h.saturating_sub(1));
        for cx in x..=right {
            fb.set(cx, y, '─', style);
            fb.set(cx, bottom, '─', style);
        }
        for cy in y..=bottom {
            fb.set(x, cy, side, style);
            fb.set(right, cy, side, style);
        }
        fb.set(x, y, '┌', style);
        fb.set(right, y, '┐', style);
        fb.set(x, bottom, '└', style);
        fb.set(right, bottom, '┘', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        snap: &BoardSnapshot,
        left: u16,
        top: u16,
        x: usize,
        y: usize,
        ch: char,
        style: CellStyle,
    ) {
        if x >= snap.width || y >= snap.height {
            return;
        }
        let screen_x = left + 1 + x as u16 * self.cell_w;
        // Board row 0 is the bottom row of the frame.
        let screen_y = top + 1 + (snap.height - 1 - y) as u16;
        for dx in 0..self.cell_w {
            fb.set(screen_x + dx, screen_y, ch, style);
        }
    }

    fn draw_status(&self, fb: &mut FrameBuffer, snap: &BoardSnapshot, x: u16, y: u16) {
        let label = CellStyle::default();
        fb.put_str(x, y, &format!("pieces {}", snap.pieces_spawned), label);
        fb.put_str(x, y + 1, &format!("rows   {}", snap.rows_cleared), label);

        if snap.game_over {
            let alert = CellStyle::new(Rgb::new(255, 80, 80), Rgb::new(0, 0, 0)).bold();
            fb.put_str(x, y + 3, "GAME OVER", alert);
            fb.put_str(x, y + 4, "r: restart  q: quit", label);
        }
    }
}

fn solid(id: ShapeId) -> CellStyle {
    CellStyle::new(Rgb::new(0, 0, 0), shape_color(id))
}
