//! Character-cell rasterizer and crossterm presentation.
//!
//! Pixel-space paint commands land on a [`CellGrid`] where one cell covers
//! 8×16 pixels (the usual terminal glyph aspect, so circles stay round).
//! Rasterization is plain Bresenham plus parametric circle sampling; the
//! grid is presented with a full repaint each tick, which a terminal
//! handles comfortably at dashboard size.

use anyhow::{Context, Result};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use std::io::{Stdout, Write, stdout};

use crate::theme::Rgb;

use super::PaintCommand;

/// Horizontal pixels covered by one character cell.
pub const PX_PER_COL: f64 = 8.0;
/// Vertical pixels covered by one character cell.
pub const PX_PER_ROW: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
}

const EMPTY: Cell = Cell {
    ch: ' ',
    fg: None,
    bg: None,
};

/// A rectangular grid of character cells in row-major order.
#[derive(Debug, Clone)]
pub struct CellGrid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Allocate a grid covering a pixel-space frame.
    pub fn new(width_px: f64, height_px: f64) -> Self {
        let cols = (width_px / PX_PER_COL).ceil() as usize;
        let rows = (height_px / PX_PER_ROW).ceil() as usize;
        Self {
            cols,
            rows,
            cells: vec![EMPTY; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Rasterize a list of paint commands, in order.
    pub fn blit(&mut self, commands: &[PaintCommand]) {
        for command in commands {
            match command {
                PaintCommand::Disc {
                    center,
                    radius,
                    color,
                } => self.fill_disc(center.x, center.y, *radius, *color),
                PaintCommand::Circle {
                    center,
                    radius,
                    color,
                } => self.draw_circle(center.x, center.y, *radius, *color),
                PaintCommand::Line { from, to, color } => {
                    self.draw_line(from.x, from.y, to.x, to.y, *color)
                }
                PaintCommand::Text { at, text, color } => self.write_text(at.x, at.y, text, *color),
            }
        }
    }

    /// Rotate the whole grid 180 degrees in place.
    ///
    /// Cells swap position but keep their glyphs; close enough to an
    /// upside-down dashboard for one prank day a year.
    pub fn flip(&mut self) {
        self.cells.reverse();
    }

    /// Character at (col, row), for tests and snapshots.
    pub fn char_at(&self, col: usize, row: usize) -> char {
        self.cells[row * self.cols + col].ch
    }

    fn to_cell(&self, x: f64, y: f64) -> (i64, i64) {
        ((x / PX_PER_COL) as i64, (y / PX_PER_ROW) as i64)
    }

    fn plot(&mut self, col: i64, row: i64, ch: char, fg: Rgb) {
        if col < 0 || row < 0 || col >= self.cols as i64 || row >= self.rows as i64 {
            return;
        }
        let cell = &mut self.cells[row as usize * self.cols + col as usize];
        cell.ch = ch;
        cell.fg = Some(fg);
    }

    fn paint_bg(&mut self, col: i64, row: i64, bg: Rgb) {
        if col < 0 || row < 0 || col >= self.cols as i64 || row >= self.rows as i64 {
            return;
        }
        self.cells[row as usize * self.cols + col as usize].bg = Some(bg);
    }

    fn fill_disc(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb) {
        // Small discs (the center dot) become a single glyph; large ones
        // tint the background of every covered cell.
        if radius < PX_PER_ROW {
            let (col, row) = self.to_cell(cx, cy);
            self.plot(col, row, '●', color);
            return;
        }

        let (min_col, min_row) = self.to_cell(cx - radius, cy - radius);
        let (max_col, max_row) = self.to_cell(cx + radius, cy + radius);
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                let x = (col as f64 + 0.5) * PX_PER_COL;
                let y = (row as f64 + 0.5) * PX_PER_ROW;
                let dx = x - cx;
                let dy = y - cy;
                if dx * dx + dy * dy <= radius * radius {
                    self.paint_bg(col, row, color);
                }
            }
        }
    }

    fn draw_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb) {
        // Sample enough points that adjacent plots land in adjacent cells
        let steps = (radius * 2.0) as usize + 24;
        for i in 0..steps {
            let angle = i as f64 / steps as f64 * std::f64::consts::TAU;
            let (col, row) = self.to_cell(cx + radius * angle.cos(), cy + radius * angle.sin());
            self.plot(col, row, '·', color);
        }
    }

    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb) {
        let (c0, r0) = self.to_cell(x0, y0);
        let (c1, r1) = self.to_cell(x1, y1);

        let glyph = line_glyph(c1 - c0, r1 - r0);

        // Bresenham over cells
        let dc = (c1 - c0).abs();
        let dr = (r1 - r0).abs();
        let step_c = if c0 < c1 { 1 } else { -1 };
        let step_r = if r0 < r1 { 1 } else { -1 };
        let mut err = dc - dr;
        let (mut col, mut row) = (c0, r0);

        loop {
            self.plot(col, row, glyph, color);
            if col == c1 && row == r1 {
                break;
            }
            let doubled = 2 * err;
            if doubled > -dr {
                err -= dr;
                col += step_c;
            }
            if doubled < dc {
                err += dc;
                row += step_r;
            }
        }
    }

    fn write_text(&mut self, x: f64, y: f64, text: &str, color: Rgb) {
        let (center_col, row) = self.to_cell(x, y);
        let width = text.chars().count() as i64;
        let start = center_col - width / 2;
        for (i, ch) in text.chars().enumerate() {
            self.plot(start + i as i64, row, ch, color);
        }
    }
}

/// Pick a box-drawing glyph matching the dominant direction of a line.
fn line_glyph(dc: i64, dr: i64) -> char {
    if dc.abs() >= 2 * dr.abs() {
        '─'
    } else if dr.abs() >= 2 * dc.abs() {
        '│'
    } else if (dc > 0) == (dr > 0) {
        '╲' // screen y grows downward
    } else {
        '╱'
    }
}

/// Owns stdout and presents finished grids.
pub struct TerminalSurface {
    out: Stdout,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self { out: stdout() }
    }

    /// Write the grid to the terminal, top-left anchored.
    pub fn present(&mut self, grid: &CellGrid) -> Result<()> {
        for row in 0..grid.rows() {
            queue!(self.out, MoveTo(0, row as u16), ResetColor)
                .context("Failed to position cursor")?;
            for col in 0..grid.cols() {
                let cell = grid.cells[row * grid.cols + col];
                match cell.fg {
                    Some(Rgb { r, g, b }) => {
                        queue!(self.out, SetForegroundColor(Color::Rgb { r, g, b }))
                    }
                    None => queue!(self.out, SetForegroundColor(Color::Reset)),
                }
                .context("Failed to set foreground color")?;
                match cell.bg {
                    Some(Rgb { r, g, b }) => {
                        queue!(self.out, SetBackgroundColor(Color::Rgb { r, g, b }))
                    }
                    None => queue!(self.out, SetBackgroundColor(Color::Reset)),
                }
                .context("Failed to set background color")?;
                queue!(self.out, Print(cell.ch)).context("Failed to print cell")?;
            }
        }
        queue!(self.out, ResetColor).context("Failed to reset colors")?;
        self.out.flush().context("Failed to flush frame")?;
        Ok(())
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Point;
    use crate::theme;

    #[test]
    fn test_grid_dimensions_round_up() {
        let grid = CellGrid::new(300.0, 300.0);
        assert_eq!(grid.cols(), 38); // 300 / 8 = 37.5
        assert_eq!(grid.rows(), 19); // 300 / 16 = 18.75
    }

    #[test]
    fn test_text_is_centered() {
        let mut grid = CellGrid::new(160.0, 32.0); // 20 x 2 cells
        grid.blit(&[PaintCommand::Text {
            at: Point::new(80.0, 16.0),
            text: "12".to_string(),
            color: theme::LIGHT.hour_markers,
        }]);
        // Center cell is col 10; "12" starts one to the left
        assert_eq!(grid.char_at(9, 1), '1');
        assert_eq!(grid.char_at(10, 1), '2');
    }

    #[test]
    fn test_horizontal_line_glyph() {
        let mut grid = CellGrid::new(160.0, 32.0);
        grid.blit(&[PaintCommand::Line {
            from: Point::new(8.0, 16.0),
            to: Point::new(120.0, 16.0),
            color: theme::LIGHT.minute_hand,
        }]);
        assert_eq!(grid.char_at(5, 1), '─');
    }

    #[test]
    fn test_out_of_bounds_plots_are_dropped() {
        let mut grid = CellGrid::new(80.0, 32.0);
        // Must not panic
        grid.blit(&[PaintCommand::Line {
            from: Point::new(-100.0, -100.0),
            to: Point::new(500.0, 500.0),
            color: theme::LIGHT.second_hand,
        }]);
    }

    #[test]
    fn test_small_disc_is_single_glyph() {
        let mut grid = CellGrid::new(160.0, 64.0);
        grid.blit(&[PaintCommand::Disc {
            center: Point::new(80.0, 32.0),
            radius: 6.0,
            color: theme::LIGHT.center_dot,
        }]);
        assert_eq!(grid.char_at(10, 2), '●');
    }

    #[test]
    fn test_flip_rotates_grid() {
        let mut grid = CellGrid::new(160.0, 32.0);
        grid.blit(&[PaintCommand::Text {
            at: Point::new(8.0, 0.0),
            text: "x".to_string(),
            color: theme::LIGHT.hour_markers,
        }]);
        let (cols, rows) = (grid.cols(), grid.rows());
        let col = 1; // "x" centered on cell 1
        assert_eq!(grid.char_at(col, 0), 'x');
        grid.flip();
        assert_eq!(grid.char_at(cols - 1 - col, rows - 1), 'x');
    }
}
