use std::ops::Range;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use resvg::{tiny_skia, usvg};

use crate::canvas::{Canvas, IconImage, TextAlign};
use crate::color::Rgba;
use crate::error::GlyphError;
use crate::geometry::{Point, RectF, Size};
use crate::term_color::{ColorDepth, to_terminal_color};

const COVERAGE_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];
const PARTIAL_BLOCKS: &[char] = &['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Logical pixels covered by one terminal cell.
pub const DEFAULT_CELL_SIZE: Size = Size::new(8.0, 16.0);

/// `Canvas` over a region of a ratatui buffer.
///
/// Logical pixel `(x, y)` lands in cell `(area.x + x / cell.width,
/// area.y + y / cell.height)`. A fill covers the cells whose centers fall
/// inside it; shapes thinner than a cell fall back to partial block and box
/// drawing characters. Translucent colors are composited over the colors
/// this canvas already painted, starting from `base`.
pub struct TerminalCanvas<'a> {
    buffer: &'a mut Buffer,
    area: Rect,
    cell: Size,
    depth: ColorDepth,
    backdrop: Vec<Rgba>,
}

impl<'a> TerminalCanvas<'a> {
    pub fn new(buffer: &'a mut Buffer, area: Rect, base: Rgba, depth: ColorDepth) -> Self {
        let area = area.intersection(buffer.area);
        let cells = area.width as usize * area.height as usize;
        Self {
            buffer,
            area,
            cell: DEFAULT_CELL_SIZE,
            depth,
            backdrop: vec![base; cells],
        }
    }

    pub fn with_cell_size(mut self, cell: Size) -> Self {
        if !cell.is_empty() {
            self.cell = cell;
        }
        self
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Cells whose centers lie in `[start, end)` along one axis.
    fn span(start: f32, end: f32, cell: f32, len: u16) -> Range<u16> {
        let first = (start / cell - 0.5).ceil().max(0.0);
        let last = (end / cell - 0.5).ceil().max(0.0);
        let first = (first as u32).min(len as u32) as u16;
        let last = (last as u32).min(len as u32) as u16;
        first..last.max(first)
    }

    fn cell_of(&self, p: Point) -> Option<(u16, u16)> {
        if p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let col = (p.x / self.cell.width) as u32;
        let row = (p.y / self.cell.height) as u32;
        (col < self.area.width as u32 && row < self.area.height as u32)
            .then_some((col as u16, row as u16))
    }

    fn index(&self, col: u16, row: u16) -> usize {
        row as usize * self.area.width as usize + col as usize
    }

    fn composite(&mut self, col: u16, row: u16, color: Rgba) -> Rgba {
        let idx = self.index(col, row);
        let mixed = color.over(self.backdrop[idx]);
        self.backdrop[idx] = mixed;
        mixed
    }

    fn paint_bg(&mut self, col: u16, row: u16, color: Rgba) {
        let mixed = self.composite(col, row, color);
        let bg = to_terminal_color(mixed, self.depth);
        let (x, y) = (self.area.x + col, self.area.y + row);
        if let Some(cell) = self.buffer.cell_mut((x, y)) {
            cell.set_symbol(" ");
            cell.set_bg(bg);
        }
    }

    fn paint_symbol(&mut self, col: u16, row: u16, symbol: char, color: Rgba) {
        let idx = self.index(col, row);
        let fg = to_terminal_color(color.over(self.backdrop[idx]), self.depth);
        let (x, y) = (self.area.x + col, self.area.y + row);
        if let Some(cell) = self.buffer.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_fg(fg);
        }
    }

    fn fill_cells(&mut self, rect: RectF, color: Rgba) -> bool {
        let cols = Self::span(rect.x, rect.right(), self.cell.width, self.area.width);
        let rows = Self::span(rect.y, rect.bottom(), self.cell.height, self.area.height);
        if cols.is_empty() || rows.is_empty() {
            return false;
        }
        for row in rows {
            for col in cols.clone() {
                self.paint_bg(col, row, color);
            }
        }
        true
    }

    fn render_svg(&mut self, rect: RectF, document: &str) -> Result<(), GlyphError> {
        let width = rect.width.round() as u32;
        let height = rect.height.round() as u32;
        let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or(GlyphError::EmptyTarget)?;
        let tree = usvg::Tree::from_data(document.as_bytes(), &usvg::Options::default())?;
        let size = tree.size();
        let transform = tiny_skia::Transform::from_scale(
            width as f32 / size.width(),
            height as f32 / size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        let cols = Self::span(rect.x, rect.right(), self.cell.width, self.area.width);
        let rows = Self::span(rect.y, rect.bottom(), self.cell.height, self.area.height);
        for row in rows {
            for col in cols.clone() {
                let cell_rect = RectF::new(
                    col as f32 * self.cell.width - rect.x,
                    row as f32 * self.cell.height - rect.y,
                    self.cell.width,
                    self.cell.height,
                );
                if let Some((coverage, color)) = sample_coverage(&pixmap, cell_rect) {
                    // Thin strokes cover little of a cell; boost so they stay visible.
                    let boosted = (coverage * 4.0).min(1.0);
                    let idx = (boosted * (COVERAGE_RAMP.len() - 1) as f32).round() as usize;
                    if idx > 0 {
                        self.paint_symbol(col, row, COVERAGE_RAMP[idx], color);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Mean alpha and alpha-weighted color of the pixmap under `rect`.
fn sample_coverage(pixmap: &tiny_skia::Pixmap, rect: RectF) -> Option<(f32, Rgba)> {
    let x0 = rect.x.max(0.0) as u32;
    let y0 = rect.y.max(0.0) as u32;
    let x1 = (rect.right().max(0.0) as u32).min(pixmap.width());
    let y1 = (rect.bottom().max(0.0) as u32).min(pixmap.height());
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    let (mut alpha, mut r, mut g, mut b) = (0u32, 0u32, 0u32, 0u32);
    for y in y0..y1 {
        for x in x0..x1 {
            let Some(px) = pixmap.pixel(x, y) else {
                continue;
            };
            // premultiplied channels, so summing them weights by alpha
            alpha += px.alpha() as u32;
            r += px.red() as u32;
            g += px.green() as u32;
            b += px.blue() as u32;
        }
    }
    if alpha == 0 {
        return Some((0.0, Rgba::TRANSPARENT));
    }
    let count = (x1 - x0) * (y1 - y0);
    let unmul = |c: u32| ((c * 255) / alpha).min(255) as u8;
    let coverage = alpha as f32 / (count as f32 * 255.0);
    Some((coverage, Rgba::rgb(unmul(r), unmul(g), unmul(b))))
}

fn partial_block(fraction: f32) -> char {
    let idx = (fraction.clamp(0.0, 1.0) * PARTIAL_BLOCKS.len() as f32).ceil() as usize;
    PARTIAL_BLOCKS[idx.clamp(1, PARTIAL_BLOCKS.len()) - 1]
}

impl Canvas for TerminalCanvas<'_> {
    fn fill_rect(&mut self, rect: RectF, color: Rgba) {
        if color.is_transparent() || rect.is_empty() {
            return;
        }
        self.fill_cells(rect, color);
    }

    fn fill_rounded_rect(&mut self, rect: RectF, _radius: f32, color: Rgba) {
        if color.is_transparent() || rect.is_empty() {
            return;
        }
        if self.fill_cells(rect, color) {
            return;
        }
        // Smaller than a cell: a bottom-anchored block sized to the height.
        if let Some((col, row)) = self.cell_of(rect.center()) {
            let symbol = partial_block(rect.height / self.cell.height);
            self.paint_symbol(col, row, symbol, color);
        }
    }

    fn stroke_rect(&mut self, rect: RectF, color: Rgba, _width: f32) {
        let tl = self.cell_of(rect.origin());
        let br = self.cell_of(Point::new(rect.right() - 0.01, rect.bottom() - 0.01));
        let (Some((c0, r0)), Some((c1, r1))) = (tl, br) else {
            return;
        };
        if c0 == c1 && r0 == r1 {
            self.paint_symbol(c0, r0, '□', color);
            return;
        }
        for col in c0..=c1 {
            self.paint_symbol(col, r0, '─', color);
            self.paint_symbol(col, r1, '─', color);
        }
        for row in r0..=r1 {
            self.paint_symbol(c0, row, '│', color);
            self.paint_symbol(c1, row, '│', color);
        }
        if r0 != r1 {
            self.paint_symbol(c0, r0, '┌', color);
            self.paint_symbol(c1, r0, '┐', color);
            self.paint_symbol(c0, r1, '└', color);
            self.paint_symbol(c1, r1, '┘', color);
        }
    }

    fn line(&mut self, from: Point, to: Point, color: Rgba, _width: f32) {
        let (Some(a), Some(b)) = (self.cell_of(from), self.cell_of(to)) else {
            return;
        };
        let dx = (to.x - from.x) / self.cell.width;
        let dy = (to.y - from.y) / self.cell.height;
        let symbol = if dy.abs() < 0.5 {
            '─'
        } else if dx.abs() < 0.5 {
            '│'
        } else if (dx > 0.0) == (dy > 0.0) {
            '╲'
        } else {
            '╱'
        };
        let steps = (a.0.abs_diff(b.0)).max(a.1.abs_diff(b.1));
        for i in 0..=steps {
            let t = if steps == 0 {
                0.0
            } else {
                i as f32 / steps as f32
            };
            let col = (a.0 as f32 + (b.0 as f32 - a.0 as f32) * t).round() as u16;
            let row = (a.1 as f32 + (b.1 as f32 - a.1 as f32) * t).round() as u16;
            self.paint_symbol(col, row, symbol, color);
        }
    }

    fn polyline(&mut self, points: &[Point], color: Rgba, width: f32) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], color, width);
        }
    }

    fn text(&mut self, rect: RectF, text: &str, color: Rgba, _size: f32, align: TextAlign) {
        let cols = Self::span(rect.x, rect.right(), self.cell.width, self.area.width);
        let Some((_, row)) = self.cell_of(rect.center()) else {
            return;
        };
        let available = cols.len();
        if available == 0 || text.is_empty() {
            return;
        }
        let chars: Vec<char> = text.chars().take(available).collect();
        let start = match align {
            TextAlign::Left => cols.start,
            TextAlign::Center => cols.start + ((available - chars.len()) / 2) as u16,
        };
        for (i, ch) in chars.into_iter().enumerate() {
            self.paint_symbol(start + i as u16, row, ch, color);
        }
    }

    fn svg(&mut self, rect: RectF, document: &str) {
        if let Err(err) = self.render_svg(rect, document) {
            tracing::debug!(%err, "svg glyph skipped");
        }
    }

    fn image(&mut self, rect: RectF, image: &IconImage) {
        let cols = Self::span(rect.x, rect.right(), self.cell.width, self.area.width);
        let rows = Self::span(rect.y, rect.bottom(), self.cell.height, self.area.height);
        let (iw, ih) = (image.width() as f32, image.height() as f32);
        for row in rows {
            for col in cols.clone() {
                let cx = (col as f32 + 0.5) * self.cell.width;
                let cy = (row as f32 + 0.5) * self.cell.height;
                let sx = (((cx - rect.x) / rect.width) * iw).clamp(0.0, iw - 1.0) as usize;
                let sy = (((cy - rect.y) / rect.height) * ih).clamp(0.0, ih - 1.0) as usize;
                let offset = (sy * image.width() as usize + sx) * 4;
                if let Some(px) = image.rgba().get(offset..offset + 4) {
                    self.paint_bg(col, row, Rgba::new(px[0], px[1], px[2], px[3]));
                }
            }
        }
    }
}

/// Paint every cell of `area` with an opaque background.
pub fn clear_area(buffer: &mut Buffer, area: Rect, color: Rgba, depth: ColorDepth) {
    let style = Style::default().bg(to_terminal_color(color, depth));
    buffer.set_style(area.intersection(buffer.area), style);
    for pos in area.intersection(buffer.area).positions() {
        if let Some(cell) = buffer.cell_mut(pos) {
            cell.set_symbol(" ");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::replay;
    use crate::controls::Control;
    use ratatui::style::Color;

    const WHITE: Rgba = Rgba::WHITE;

    fn buffer(w: u16, h: u16) -> Buffer {
        Buffer::empty(Rect::new(0, 0, w, h))
    }

    #[test]
    fn fill_covers_cells_by_center() {
        let mut buf = buffer(10, 2);
        let mut canvas = TerminalCanvas::new(&mut buf, Rect::new(0, 0, 10, 2), WHITE, ColorDepth::TrueColor);
        canvas.fill_rect(RectF::new(8.0, 0.0, 16.0, 32.0), Rgba::rgb(232, 17, 35));
        assert_eq!(buf[(0, 0)].bg, Color::Reset);
        assert_eq!(buf[(1, 0)].bg, Color::Rgb(232, 17, 35));
        assert_eq!(buf[(2, 1)].bg, Color::Rgb(232, 17, 35));
        assert_eq!(buf[(3, 0)].bg, Color::Reset);
    }

    #[test]
    fn translucent_fills_stack() {
        let mut buf = buffer(2, 1);
        let mut canvas = TerminalCanvas::new(&mut buf, Rect::new(0, 0, 2, 1), WHITE, ColorDepth::TrueColor);
        let overlay = Rgba::new(0, 0, 0, 128);
        canvas.fill_rect(RectF::new(0.0, 0.0, 8.0, 16.0), overlay);
        canvas.fill_rect(RectF::new(0.0, 0.0, 8.0, 16.0), overlay);
        let Color::Rgb(r, _, _) = buf[(0, 0)].bg else {
            panic!("expected rgb background");
        };
        assert!(r < 80, "two half-black layers should be dark, got {r}");
    }

    #[test]
    fn offset_area_translates_coordinates() {
        let mut buf = buffer(20, 5);
        let mut canvas = TerminalCanvas::new(&mut buf, Rect::new(5, 2, 10, 2), WHITE, ColorDepth::TrueColor);
        canvas.text(RectF::new(0.0, 0.0, 80.0, 32.0), "hi", Rgba::BLACK, 13.0, TextAlign::Left);
        assert_eq!(buf[(5, 3)].symbol(), "h");
        assert_eq!(buf[(6, 3)].symbol(), "i");
    }

    #[test]
    fn minimize_glyph_becomes_horizontal_rule() {
        let mut buf = buffer(6, 2);
        let mut canvas = TerminalCanvas::new(&mut buf, Rect::new(0, 0, 6, 2), WHITE, ColorDepth::TrueColor);
        let commands = Control::minimize().render_commands(RectF::new(0.0, 0.0, 46.0, 32.0), 1.0);
        replay(&mut canvas, &commands);
        assert_eq!(buf[(2, 1)].symbol(), "─");
        assert_eq!(buf[(3, 1)].symbol(), "─");
    }

    #[test]
    fn close_glyph_leaves_ink_in_the_cluster() {
        let mut buf = buffer(6, 2);
        let mut canvas = TerminalCanvas::new(&mut buf, Rect::new(0, 0, 6, 2), WHITE, ColorDepth::TrueColor);
        let commands = Control::close().render_commands(RectF::new(0.0, 0.0, 46.0, 32.0), 1.0);
        replay(&mut canvas, &commands);
        let inked = buf.content().iter().filter(|c| c.symbol() != " ").count();
        assert!(inked > 0);
    }

    #[test]
    fn tiny_rounded_rect_uses_partial_block() {
        let mut buf = buffer(2, 1);
        let mut canvas = TerminalCanvas::new(&mut buf, Rect::new(0, 0, 2, 1), WHITE, ColorDepth::TrueColor);
        canvas.fill_rounded_rect(RectF::new(1.0, 10.0, 5.0, 6.0), 2.0, Rgba::BLACK);
        assert_eq!(buf[(0, 0)].symbol(), "▃");
    }

    #[test]
    fn partial_block_bounds() {
        assert_eq!(partial_block(0.01), '▁');
        assert_eq!(partial_block(1.0), '█');
        assert_eq!(partial_block(3.0), '█');
    }
}
