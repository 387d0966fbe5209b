//! Terminal backend: a simulated frameless window drawn with ratatui and
//! driven by crossterm mouse events.

pub mod canvas;
pub mod driver;
pub mod host;
pub mod input;

pub use canvas::{DEFAULT_CELL_SIZE, TerminalCanvas};
pub use driver::{ConsoleInputDriver, ConsoleOutputDriver, InputDriver};
pub use host::TerminalHost;
pub use input::{DOUBLE_CLICK_INTERVAL, PointerTranslator};

use ratatui::layout::Rect;

use crate::geometry::{RectF, Size};

/// Cell rectangle covering a pixel rectangle, clamped to `u16`.
pub fn cells_for(rect: RectF, cell: Size) -> Rect {
    let to_cells = |v: f32, unit: f32| (v / unit).round().clamp(0.0, u16::MAX as f32) as u16;
    Rect::new(
        to_cells(rect.x, cell.width),
        to_cells(rect.y, cell.height),
        to_cells(rect.width, cell.width),
        to_cells(rect.height, cell.height),
    )
}

/// Pixel rectangle of a cell rectangle.
pub fn pixels_for(area: Rect, cell: Size) -> RectF {
    RectF::new(
        area.x as f32 * cell.width,
        area.y as f32 * cell.height,
        area.width as f32 * cell.width,
        area.height as f32 * cell.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_pixel_conversion_round_trips_aligned_rects() {
        let area = Rect::new(3, 2, 40, 12);
        let px = pixels_for(area, DEFAULT_CELL_SIZE);
        assert_eq!(px, RectF::new(24.0, 32.0, 320.0, 192.0));
        assert_eq!(cells_for(px, DEFAULT_CELL_SIZE), area);
    }

    #[test]
    fn negative_origins_clamp_to_zero() {
        let r = cells_for(RectF::new(-40.0, 0.0, 80.0, 32.0), DEFAULT_CELL_SIZE);
        assert_eq!(r.x, 0);
        assert_eq!(r.height, 2);
    }
}
