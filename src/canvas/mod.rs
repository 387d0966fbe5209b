//! Rendering seam between controls and a drawing backend.
//!
//! Controls never paint directly. They produce `DrawCommand`s, which are plain
//! values that can be inspected in tests or replayed onto any `Canvas`
//! implementation (raster pixmap, terminal buffer, recording).

use std::sync::Arc;

use crate::color::Rgba;
use crate::geometry::{Point, RectF};

pub mod raster;
pub mod recording;

pub use raster::RasterCanvas;
pub use recording::RecordingCanvas;

/// Straight-alpha RGBA bitmap used for window icons and tool item icons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    width: u32,
    height: u32,
    rgba: Arc<[u8]>,
}

impl IconImage {
    /// Returns `None` when `rgba` does not hold exactly `width * height` pixels.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if width == 0 || height == 0 || rgba.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            rgba: rgba.into(),
        })
    }

    /// Single-color square, handy for placeholder icons.
    pub fn solid(side: u32, color: Rgba) -> Option<Self> {
        let pixels = (side as usize).checked_mul(side as usize)?;
        let rgba = [color.r, color.g, color.b, color.a].repeat(pixels);
        Self::new(side, side, rgba)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Center,
    /// Left aligned, vertically centered.
    Left,
}

/// A single drawing primitive in logical pixels.
///
/// Every command carries its own pen/brush color so a command list is
/// self-contained and order is the only state.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: RectF,
        color: Rgba,
    },
    FillRoundedRect {
        rect: RectF,
        radius: f32,
        color: Rgba,
    },
    StrokeRect {
        rect: RectF,
        color: Rgba,
        width: f32,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgba,
        width: f32,
    },
    Polyline {
        points: Vec<Point>,
        color: Rgba,
        width: f32,
    },
    Text {
        rect: RectF,
        text: String,
        color: Rgba,
        size: f32,
        align: TextAlign,
    },
    /// A complete SVG document scaled to fill `rect`.
    Svg {
        rect: RectF,
        document: String,
    },
    Image {
        rect: RectF,
        image: IconImage,
    },
}

impl DrawCommand {
    pub fn apply<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        match self {
            DrawCommand::FillRect { rect, color } => canvas.fill_rect(*rect, *color),
            DrawCommand::FillRoundedRect {
                rect,
                radius,
                color,
            } => canvas.fill_rounded_rect(*rect, *radius, *color),
            DrawCommand::StrokeRect { rect, color, width } => {
                canvas.stroke_rect(*rect, *color, *width)
            }
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => canvas.line(*from, *to, *color, *width),
            DrawCommand::Polyline {
                points,
                color,
                width,
            } => canvas.polyline(points, *color, *width),
            DrawCommand::Text {
                rect,
                text,
                color,
                size,
                align,
            } => canvas.text(*rect, text, *color, *size, *align),
            DrawCommand::Svg { rect, document } => canvas.svg(*rect, document),
            DrawCommand::Image { rect, image } => canvas.image(*rect, image),
        }
    }
}

/// Replay a command list in order.
pub fn replay<C: Canvas + ?Sized>(canvas: &mut C, commands: &[DrawCommand]) {
    for command in commands {
        command.apply(canvas);
    }
}

/// Abstract 2D drawing surface in logical pixels.
pub trait Canvas {
    /// Physical pixels per logical pixel.
    fn device_pixel_ratio(&self) -> f32 {
        1.0
    }

    fn fill_rect(&mut self, rect: RectF, color: Rgba);

    fn fill_rounded_rect(&mut self, rect: RectF, radius: f32, color: Rgba);

    fn stroke_rect(&mut self, rect: RectF, color: Rgba, width: f32);

    fn line(&mut self, from: Point, to: Point, color: Rgba, width: f32);

    fn polyline(&mut self, points: &[Point], color: Rgba, width: f32);

    fn text(&mut self, rect: RectF, text: &str, color: Rgba, size: f32, align: TextAlign);

    fn svg(&mut self, rect: RectF, document: &str);

    fn image(&mut self, rect: RectF, image: &IconImage);
}

impl<T: Canvas + ?Sized> Canvas for &mut T {
    fn device_pixel_ratio(&self) -> f32 {
        (**self).device_pixel_ratio()
    }

    fn fill_rect(&mut self, rect: RectF, color: Rgba) {
        (**self).fill_rect(rect, color)
    }

    fn fill_rounded_rect(&mut self, rect: RectF, radius: f32, color: Rgba) {
        (**self).fill_rounded_rect(rect, radius, color)
    }

    fn stroke_rect(&mut self, rect: RectF, color: Rgba, width: f32) {
        (**self).stroke_rect(rect, color, width)
    }

    fn line(&mut self, from: Point, to: Point, color: Rgba, width: f32) {
        (**self).line(from, to, color, width)
    }

    fn polyline(&mut self, points: &[Point], color: Rgba, width: f32) {
        (**self).polyline(points, color, width)
    }

    fn text(&mut self, rect: RectF, text: &str, color: Rgba, size: f32, align: TextAlign) {
        (**self).text(rect, text, color, size, align)
    }

    fn svg(&mut self, rect: RectF, document: &str) {
        (**self).svg(rect, document)
    }

    fn image(&mut self, rect: RectF, image: &IconImage) {
        (**self).image(rect, image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_image_rejects_mismatched_buffers() {
        assert!(IconImage::new(2, 2, vec![0; 16]).is_some());
        assert!(IconImage::new(2, 2, vec![0; 15]).is_none());
        assert!(IconImage::new(0, 2, Vec::new()).is_none());
        let solid = IconImage::solid(3, Rgba::WHITE).expect("solid icon");
        assert_eq!(solid.rgba().len(), 36);
    }

    #[test]
    fn replay_preserves_command_order() {
        let commands = vec![
            DrawCommand::FillRect {
                rect: RectF::new(0.0, 0.0, 4.0, 4.0),
                color: Rgba::BLACK,
            },
            DrawCommand::Line {
                from: Point::new(0.0, 1.0),
                to: Point::new(4.0, 1.0),
                color: Rgba::WHITE,
                width: 1.0,
            },
        ];
        let mut canvas = RecordingCanvas::new();
        replay(&mut canvas, &commands);
        assert_eq!(canvas.commands(), commands.as_slice());
    }
}
