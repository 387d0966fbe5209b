use super::{Canvas, DrawCommand, IconImage, TextAlign};
use crate::color::Rgba;
use crate::geometry::{Point, RectF};

/// Canvas that stores every primitive it receives.
///
/// Used by tests and by hosts that want to diff frames before painting.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    dpr: f32,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::with_device_pixel_ratio(1.0)
    }

    pub fn with_device_pixel_ratio(dpr: f32) -> Self {
        Self {
            dpr,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for RecordingCanvas {
    fn device_pixel_ratio(&self) -> f32 {
        self.dpr
    }

    fn fill_rect(&mut self, rect: RectF, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_rounded_rect(&mut self, rect: RectF, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillRoundedRect {
            rect,
            radius,
            color,
        });
    }

    fn stroke_rect(&mut self, rect: RectF, color: Rgba, width: f32) {
        self.commands
            .push(DrawCommand::StrokeRect { rect, color, width });
    }

    fn line(&mut self, from: Point, to: Point, color: Rgba, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn polyline(&mut self, points: &[Point], color: Rgba, width: f32) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn text(&mut self, rect: RectF, text: &str, color: Rgba, size: f32, align: TextAlign) {
        self.commands.push(DrawCommand::Text {
            rect,
            text: text.to_string(),
            color,
            size,
            align,
        });
    }

    fn svg(&mut self, rect: RectF, document: &str) {
        self.commands.push(DrawCommand::Svg {
            rect,
            document: document.to_string(),
        });
    }

    fn image(&mut self, rect: RectF, image: &IconImage) {
        self.commands.push(DrawCommand::Image {
            rect,
            image: image.clone(),
        });
    }
}
