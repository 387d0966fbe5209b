//! Pixmap canvas backed by `tiny_skia`, with SVG glyphs rendered by `resvg`.

use resvg::{tiny_skia, usvg};

use super::{Canvas, IconImage, TextAlign};
use crate::color::Rgba;
use crate::error::GlyphError;
use crate::geometry::{Point, RectF, Size};

pub struct RasterCanvas {
    pixmap: tiny_skia::Pixmap,
    scale: f32,
}

impl RasterCanvas {
    /// Allocate a transparent pixmap covering `logical` at `scale` device
    /// pixels per logical pixel. Returns `None` for a zero-sized surface.
    pub fn new(logical: Size, scale: f32) -> Option<Self> {
        let scale = if scale > 0.0 { scale } else { 1.0 };
        let width = (logical.width * scale).ceil().max(0.0) as u32;
        let height = (logical.height * scale).ceil().max(0.0) as u32;
        let pixmap = tiny_skia::Pixmap::new(width, height)?;
        Some(Self { pixmap, scale })
    }

    pub fn pixmap(&self) -> &tiny_skia::Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> tiny_skia::Pixmap {
        self.pixmap
    }

    /// Straight-alpha color of a device pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgba::new(
            color.red(),
            color.green(),
            color.blue(),
            color.alpha(),
        ))
    }

    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn transform(&self) -> tiny_skia::Transform {
        tiny_skia::Transform::from_scale(self.scale, self.scale)
    }

    fn paint(color: Rgba, anti_alias: bool) -> tiny_skia::Paint<'static> {
        let mut paint = tiny_skia::Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = anti_alias;
        paint
    }

    fn stroke(width: f32) -> tiny_skia::Stroke {
        tiny_skia::Stroke {
            width,
            ..tiny_skia::Stroke::default()
        }
    }

    fn stroke_path(&mut self, path: &tiny_skia::Path, color: Rgba, width: f32) {
        let paint = Self::paint(color, true);
        let transform = self.transform();
        self.pixmap
            .stroke_path(path, &paint, &Self::stroke(width), transform, None);
    }

    fn render_svg(&mut self, rect: RectF, document: &str) -> Result<(), GlyphError> {
        if rect.is_empty() {
            return Err(GlyphError::EmptyTarget);
        }
        let options = usvg::Options::default();
        let tree = usvg::Tree::from_data(document.as_bytes(), &options)?;
        let size = tree.size();
        if size.width() <= 0.0 || size.height() <= 0.0 {
            return Err(GlyphError::EmptyTarget);
        }
        let sx = rect.width / size.width() * self.scale;
        let sy = rect.height / size.height() * self.scale;
        let transform =
            tiny_skia::Transform::from_row(sx, 0.0, 0.0, sy, rect.x * self.scale, rect.y * self.scale);
        resvg::render(&tree, transform, &mut self.pixmap.as_mut());
        Ok(())
    }
}

fn rounded_rect_path(rect: RectF, radius: f32) -> Option<tiny_skia::Path> {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    let (x0, y0, x1, y1) = (rect.x, rect.y, rect.right(), rect.bottom());
    let mut pb = tiny_skia::PathBuilder::new();
    pb.move_to(x0 + r, y0);
    pb.line_to(x1 - r, y0);
    pb.quad_to(x1, y0, x1, y0 + r);
    pb.line_to(x1, y1 - r);
    pb.quad_to(x1, y1, x1 - r, y1);
    pb.line_to(x0 + r, y1);
    pb.quad_to(x0, y1, x0, y1 - r);
    pb.line_to(x0, y0 + r);
    pb.quad_to(x0, y0, x0 + r, y0);
    pb.close();
    pb.finish()
}

fn premultiplied(image: &IconImage) -> Option<tiny_skia::Pixmap> {
    let mut data = Vec::with_capacity(image.rgba().len());
    for px in image.rgba().chunks_exact(4) {
        let a = px[3] as u16;
        let mul = |c: u8| ((c as u16 * a + 127) / 255) as u8;
        data.extend_from_slice(&[mul(px[0]), mul(px[1]), mul(px[2]), px[3]]);
    }
    let size = tiny_skia::IntSize::from_wh(image.width(), image.height())?;
    tiny_skia::Pixmap::from_vec(data, size)
}

impl Canvas for RasterCanvas {
    fn device_pixel_ratio(&self) -> f32 {
        self.scale
    }

    fn fill_rect(&mut self, rect: RectF, color: Rgba) {
        if color.is_transparent() {
            return;
        }
        let Some(r) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) else {
            return;
        };
        let paint = Self::paint(color, false);
        let transform = self.transform();
        self.pixmap.fill_rect(r, &paint, transform, None);
    }

    fn fill_rounded_rect(&mut self, rect: RectF, radius: f32, color: Rgba) {
        if color.is_transparent() {
            return;
        }
        let Some(path) = rounded_rect_path(rect, radius) else {
            return;
        };
        let paint = Self::paint(color, true);
        let transform = self.transform();
        self.pixmap
            .fill_path(&path, &paint, tiny_skia::FillRule::Winding, transform, None);
    }

    fn stroke_rect(&mut self, rect: RectF, color: Rgba, width: f32) {
        let Some(r) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) else {
            return;
        };
        let path = tiny_skia::PathBuilder::from_rect(r);
        self.stroke_path(&path, color, width);
    }

    fn line(&mut self, from: Point, to: Point, color: Rgba, width: f32) {
        self.polyline(&[from, to], color, width);
    }

    fn polyline(&mut self, points: &[Point], color: Rgba, width: f32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut pb = tiny_skia::PathBuilder::new();
        pb.move_to(first.x, first.y);
        for p in rest {
            pb.line_to(p.x, p.y);
        }
        if let Some(path) = pb.finish() {
            self.stroke_path(&path, color, width);
        }
    }

    fn text(&mut self, _rect: RectF, text: &str, _color: Rgba, _size: f32, _align: TextAlign) {
        // No font stack here; hosts that need labels paint them on their own surface.
        tracing::trace!(text, "raster canvas skipped text");
    }

    fn svg(&mut self, rect: RectF, document: &str) {
        if let Err(err) = self.render_svg(rect, document) {
            tracing::debug!(%err, "skipping svg glyph");
        }
    }

    fn image(&mut self, rect: RectF, image: &IconImage) {
        let Some(src) = premultiplied(image) else {
            return;
        };
        let sx = rect.width / image.width() as f32 * self.scale;
        let sy = rect.height / image.height() as f32 * self.scale;
        let transform =
            tiny_skia::Transform::from_row(sx, 0.0, 0.0, sy, rect.x * self.scale, rect.y * self.scale);
        let paint = tiny_skia::PixmapPaint {
            quality: tiny_skia::FilterQuality::Bilinear,
            ..tiny_skia::PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, src.as_ref(), &paint, transform, None);
    }
}
