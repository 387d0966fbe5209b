use crate::geometry::{Point, RectF, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    pub fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeEdge::Left | ResizeEdge::TopLeft | ResizeEdge::BottomLeft
        )
    }

    pub fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeEdge::Right | ResizeEdge::TopRight | ResizeEdge::BottomRight
        )
    }

    pub fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeEdge::Top | ResizeEdge::TopLeft | ResizeEdge::TopRight
        )
    }

    pub fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight
        )
    }
}

/// Which frame edge, if any, lies under `pos` for a window of `size`.
///
/// The band is `border` thick; corners extend to twice that along each edge
/// so diagonal resizing is easy to grab.
pub fn edge_at(pos: Point, size: Size, border: f32) -> Option<ResizeEdge> {
    if border <= 0.0 || size.is_empty() {
        return None;
    }
    let (w, h) = (size.width, size.height);
    if pos.x < 0.0 || pos.y < 0.0 || pos.x >= w || pos.y >= h {
        return None;
    }
    let corner = border * 2.0;
    let left = pos.x < border;
    let right = pos.x >= w - border;
    let top = pos.y < border;
    let bottom = pos.y >= h - border;
    let near_left = pos.x < corner;
    let near_right = pos.x >= w - corner;
    let near_top = pos.y < corner;
    let near_bottom = pos.y >= h - corner;

    if (top && near_left) || (left && near_top) {
        Some(ResizeEdge::TopLeft)
    } else if (top && near_right) || (right && near_top) {
        Some(ResizeEdge::TopRight)
    } else if (bottom && near_left) || (left && near_bottom) {
        Some(ResizeEdge::BottomLeft)
    } else if (bottom && near_right) || (right && near_bottom) {
        Some(ResizeEdge::BottomRight)
    } else if left {
        Some(ResizeEdge::Left)
    } else if right {
        Some(ResizeEdge::Right)
    } else if top {
        Some(ResizeEdge::Top)
    } else if bottom {
        Some(ResizeEdge::Bottom)
    } else {
        None
    }
}

/// Apply a pointer delta to `start` while dragging `edge`, never shrinking
/// below `min`. When the minimum kicks in on a left/top edge the origin is
/// pushed back so the opposite edge stays put.
pub fn resize_rect(start: RectF, edge: ResizeEdge, delta: Point, min: Size) -> RectF {
    let mut x = start.x;
    let mut y = start.y;
    let mut width = start.width;
    let mut height = start.height;

    if edge.moves_left() {
        x += delta.x;
        width -= delta.x;
    } else if edge.moves_right() {
        width += delta.x;
    }
    if edge.moves_top() {
        y += delta.y;
        height -= delta.y;
    } else if edge.moves_bottom() {
        height += delta.y;
    }

    if width < min.width {
        if edge.moves_left() {
            x -= min.width - width;
        }
        width = min.width;
    }
    if height < min.height {
        if edge.moves_top() {
            y -= min.height - height;
        }
        height = min.height;
    }
    RectF::new(x, y, width, height)
}
