//! Backend-neutral pointer events delivered to the title bar.

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    /// Any other button code the platform reports.
    Other(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Move,
    Press(PointerButton),
    Release(PointerButton),
    DoubleClick(PointerButton),
    /// The pointer left the title bar entirely.
    Leave,
}

/// A pointer event scoped to the title bar.
///
/// `position` is relative to the bar's top-left corner; `screen_position` is
/// what the host needs to start an interactive move or resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
    pub screen_position: Point,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, position: Point, screen_position: Point) -> Self {
        Self {
            kind,
            position,
            screen_position,
        }
    }

    /// Event whose screen position equals its bar position; convenient when
    /// the bar sits at the screen origin.
    pub fn local(kind: PointerKind, position: Point) -> Self {
        Self::new(kind, position, position)
    }

    pub fn is_primary_press(&self) -> bool {
        self.kind == PointerKind::Press(PointerButton::Primary)
    }
}
