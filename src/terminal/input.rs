use std::time::{Duration, Instant};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::geometry::{Point, RectF, Size};
use crate::input::{PointerButton, PointerEvent, PointerKind};

/// Two primary presses on the same cell within this window form a
/// double-click.
pub const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(500);

/// Converts crossterm mouse events (cells) into title bar pointer events
/// (logical pixels, relative to the bar).
///
/// Terminals report no double-clicks, so they are synthesized here. The
/// second press of a pair is delivered as `DoubleClick` instead of `Press`.
#[derive(Debug, Clone)]
pub struct PointerTranslator {
    cell: Size,
    interval: Duration,
    last_press: Option<(Instant, u16, u16)>,
    inside: bool,
}

impl PointerTranslator {
    pub fn new(cell: Size) -> Self {
        Self {
            cell,
            interval: DOUBLE_CLICK_INTERVAL,
            last_press: None,
            inside: false,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Center of a cell in screen pixels.
    pub fn screen_point(&self, column: u16, row: u16) -> Point {
        Point::new(
            (column as f32 + 0.5) * self.cell.width,
            (row as f32 + 0.5) * self.cell.height,
        )
    }

    /// Translate `event` for a bar occupying `bar` on screen. Returns `None`
    /// for events the bar should not see (wheel, presses elsewhere).
    pub fn translate(&mut self, event: &MouseEvent, bar: RectF, now: Instant) -> Option<PointerEvent> {
        let screen = self.screen_point(event.column, event.row);
        let local = Point::new(screen.x - bar.x, screen.y - bar.y);
        let inside = bar.contains(screen);
        let make = |kind| PointerEvent::new(kind, local, screen);

        match event.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if inside {
                    self.inside = true;
                    Some(make(PointerKind::Move))
                } else if std::mem::take(&mut self.inside) {
                    Some(make(PointerKind::Leave))
                } else {
                    None
                }
            }
            MouseEventKind::Down(button) => {
                if !inside {
                    self.last_press = None;
                    return None;
                }
                self.inside = true;
                let button = map_button(button);
                if button != PointerButton::Primary {
                    return Some(make(PointerKind::Press(button)));
                }
                if self.is_double_click(event, now) {
                    self.last_press = None;
                    return Some(make(PointerKind::DoubleClick(button)));
                }
                self.last_press = Some((now, event.column, event.row));
                Some(make(PointerKind::Press(button)))
            }
            // Releases go to the bar even off it, like an implicit grab.
            MouseEventKind::Up(button) => Some(make(PointerKind::Release(map_button(button)))),
            _ => None,
        }
    }

    fn is_double_click(&self, event: &MouseEvent, now: Instant) -> bool {
        self.last_press.is_some_and(|(at, col, row)| {
            col == event.column
                && row == event.row
                && now.saturating_duration_since(at) <= self.interval
        })
    }
}

fn map_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
    }
}
