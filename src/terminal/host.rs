//! A simulated frameless window living inside the terminal screen.

use crate::canvas::IconImage;
use crate::error::HostError;
use crate::geometry::{Point, RectF, Size};
use crate::host::{EventSink, HostEvent, HostWindow, SubscriptionId, Subscribers};
use crate::resize::{ResizeEdge, resize_rect};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Session {
    Move { grab: Point, start: RectF },
    Resize { grab: Point, start: RectF, edge: ResizeEdge },
}

/// Host window for the terminal demo. Geometry is in logical pixels; the
/// screen is the terminal area converted with the cell size.
///
/// Interactive move/resize sessions are owned here, like a native window
/// manager would: once started they follow `follow_pointer` until
/// `end_session`.
#[derive(Debug)]
pub struct TerminalHost {
    screen: RectF,
    window: RectF,
    restore: RectF,
    min_size: Size,
    maximized: bool,
    minimized: bool,
    close_requested: bool,
    title: String,
    icon: Option<IconImage>,
    session: Option<Session>,
    subscribers: Subscribers,
}

impl TerminalHost {
    pub fn new(screen: RectF, window: RectF, title: impl Into<String>) -> Self {
        Self {
            screen,
            window,
            restore: window,
            min_size: Size::new(200.0, 64.0),
            maximized: false,
            minimized: false,
            close_requested: false,
            title: title.into(),
            icon: None,
            session: None,
            subscribers: Subscribers::new(),
        }
    }

    pub fn with_min_size(mut self, min: Size) -> Self {
        self.min_size = min;
        self
    }

    pub fn window(&self) -> RectF {
        self.window
    }

    pub fn screen(&self) -> RectF {
        self.screen
    }

    /// Terminal resized. A maximized window keeps filling the screen.
    pub fn set_screen(&mut self, screen: RectF) {
        self.screen = screen;
        if self.maximized {
            self.window = screen;
        }
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn unminimize(&mut self) {
        if self.minimized {
            tracing::debug!("window shown again");
            self.minimized = false;
        }
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.subscribers
            .publish(HostEvent::TitleChanged(self.title.clone()));
    }

    pub fn set_icon(&mut self, icon: Option<IconImage>) {
        self.icon = icon.clone();
        self.subscribers.publish(HostEvent::IconChanged(icon));
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Advance the active move/resize session. Returns whether the window
    /// geometry changed.
    pub fn follow_pointer(&mut self, screen_pos: Point) -> bool {
        let Some(session) = self.session else {
            return false;
        };
        let next = match session {
            Session::Move { grab, start } => {
                let mut x = start.x + (screen_pos.x - grab.x);
                let mut y = start.y + (screen_pos.y - grab.y);
                // keep the title bar reachable
                y = y.clamp(self.screen.y, (self.screen.bottom() - 1.0).max(self.screen.y));
                x = x.clamp(self.screen.x, (self.screen.right() - 1.0).max(self.screen.x));
                RectF::new(x, y, start.width, start.height)
            }
            Session::Resize { grab, start, edge } => {
                let delta = Point::new(screen_pos.x - grab.x, screen_pos.y - grab.y);
                resize_rect(start, edge, delta, self.min_size)
            }
        };
        let changed = next != self.window;
        self.window = next;
        changed
    }

    pub fn end_session(&mut self) -> bool {
        let ended = self.session.take().is_some();
        if ended {
            tracing::debug!(window = ?self.window, "interactive session ended");
        }
        ended
    }

    fn set_maximized(&mut self, maximized: bool) {
        if self.maximized == maximized {
            return;
        }
        if maximized {
            self.restore = self.window;
            self.window = self.screen;
        } else {
            self.window = self.restore;
        }
        self.maximized = maximized;
        self.subscribers
            .publish(HostEvent::StateChanged { maximized });
    }
}

impl HostWindow for TerminalHost {
    fn request_minimize(&mut self) {
        self.end_session();
        self.minimized = true;
    }

    fn request_maximize(&mut self) {
        self.end_session();
        self.set_maximized(true);
    }

    fn request_restore(&mut self) {
        self.end_session();
        self.set_maximized(false);
    }

    fn request_close(&mut self) {
        self.close_requested = true;
    }

    fn is_maximized(&self) -> bool {
        self.maximized
    }

    fn subscribe(&mut self, sink: EventSink) -> SubscriptionId {
        self.subscribers.subscribe(sink)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.unsubscribe(id);
    }

    fn begin_interactive_move(&mut self, screen_pos: Point) -> Result<(), HostError> {
        if self.maximized {
            return Err(HostError::Declined("maximized windows cannot move"));
        }
        self.session = Some(Session::Move {
            grab: screen_pos,
            start: self.window,
        });
        Ok(())
    }

    fn begin_interactive_resize(
        &mut self,
        screen_pos: Point,
        edge: ResizeEdge,
    ) -> Result<(), HostError> {
        if self.maximized {
            return Err(HostError::Declined("maximized windows cannot resize"));
        }
        self.session = Some(Session::Resize {
            grab: screen_pos,
            start: self.window,
            edge,
        });
        Ok(())
    }

    fn release_pointer_button(&mut self) {
        self.end_session();
    }

    fn title(&self) -> Option<String> {
        Some(self.title.clone())
    }

    fn icon(&self) -> Option<IconImage> {
        self.icon.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> TerminalHost {
        TerminalHost::new(
            RectF::new(0.0, 0.0, 800.0, 480.0),
            RectF::new(80.0, 64.0, 400.0, 240.0),
            "demo",
        )
    }

    #[test]
    fn maximize_and_restore_round_trip() {
        let mut host = host();
        let sink = EventSink::new();
        host.subscribe(sink.clone());
        host.request_maximize();
        assert_eq!(host.window(), host.screen());
        host.request_restore();
        assert_eq!(host.window(), RectF::new(80.0, 64.0, 400.0, 240.0));
        assert_eq!(
            sink.drain(),
            vec![
                HostEvent::StateChanged { maximized: true },
                HostEvent::StateChanged { maximized: false },
            ]
        );
    }

    #[test]
    fn move_session_follows_pointer() {
        let mut host = host();
        host.begin_interactive_move(Point::new(100.0, 72.0)).unwrap();
        assert!(host.follow_pointer(Point::new(140.0, 104.0)));
        assert_eq!(host.window().origin(), Point::new(120.0, 96.0));
        assert!(host.end_session());
        assert!(!host.follow_pointer(Point::new(0.0, 0.0)));
    }

    #[test]
    fn move_keeps_bar_on_screen() {
        let mut host = host();
        host.begin_interactive_move(Point::new(100.0, 72.0)).unwrap();
        host.follow_pointer(Point::new(100.0, -200.0));
        assert_eq!(host.window().y, 0.0);
    }

    #[test]
    fn resize_respects_minimum() {
        let mut host = host();
        host.begin_interactive_resize(Point::new(479.0, 200.0), ResizeEdge::Right)
            .unwrap();
        host.follow_pointer(Point::new(100.0, 200.0));
        assert_eq!(host.window().width, 200.0);
        assert_eq!(host.window().x, 80.0);
    }

    #[test]
    fn maximized_window_declines_sessions() {
        let mut host = host();
        host.request_maximize();
        assert!(host.begin_interactive_move(Point::default()).is_err());
        assert!(!host.is_dragging());
    }
}
