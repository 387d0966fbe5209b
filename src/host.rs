//! Contract with the host window that actually owns the native surface.
//!
//! The title bar never looks the window up on its own: the host is handed to
//! the controller at construction. Host-originated changes (maximized through
//! an OS shortcut, title edits, icon changes) travel the other way through an
//! `EventSink` the controller registers once and drains on its own schedule.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::canvas::IconImage;
use crate::error::HostError;
use crate::geometry::Point;
use crate::resize::ResizeEdge;

#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    StateChanged { maximized: bool },
    TitleChanged(String),
    IconChanged(Option<IconImage>),
}

/// Single-threaded event queue shared between a host and one subscriber.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    queue: Rc<RefCell<VecDeque<HostEvent>>>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, event: HostEvent) {
        self.queue.borrow_mut().push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn drain(&self) -> Vec<HostEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Subscriber bookkeeping that host implementations can embed.
#[derive(Debug, Default)]
pub struct Subscribers {
    next: u64,
    sinks: Vec<(SubscriptionId, EventSink)>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, sink: EventSink) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.sinks.push((id, sink));
        tracing::trace!(subscription = ?id, "host subscriber added");
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.sinks.retain(|(sub, _)| *sub != id);
        tracing::trace!(subscription = ?id, "host subscriber removed");
    }

    pub fn publish(&self, event: HostEvent) {
        for (_, sink) in &self.sinks {
            sink.publish(event.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

/// Capabilities the title bar consumes from the host window.
///
/// Window commands are fire-and-forget. Interactive move/resize may be
/// declined; callers treat that as best-effort and move on.
pub trait HostWindow {
    fn request_minimize(&mut self);
    fn request_maximize(&mut self);
    fn request_restore(&mut self);
    fn request_close(&mut self);
    fn is_maximized(&self) -> bool;

    fn subscribe(&mut self, sink: EventSink) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId);

    fn begin_interactive_move(&mut self, screen_pos: Point) -> Result<(), HostError>;

    /// Hosts without native frame resizing keep the default.
    fn begin_interactive_resize(
        &mut self,
        _screen_pos: Point,
        _edge: ResizeEdge,
    ) -> Result<(), HostError> {
        Err(HostError::Unsupported)
    }

    /// Synthesize a primary-button release. Only hosts whose toolkit leaves
    /// the button logically held after a maximize toggle need this.
    fn release_pointer_button(&mut self) {}

    fn title(&self) -> Option<String> {
        None
    }

    fn icon(&self) -> Option<IconImage> {
        None
    }
}

impl<T: HostWindow + ?Sized> HostWindow for &mut T {
    fn request_minimize(&mut self) {
        (**self).request_minimize()
    }

    fn request_maximize(&mut self) {
        (**self).request_maximize()
    }

    fn request_restore(&mut self) {
        (**self).request_restore()
    }

    fn request_close(&mut self) {
        (**self).request_close()
    }

    fn is_maximized(&self) -> bool {
        (**self).is_maximized()
    }

    fn subscribe(&mut self, sink: EventSink) -> SubscriptionId {
        (**self).subscribe(sink)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        (**self).unsubscribe(id)
    }

    fn begin_interactive_move(&mut self, screen_pos: Point) -> Result<(), HostError> {
        (**self).begin_interactive_move(screen_pos)
    }

    fn begin_interactive_resize(
        &mut self,
        screen_pos: Point,
        edge: ResizeEdge,
    ) -> Result<(), HostError> {
        (**self).begin_interactive_resize(screen_pos, edge)
    }

    fn release_pointer_button(&mut self) {
        (**self).release_pointer_button()
    }

    fn title(&self) -> Option<String> {
        (**self).title()
    }

    fn icon(&self) -> Option<IconImage> {
        (**self).icon()
    }
}

/// Everything a `RecordingHost` was asked to do, in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostRequest {
    Minimize,
    Maximize,
    Restore,
    Close,
    Move(Point),
    Resize(Point, ResizeEdge),
    ReleasePointer,
}

/// In-memory host for tests and headless embedding.
///
/// Maximize/restore requests flip the state and notify subscribers right
/// away unless `set_sync_state(false)` was called, which models a window
/// manager that ignores the request.
#[derive(Debug)]
pub struct RecordingHost {
    maximized: bool,
    sync_state: bool,
    refuse_drag: bool,
    title: Option<String>,
    requests: Vec<HostRequest>,
    subscribers: Subscribers,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            maximized: false,
            sync_state: true,
            refuse_drag: false,
            title: None,
            requests: Vec::new(),
            subscribers: Subscribers::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_sync_state(&mut self, enabled: bool) {
        self.sync_state = enabled;
    }

    pub fn set_refuse_drag(&mut self, refuse: bool) {
        self.refuse_drag = refuse;
    }

    pub fn requests(&self) -> &[HostRequest] {
        &self.requests
    }

    pub fn take_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.requests)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Simulate a maximize/restore that happened outside the title bar.
    pub fn set_maximized_externally(&mut self, maximized: bool) {
        self.maximized = maximized;
        self.subscribers
            .publish(HostEvent::StateChanged { maximized });
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        self.title = Some(title.clone());
        self.subscribers.publish(HostEvent::TitleChanged(title));
    }

    pub fn set_icon(&mut self, icon: Option<IconImage>) {
        self.subscribers.publish(HostEvent::IconChanged(icon));
    }

    fn apply_state(&mut self, maximized: bool) {
        if self.sync_state && self.maximized != maximized {
            self.set_maximized_externally(maximized);
        }
    }
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostWindow for RecordingHost {
    fn request_minimize(&mut self) {
        self.requests.push(HostRequest::Minimize);
    }

    fn request_maximize(&mut self) {
        self.requests.push(HostRequest::Maximize);
        self.apply_state(true);
    }

    fn request_restore(&mut self) {
        self.requests.push(HostRequest::Restore);
        self.apply_state(false);
    }

    fn request_close(&mut self) {
        self.requests.push(HostRequest::Close);
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
        self.requests.push(HostRequest::Move(screen_pos));
        if self.refuse_drag {
            return Err(HostError::Declined("drag refused"));
        }
        Ok(())
    }

    fn begin_interactive_resize(
        &mut self,
        screen_pos: Point,
        edge: ResizeEdge,
    ) -> Result<(), HostError> {
        self.requests.push(HostRequest::Resize(screen_pos, edge));
        if self.refuse_drag {
            return Err(HostError::Declined("resize refused"));
        }
        Ok(())
    }

    fn release_pointer_button(&mut self) {
        self.requests.push(HostRequest::ReleasePointer);
    }

    fn title(&self) -> Option<String> {
        self.title.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_fan_out_and_unsubscribe() {
        let mut subs = Subscribers::new();
        let a = EventSink::new();
        let b = EventSink::new();
        let id_a = subs.subscribe(a.clone());
        subs.subscribe(b.clone());
        subs.publish(HostEvent::StateChanged { maximized: true });
        assert_eq!(a.pending(), 1);
        assert_eq!(b.pending(), 1);
        subs.unsubscribe(id_a);
        subs.publish(HostEvent::TitleChanged("x".into()));
        assert_eq!(a.drain().len(), 1);
        assert_eq!(b.drain().len(), 2);
        assert_eq!(b.pending(), 0);
    }

    struct MoveOnlyHost {
        subscribers: Subscribers,
    }

    impl HostWindow for MoveOnlyHost {
        fn request_minimize(&mut self) {}
        fn request_maximize(&mut self) {}
        fn request_restore(&mut self) {}
        fn request_close(&mut self) {}

        fn is_maximized(&self) -> bool {
            false
        }

        fn subscribe(&mut self, sink: EventSink) -> SubscriptionId {
            self.subscribers.subscribe(sink)
        }

        fn unsubscribe(&mut self, id: SubscriptionId) {
            self.subscribers.unsubscribe(id);
        }

        fn begin_interactive_move(&mut self, _screen_pos: Point) -> Result<(), HostError> {
            Ok(())
        }
    }

    #[test]
    fn resize_defaults_to_unsupported() {
        let mut host = MoveOnlyHost {
            subscribers: Subscribers::new(),
        };
        assert_eq!(
            host.begin_interactive_resize(Point::default(), ResizeEdge::Right),
            Err(HostError::Unsupported)
        );
        assert!(host.begin_interactive_move(Point::default()).is_ok());
    }

    #[test]
    fn recording_host_without_sync_keeps_state() {
        let mut host = RecordingHost::new();
        host.set_sync_state(false);
        let sink = EventSink::new();
        host.subscribe(sink.clone());
        host.request_maximize();
        assert!(!host.is_maximized());
        assert_eq!(sink.pending(), 0);
        assert_eq!(host.requests(), &[HostRequest::Maximize]);
    }
}
