//! Deciding when a pointer gesture on the bar becomes a window move.
//!
//! Native window managers disagree on how an application starts an
//! interactive move. Win32 wants the request issued from a pointer move
//! while the button is held; X11, Wayland and macOS attach it to the press
//! itself. `DragTrigger` captures that difference once, at build time, so the
//! controller never branches on the platform.

use crate::geometry::Point;
use crate::host::HostWindow;
use crate::input::PointerEvent;
use crate::registry::ControlRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragTrigger {
    /// Start the move as soon as the primary button goes down.
    Press,
    /// Arm on press, start on the first pointer move while still held.
    Move,
}

impl DragTrigger {
    pub const fn native() -> Self {
        if cfg!(target_os = "windows") {
            DragTrigger::Move
        } else {
            DragTrigger::Press
        }
    }
}

/// Platform-dependent behavior of the title bar, chosen once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformPolicy {
    pub drag_trigger: DragTrigger,
    /// Workaround for toolkits that leave the primary button logically held
    /// after the double-click that toggled maximize.
    pub release_pointer_after_toggle: bool,
}

impl PlatformPolicy {
    pub const fn native() -> Self {
        Self {
            drag_trigger: DragTrigger::native(),
            release_pointer_after_toggle: cfg!(target_os = "windows"),
        }
    }

    pub const fn with_drag_trigger(mut self, trigger: DragTrigger) -> Self {
        self.drag_trigger = trigger;
        self
    }

    pub const fn with_release_pointer_after_toggle(mut self, enabled: bool) -> Self {
        self.release_pointer_after_toggle = enabled;
        self
    }
}

impl Default for PlatformPolicy {
    fn default() -> Self {
        Self::native()
    }
}

#[derive(Debug, Clone)]
pub struct DragController {
    trigger: DragTrigger,
    armed: bool,
}

impl DragController {
    pub fn new(trigger: DragTrigger) -> Self {
        Self {
            trigger,
            armed: false,
        }
    }

    pub fn trigger(&self) -> DragTrigger {
        self.trigger
    }

    pub fn set_trigger(&mut self, trigger: DragTrigger) {
        self.trigger = trigger;
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Strip test only: the button cluster is right-aligned, so everything
    /// strictly between the left edge and the cluster is draggable. Hidden
    /// controls reserve no width.
    pub fn is_drag_region(&self, pos: Point, bar_width: f32, controls: &ControlRegistry) -> bool {
        let reserved = controls.visible_width();
        0.0 < pos.x && pos.x < bar_width - reserved
    }

    /// A pressed control always wins over dragging, so a click that strays
    /// off its button is never reinterpreted as a move.
    pub fn can_drag(&self, pos: Point, bar_width: f32, controls: &ControlRegistry) -> bool {
        self.is_drag_region(pos, bar_width, controls) && !controls.any_pressed()
    }

    /// Handle a press that no control consumed. Returns whether the press
    /// landed in the drag region.
    pub fn on_press<H: HostWindow + ?Sized>(
        &mut self,
        event: &PointerEvent,
        bar_width: f32,
        controls: &ControlRegistry,
        host: &mut H,
    ) -> bool {
        self.armed = false;
        if !event.is_primary_press() || !self.can_drag(event.position, bar_width, controls) {
            return false;
        }
        match self.trigger {
            DragTrigger::Press => begin_move(host, event.screen_position),
            DragTrigger::Move => self.armed = true,
        }
        true
    }

    pub fn on_move<H: HostWindow + ?Sized>(
        &mut self,
        event: &PointerEvent,
        bar_width: f32,
        controls: &ControlRegistry,
        host: &mut H,
    ) -> bool {
        if self.trigger != DragTrigger::Move || !self.armed {
            return false;
        }
        if !self.can_drag(event.position, bar_width, controls) {
            return false;
        }
        // The host owns the session from here on, including its release.
        self.armed = false;
        begin_move(host, event.screen_position);
        true
    }

    pub fn on_release(&mut self) {
        self.armed = false;
    }
}

fn begin_move<H: HostWindow + ?Sized>(host: &mut H, screen_pos: Point) {
    tracing::debug!(x = screen_pos.x, y = screen_pos.y, "starting interactive move");
    if let Err(err) = host.begin_interactive_move(screen_pos) {
        tracing::debug!(%err, "interactive move not started");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::SystemButton;
    use crate::host::{HostRequest, RecordingHost};
    use crate::input::{PointerButton, PointerKind};

    fn press(x: f32) -> PointerEvent {
        PointerEvent::local(
            PointerKind::Press(PointerButton::Primary),
            Point::new(x, 10.0),
        )
    }

    fn moved(x: f32) -> PointerEvent {
        PointerEvent::local(PointerKind::Move, Point::new(x, 10.0))
    }

    #[test]
    fn drag_region_boundaries() {
        let reg = ControlRegistry::new();
        let drag = DragController::new(DragTrigger::Press);
        assert!(drag.can_drag(Point::new(100.0, 5.0), 300.0, &reg));
        assert!(!drag.can_drag(Point::new(250.0, 5.0), 300.0, &reg));
        assert!(!drag.can_drag(Point::new(0.0, 5.0), 300.0, &reg));
        assert!(!drag.can_drag(Point::new(162.0, 5.0), 300.0, &reg));
        assert!(drag.can_drag(Point::new(161.9, 5.0), 300.0, &reg));
    }

    #[test]
    fn hidden_controls_free_their_width() {
        let mut reg = ControlRegistry::new();
        let drag = DragController::new(DragTrigger::Press);
        reg.system_mut(SystemButton::Minimize).set_hidden(true);
        reg.system_mut(SystemButton::Maximize).set_hidden(true);
        assert!(drag.can_drag(Point::new(250.0, 5.0), 300.0, &reg));
        assert!(!drag.can_drag(Point::new(254.0, 5.0), 300.0, &reg));
    }

    #[test]
    fn pressed_control_suppresses_drag() {
        let mut reg = ControlRegistry::new();
        let drag = DragController::new(DragTrigger::Press);
        reg.system_mut(SystemButton::Close)
            .on_press(PointerButton::Primary);
        assert!(!drag.can_drag(Point::new(100.0, 5.0), 300.0, &reg));
    }

    #[test]
    fn press_trigger_starts_immediately() {
        let reg = ControlRegistry::new();
        let mut host = RecordingHost::new();
        let mut drag = DragController::new(DragTrigger::Press);
        assert!(drag.on_press(&press(50.0), 300.0, &reg, &mut host));
        assert_eq!(
            host.requests(),
            &[HostRequest::Move(Point::new(50.0, 10.0))]
        );
        assert!(!drag.on_move(&moved(60.0), 300.0, &reg, &mut host));
        assert_eq!(host.requests().len(), 1);
    }

    #[test]
    fn move_trigger_waits_for_motion() {
        let reg = ControlRegistry::new();
        let mut host = RecordingHost::new();
        let mut drag = DragController::new(DragTrigger::Move);
        assert!(drag.on_press(&press(50.0), 300.0, &reg, &mut host));
        assert!(host.requests().is_empty());
        assert!(drag.is_armed());
        assert!(drag.on_move(&moved(55.0), 300.0, &reg, &mut host));
        assert_eq!(
            host.requests(),
            &[HostRequest::Move(Point::new(55.0, 10.0))]
        );
        // one session per press
        assert!(!drag.on_move(&moved(60.0), 300.0, &reg, &mut host));
    }

    #[test]
    fn move_without_press_or_after_release_does_nothing() {
        let reg = ControlRegistry::new();
        let mut host = RecordingHost::new();
        let mut drag = DragController::new(DragTrigger::Move);
        assert!(!drag.on_move(&moved(55.0), 300.0, &reg, &mut host));
        drag.on_press(&press(50.0), 300.0, &reg, &mut host);
        drag.on_release();
        assert!(!drag.on_move(&moved(55.0), 300.0, &reg, &mut host));
        assert!(host.requests().is_empty());
    }

    #[test]
    fn refused_move_is_swallowed() {
        let reg = ControlRegistry::new();
        let mut host = RecordingHost::new();
        host.set_refuse_drag(true);
        let mut drag = DragController::new(DragTrigger::Press);
        assert!(drag.on_press(&press(50.0), 300.0, &reg, &mut host));
        assert_eq!(host.requests().len(), 1);
    }

    #[test]
    fn secondary_press_is_not_a_drag() {
        let reg = ControlRegistry::new();
        let mut host = RecordingHost::new();
        let mut drag = DragController::new(DragTrigger::Press);
        let event = PointerEvent::local(
            PointerKind::Press(PointerButton::Secondary),
            Point::new(50.0, 10.0),
        );
        assert!(!drag.on_press(&event, 300.0, &reg, &mut host));
        assert!(host.requests().is_empty());
    }
}
