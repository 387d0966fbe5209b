//! Top-level orchestration of the title bar.
//!
//! `TitleBarController` routes pointer events to controls and the drag
//! controller, turns clicks into host requests, and keeps the maximize glyph
//! in step with the host window through the host event bus.

use crate::canvas::{Canvas, DrawCommand, IconImage, TextAlign, replay};
use crate::config::{TitleBarConfig, TitleBarStyle};
use crate::constants::{ICON_LEFT_MARGIN, ICON_SIZE, TITLE_PADDING};
use crate::controls::{Control, ControlId, SystemButton};
use crate::drag::DragController;
use crate::error::{Result, TitleBarError};
use crate::geometry::{Point, RectF, Size};
use crate::host::{EventSink, HostEvent, HostWindow, SubscriptionId};
use crate::input::{PointerButton, PointerEvent, PointerKind};
use crate::registry::ControlRegistry;
use crate::resize::edge_at;
use crate::theme;

pub struct TitleBarController<H: HostWindow> {
    host: H,
    config: TitleBarConfig,
    controls: ControlRegistry,
    drag: DragController,
    sink: EventSink,
    subscription: SubscriptionId,
    width: f32,
    hovered: Option<ControlId>,
    pressed: Option<ControlId>,
    title: String,
    icon: Option<IconImage>,
    item_clicks: Vec<String>,
    chrome_dirty: bool,
}

impl<H: HostWindow> TitleBarController<H> {
    /// Attach a title bar to `host`. The controller subscribes to host events
    /// here and unsubscribes when dropped.
    pub fn new(mut host: H, config: TitleBarConfig) -> Self {
        let sink = EventSink::new();
        let subscription = host.subscribe(sink.clone());
        tracing::trace!(?subscription, "title bar subscribed to host");

        let mut controls = ControlRegistry::new();
        for control in controls.iter_mut() {
            control.set_size(config.button_size);
        }
        controls
            .system_mut(SystemButton::Maximize)
            .set_max_state(host.is_maximized());

        let title = host.title().unwrap_or_default();
        let icon = host.icon();
        Self {
            drag: DragController::new(config.policy.drag_trigger),
            host,
            config,
            controls,
            sink,
            subscription,
            width: 0.0,
            hovered: None,
            pressed: None,
            title,
            icon,
            item_clicks: Vec::new(),
            chrome_dirty: true,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access. Events the host publishes meanwhile are applied
    /// on the next `pump_host_events` or pointer event.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &TitleBarConfig {
        &self.config
    }

    pub fn controls(&self) -> &ControlRegistry {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut ControlRegistry {
        &mut self.controls
    }

    pub fn system(&self, button: SystemButton) -> &Control {
        self.controls.system(button)
    }

    pub fn system_mut(&mut self, button: SystemButton) -> &mut Control {
        self.controls.system_mut(button)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn set_width(&mut self, width: f32) {
        let width = width.max(0.0);
        if self.width != width {
            self.width = width;
            self.chrome_dirty = true;
        }
    }

    pub fn bar_size(&self) -> Size {
        Size::new(self.width, self.config.height)
    }

    pub fn is_double_click_enabled(&self) -> bool {
        self.config.double_click_enabled
    }

    pub fn set_double_click_enabled(&mut self, enabled: bool) {
        self.config.double_click_enabled = enabled;
    }

    pub fn is_maximized(&self) -> bool {
        self.controls
            .system(SystemButton::Maximize)
            .is_maximized()
            .unwrap_or(false)
    }

    /// Add a tool item sized like the system buttons. An existing key is
    /// returned untouched, including any size set on it since.
    pub fn add_item(&mut self, key: &str, text: Option<&str>) -> &mut Control {
        let fresh = !self.controls.contains(key);
        let size = self.config.button_size;
        let control = self.controls.add_item(key, text);
        if fresh {
            control.set_size(size);
        }
        control
    }

    pub fn add_signal_item(&mut self, key: &str) -> &mut Control {
        let fresh = !self.controls.contains(key);
        let size = self.config.button_size;
        let control = self.controls.add_signal_item(key);
        if fresh {
            control.set_size(size);
        }
        control
    }

    pub fn widget(&self, key: &str) -> Result<&Control> {
        self.controls.widget(key)
    }

    pub fn widget_mut(&mut self, key: &str) -> Result<&mut Control> {
        self.controls.widget_mut(key)
    }

    fn signal_mut(&mut self, key: &str) -> Result<&mut Control> {
        let control = self.controls.widget_mut(key)?;
        if !control.is_signal() {
            return Err(TitleBarError::NotSignalItem(key.to_string()));
        }
        Ok(control)
    }

    pub fn set_ping(&mut self, key: &str, ping: u32) -> Result<()> {
        self.signal_mut(key)?.set_ping(ping);
        Ok(())
    }

    pub fn set_signal_colored(&mut self, key: &str, colored: bool) -> Result<()> {
        self.signal_mut(key)?.set_colored(colored);
        Ok(())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Display-only mirror of the host window title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.chrome_dirty = true;
    }

    pub fn icon(&self) -> Option<&IconImage> {
        self.icon.as_ref()
    }

    /// Display-only mirror of the host window icon.
    pub fn set_icon(&mut self, icon: Option<IconImage>) {
        self.icon = icon;
        self.chrome_dirty = true;
    }

    /// Drain host notifications and apply them. Returns how many were handled.
    pub fn pump_host_events(&mut self) -> usize {
        let events = self.sink.drain();
        let handled = events.len();
        for event in events {
            match event {
                HostEvent::StateChanged { maximized } => self.sync_max_state(maximized),
                HostEvent::TitleChanged(title) => self.set_title(title),
                HostEvent::IconChanged(icon) => self.set_icon(icon),
            }
        }
        handled
    }

    /// Mirror the host's maximize state onto the glyph without issuing a
    /// request back to the host.
    fn sync_max_state(&mut self, maximized: bool) {
        let changed = self
            .controls
            .system_mut(SystemButton::Maximize)
            .set_max_state(maximized);
        if changed {
            tracing::debug!(maximized, "maximize state synced from host");
        }
    }

    pub fn can_drag(&self, pos: Point) -> bool {
        self.drag.can_drag(pos, self.width, &self.controls)
    }

    fn hit_test(&self, pos: Point) -> Option<usize> {
        self.controls.index_at(self.bar_size(), pos)
    }

    /// Feed one pointer event scoped to the bar. Returns whether the title
    /// bar consumed it.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        self.pump_host_events();
        let consumed = match event.kind {
            PointerKind::Move => self.on_pointer_move(&event),
            PointerKind::Press(button) => self.on_pointer_press(&event, button),
            PointerKind::Release(button) => self.on_pointer_release(&event, button),
            PointerKind::DoubleClick(button) => self.on_double_click(&event, button),
            PointerKind::Leave => self.on_pointer_leave(),
        };
        self.pump_host_events();
        consumed
    }

    fn update_hover(&mut self, hit: Option<usize>) {
        let hit_id = hit.and_then(|idx| self.controls.get(idx)).map(Control::id);
        if hit_id == self.hovered {
            return;
        }
        if let Some(old) = self.hovered.take() {
            if let Some(control) = self
                .controls
                .index_of(&old)
                .and_then(|idx| self.controls.get_mut(idx))
            {
                control.on_leave();
            }
            if self.pressed.as_ref() == Some(&old) {
                self.pressed = None;
            }
            tracing::trace!(control = ?old, "pointer left control");
        }
        if let Some(id) = hit_id {
            if let Some(control) = hit.and_then(|idx| self.controls.get_mut(idx)) {
                control.on_enter();
            }
            tracing::trace!(control = ?id, "pointer entered control");
            self.hovered = Some(id);
        }
    }

    fn on_pointer_move(&mut self, event: &PointerEvent) -> bool {
        let hit = self.hit_test(event.position);
        self.update_hover(hit);
        let dragged = self
            .drag
            .on_move(event, self.width, &self.controls, &mut self.host);
        dragged || hit.is_some()
    }

    fn on_pointer_press(&mut self, event: &PointerEvent, button: PointerButton) -> bool {
        let hit = self.hit_test(event.position);
        self.update_hover(hit);
        if let Some(idx) = hit {
            let Some(control) = self.controls.get_mut(idx) else {
                return false;
            };
            let consumed = control.on_press(button);
            if consumed {
                self.pressed = Some(control.id());
            }
            return consumed;
        }
        self.drag
            .on_press(event, self.width, &self.controls, &mut self.host)
    }

    fn on_pointer_release(&mut self, event: &PointerEvent, button: PointerButton) -> bool {
        if button == PointerButton::Primary {
            self.drag.on_release();
        }
        let hit = self.hit_test(event.position);
        if button != PointerButton::Primary || self.pressed.is_none() {
            self.update_hover(hit);
            return false;
        }
        let Some(id) = self.pressed.take() else {
            return false;
        };
        let Some(idx) = self.controls.index_of(&id) else {
            return false;
        };
        let inside = hit == Some(idx);
        let clicked = self
            .controls
            .get_mut(idx)
            .is_some_and(|control| control.on_release(button, inside));
        self.update_hover(hit);
        if clicked {
            self.dispatch_click(id);
        }
        true
    }

    fn on_double_click(&mut self, event: &PointerEvent, button: PointerButton) -> bool {
        // Over a control the second click is just another press.
        if self.hit_test(event.position).is_some() {
            return self.on_pointer_press(event, button);
        }
        if button != PointerButton::Primary || !self.config.double_click_enabled {
            return false;
        }
        self.toggle_max_state()
    }

    fn on_pointer_leave(&mut self) -> bool {
        let had_hover = self.hovered.is_some();
        self.update_hover(None);
        self.drag.on_release();
        had_hover
    }

    fn dispatch_click(&mut self, id: ControlId) {
        match id {
            ControlId::System(SystemButton::Minimize) => {
                tracing::debug!("minimize requested");
                self.host.request_minimize();
            }
            ControlId::System(SystemButton::Maximize) => {
                self.toggle_max_state();
            }
            ControlId::System(SystemButton::Close) => {
                tracing::debug!("close requested");
                self.host.request_close();
            }
            ControlId::Item(key) => {
                tracing::debug!(key, "title bar item clicked");
                self.item_clicks.push(key);
            }
        }
        self.pump_host_events();
    }

    /// Ask the host to maximize or restore, whichever flips its current
    /// state. Does nothing while the maximize button is hidden. Returns
    /// whether a request was issued.
    pub fn toggle_max_state(&mut self) -> bool {
        if self.controls.system(SystemButton::Maximize).is_hidden() {
            return false;
        }
        if self.host.is_maximized() {
            tracing::debug!("restore requested");
            self.host.request_restore();
        } else {
            tracing::debug!("maximize requested");
            self.host.request_maximize();
        }
        if self.config.policy.release_pointer_after_toggle {
            self.host.release_pointer_button();
        }
        self.pump_host_events();
        true
    }

    /// Start a native resize when a primary press lands in the frame border
    /// of a window of `window` size. Maximized windows cannot be resized.
    pub fn handle_frame_press(&mut self, pos: Point, window: Size, screen_pos: Point) -> bool {
        if self.host.is_maximized() {
            return false;
        }
        let Some(edge) = edge_at(pos, window, self.config.resize_border) else {
            return false;
        };
        tracing::debug!(?edge, "starting interactive resize");
        if let Err(err) = self.host.begin_interactive_resize(screen_pos, edge) {
            tracing::debug!(%err, "interactive resize not started");
        }
        self.pump_host_events();
        true
    }

    /// Keys of tool items clicked since the last call, oldest first.
    pub fn take_item_clicks(&mut self) -> Vec<String> {
        std::mem::take(&mut self.item_clicks)
    }

    /// Whether anything visible changed since the last call.
    pub fn take_redraw(&mut self) -> bool {
        let chrome = std::mem::take(&mut self.chrome_dirty);
        self.controls.take_redraw() | chrome
    }

    fn title_rect(&self) -> RectF {
        let x = ICON_LEFT_MARGIN + ICON_SIZE + TITLE_PADDING;
        let right = self.width - self.controls.visible_width() - TITLE_PADDING;
        RectF::new(x, 0.0, (right - x).max(0.0), self.config.height)
    }

    pub fn render_commands(&self, dpr: f32) -> Vec<DrawCommand> {
        let bar = self.bar_size();
        let mut commands = Vec::new();
        if !self.config.background.is_transparent() {
            commands.push(DrawCommand::FillRect {
                rect: RectF::from_origin_size(Point::default(), bar),
                color: self.config.background,
            });
        }
        if self.config.style == TitleBarStyle::Standard {
            if let Some(icon) = &self.icon {
                let y = ((bar.height - ICON_SIZE) / 2.0).max(0.0);
                commands.push(DrawCommand::Image {
                    rect: RectF::new(ICON_LEFT_MARGIN, y, ICON_SIZE, ICON_SIZE),
                    image: icon.clone(),
                });
            }
            let rect = self.title_rect();
            if !self.title.is_empty() && !rect.is_empty() {
                commands.push(DrawCommand::Text {
                    rect,
                    text: self.title.clone(),
                    color: theme::title_fg(),
                    size: self.config.title_font_size,
                    align: TextAlign::Left,
                });
            }
        }
        for (idx, rect) in self.controls.layout(bar) {
            if let Some(control) = self.controls.get(idx) {
                commands.extend(control.render_commands(rect, dpr));
            }
        }
        commands
    }

    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let commands = self.render_commands(canvas.device_pixel_ratio());
        replay(canvas, &commands);
    }
}

impl<H: HostWindow> Drop for TitleBarController<H> {
    fn drop(&mut self) {
        self.host.unsubscribe(self.subscription);
        tracing::trace!(subscription = ?self.subscription, "title bar unsubscribed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostRequest, RecordingHost};
    use crate::state::ButtonVisualState;

    fn controller() -> TitleBarController<RecordingHost> {
        let config = TitleBarConfig::default().with_release_pointer_after_toggle(false);
        let mut bar = TitleBarController::new(RecordingHost::new().with_title("Demo"), config);
        bar.set_width(300.0);
        bar
    }

    fn at(kind: PointerKind, x: f32) -> PointerEvent {
        PointerEvent::local(kind, Point::new(x, 10.0))
    }

    const PRIMARY: PointerButton = PointerButton::Primary;

    #[test]
    fn initial_state_comes_from_host() {
        let mut host = RecordingHost::new().with_title("Editor");
        host.set_maximized_externally(true);
        let bar = TitleBarController::new(host, TitleBarConfig::default());
        assert!(bar.is_maximized());
        assert_eq!(bar.title(), "Editor");
        assert_eq!(bar.host().subscriber_count(), 1);
    }

    #[test]
    fn hover_follows_pointer_across_controls() {
        let mut bar = controller();
        // minimize occupies 162..208, maximize 208..254
        assert!(bar.handle_pointer(at(PointerKind::Move, 170.0)));
        assert_eq!(
            bar.system(SystemButton::Minimize).state(),
            ButtonVisualState::Hovered
        );
        bar.handle_pointer(at(PointerKind::Move, 220.0));
        assert_eq!(
            bar.system(SystemButton::Minimize).state(),
            ButtonVisualState::Normal
        );
        assert_eq!(
            bar.system(SystemButton::Maximize).state(),
            ButtonVisualState::Hovered
        );
        assert!(bar.handle_pointer(at(PointerKind::Leave, 0.0)));
        assert_eq!(
            bar.system(SystemButton::Maximize).state(),
            ButtonVisualState::Normal
        );
    }

    #[test]
    fn close_click_requests_close() {
        let mut bar = controller();
        bar.handle_pointer(at(PointerKind::Press(PRIMARY), 280.0));
        assert!(bar.system(SystemButton::Close).is_pressed());
        assert!(!bar.can_drag(Point::new(100.0, 10.0)));
        bar.handle_pointer(at(PointerKind::Release(PRIMARY), 280.0));
        assert_eq!(bar.host().requests(), &[HostRequest::Close]);
        assert_eq!(
            bar.system(SystemButton::Close).state(),
            ButtonVisualState::Hovered
        );
    }

    #[test]
    fn leaving_a_pressed_button_cancels_the_click() {
        let mut bar = controller();
        bar.handle_pointer(at(PointerKind::Press(PRIMARY), 170.0));
        bar.handle_pointer(at(PointerKind::Move, 100.0));
        assert!(!bar.system(SystemButton::Minimize).is_pressed());
        bar.handle_pointer(at(PointerKind::Move, 170.0));
        bar.handle_pointer(at(PointerKind::Release(PRIMARY), 170.0));
        assert!(bar.host().requests().is_empty());
    }

    #[test]
    fn maximize_click_flips_glyph_through_host_notification() {
        let mut bar = controller();
        bar.handle_pointer(at(PointerKind::Press(PRIMARY), 220.0));
        bar.handle_pointer(at(PointerKind::Release(PRIMARY), 220.0));
        assert_eq!(bar.host().requests(), &[HostRequest::Maximize]);
        assert!(bar.is_maximized());

        bar.handle_pointer(at(PointerKind::Press(PRIMARY), 220.0));
        bar.handle_pointer(at(PointerKind::Release(PRIMARY), 220.0));
        assert_eq!(
            bar.host().requests(),
            &[HostRequest::Maximize, HostRequest::Restore]
        );
        assert!(!bar.is_maximized());
    }

    #[test]
    fn external_state_change_does_not_echo_a_request() {
        let mut bar = controller();
        bar.host_mut().set_maximized_externally(true);
        assert_eq!(bar.pump_host_events(), 1);
        assert!(bar.is_maximized());
        assert!(bar.host().requests().is_empty());
    }

    #[test]
    fn signal_operations_reject_other_items() {
        let mut bar = controller();
        bar.add_item("net", Some("Net"));
        bar.add_signal_item("wifi");
        assert_eq!(bar.set_ping("wifi", 60), Ok(()));
        assert_eq!(bar.widget("wifi").map(Control::ping), Ok(Some(60)));
        assert_eq!(
            bar.set_ping("net", 10),
            Err(TitleBarError::NotSignalItem("net".into()))
        );
        assert_eq!(
            bar.set_signal_colored("nope", true),
            Err(TitleBarError::KeyNotFound("nope".into()))
        );
    }

    #[test]
    fn frame_press_resizes_only_when_restored() {
        let mut bar = controller();
        let window = Size::new(400.0, 300.0);
        assert!(bar.handle_frame_press(Point::new(399.0, 150.0), window, Point::new(399.0, 150.0)));
        assert!(!bar.handle_frame_press(Point::new(200.0, 150.0), window, Point::default()));
        bar.host_mut().set_maximized_externally(true);
        assert!(!bar.handle_frame_press(Point::new(399.0, 150.0), window, Point::default()));
        assert_eq!(bar.host().requests().len(), 1);
    }

    #[test]
    fn standard_style_draws_title_before_buttons() {
        let bar = controller();
        let commands = bar.render_commands(1.0);
        assert!(matches!(
            &commands[0],
            DrawCommand::Text { text, rect, .. } if text == "Demo" && rect.x == 34.0
        ));
        let plain = TitleBarController::new(RecordingHost::new(), TitleBarConfig::plain());
        assert!(
            !plain
                .render_commands(1.0)
                .iter()
                .any(|c| matches!(c, DrawCommand::Text { .. }))
        );
    }

    #[test]
    fn drop_unsubscribes() {
        let mut host = RecordingHost::new();
        {
            let bar = TitleBarController::new(&mut host, TitleBarConfig::default());
            assert_eq!(bar.host().subscriber_count(), 1);
        }
        assert_eq!(host.subscriber_count(), 0);
    }
}
