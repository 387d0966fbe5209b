//! Title bar controls: system buttons and application tool items.
//!
//! A `Control` owns its visual state and palette and is driven by the
//! controller through `on_enter` / `on_leave` / `on_press` / `on_release`.
//! Variants differ only in how they render (see `glyph`).

mod glyph;
pub mod signal;

use crate::canvas::{Canvas, DrawCommand, IconImage, replay};
use crate::color::Rgba;
use crate::constants::{BUTTON_HEIGHT, BUTTON_WIDTH};
use crate::geometry::{RectF, Size};
use crate::input::PointerButton;
use crate::state::{ButtonVisualState, StatePalette};

/// Fixed-role system buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemButton {
    Minimize,
    Maximize,
    Close,
}

/// Stable identity of a control within one title bar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ControlId {
    System(SystemButton),
    Item(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    Minimize,
    Maximize {
        maximized: bool,
    },
    Close,
    Tool {
        key: String,
        text: Option<String>,
        icon: Option<IconImage>,
    },
    Signal {
        key: String,
        ping: u32,
        colored: bool,
    },
}

#[derive(Debug, Clone)]
pub struct Control {
    kind: ControlKind,
    size: Size,
    state: ButtonVisualState,
    palette: StatePalette,
    hidden: bool,
    enabled: bool,
    dirty: bool,
}

impl Control {
    fn with_kind(kind: ControlKind, palette: StatePalette) -> Self {
        Self {
            kind,
            size: Size::new(BUTTON_WIDTH, BUTTON_HEIGHT),
            state: ButtonVisualState::Normal,
            palette,
            hidden: false,
            enabled: true,
            dirty: true,
        }
    }

    pub fn minimize() -> Self {
        Self::with_kind(ControlKind::Minimize, StatePalette::standard())
    }

    pub fn maximize() -> Self {
        Self::with_kind(
            ControlKind::Maximize { maximized: false },
            StatePalette::standard(),
        )
    }

    pub fn close() -> Self {
        Self::with_kind(ControlKind::Close, StatePalette::close())
    }

    pub fn tool(key: impl Into<String>, text: Option<String>) -> Self {
        Self::with_kind(
            ControlKind::Tool {
                key: key.into(),
                text,
                icon: None,
            },
            StatePalette::standard(),
        )
    }

    /// Signal strength item; bars are painted in the foreground color.
    pub fn signal(key: impl Into<String>) -> Self {
        let mut palette = StatePalette::standard();
        for state in [
            ButtonVisualState::Normal,
            ButtonVisualState::Hovered,
            ButtonVisualState::Pressed,
        ] {
            palette.set_foreground(state, crate::theme::signal_filled_bar());
        }
        Self::with_kind(
            ControlKind::Signal {
                key: key.into(),
                ping: crate::constants::SIGNAL_FULL_PING,
                colored: false,
            },
            palette,
        )
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn kind(&self) -> &ControlKind {
        &self.kind
    }

    pub fn id(&self) -> ControlId {
        match &self.kind {
            ControlKind::Minimize => ControlId::System(SystemButton::Minimize),
            ControlKind::Maximize { .. } => ControlId::System(SystemButton::Maximize),
            ControlKind::Close => ControlId::System(SystemButton::Close),
            ControlKind::Tool { key, .. } | ControlKind::Signal { key, .. } => {
                ControlId::Item(key.clone())
            }
        }
    }

    /// Key of a tool item; `None` for system buttons.
    pub fn key(&self) -> Option<&str> {
        match &self.kind {
            ControlKind::Tool { key, .. } | ControlKind::Signal { key, .. } => Some(key),
            _ => None,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        if self.size != size {
            self.size = size;
            self.dirty = true;
        }
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn state(&self) -> ButtonVisualState {
        self.state
    }

    /// Always requests a redraw, even when the state is unchanged.
    pub fn set_state(&mut self, state: ButtonVisualState) {
        self.state = state;
        self.dirty = true;
    }

    pub fn is_pressed(&self) -> bool {
        self.state == ButtonVisualState::Pressed
    }

    pub fn palette(&self) -> &StatePalette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: StatePalette) {
        self.palette = palette;
        self.dirty = true;
    }

    pub fn foreground(&self, state: ButtonVisualState) -> Rgba {
        self.palette.foreground(state)
    }

    pub fn background(&self, state: ButtonVisualState) -> Rgba {
        self.palette.background(state)
    }

    pub fn set_foreground(&mut self, state: ButtonVisualState, color: Rgba) {
        self.palette.set_foreground(state, color);
        self.dirty = true;
    }

    pub fn set_background(&mut self, state: ButtonVisualState, color: Rgba) {
        self.palette.set_background(state, color);
        self.dirty = true;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    /// Hiding keeps the control registered but removes it from hit-testing,
    /// the draggable-width computation and rendering. A hidden control can
    /// never stay pressed.
    pub fn set_hidden(&mut self, hidden: bool) {
        tracing::debug!(control = ?self.id(), hidden, "set hidden");
        self.hidden = hidden;
        if hidden {
            self.state = ButtonVisualState::Normal;
        }
        self.dirty = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabled controls ignore pointer input but keep their slot.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.state = ButtonVisualState::Normal;
        }
        self.dirty = true;
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            ControlKind::Tool { text, .. } => text.as_deref(),
            _ => None,
        }
    }

    /// Replace a tool item's label. No effect on other variants.
    pub fn set_text(&mut self, new_text: Option<String>) {
        if let ControlKind::Tool { text, .. } = &mut self.kind {
            *text = new_text;
            self.dirty = true;
        }
    }

    pub fn icon(&self) -> Option<&IconImage> {
        match &self.kind {
            ControlKind::Tool { icon, .. } => icon.as_ref(),
            _ => None,
        }
    }

    /// Replace a tool item's icon. No effect on other variants.
    pub fn set_icon(&mut self, new_icon: Option<IconImage>) {
        if let ControlKind::Tool { icon, .. } = &mut self.kind {
            *icon = new_icon;
            self.dirty = true;
        }
    }

    /// Maximize state of the maximize button; `None` for other variants.
    pub fn is_maximized(&self) -> Option<bool> {
        match self.kind {
            ControlKind::Maximize { maximized } => Some(maximized),
            _ => None,
        }
    }

    /// Sync the maximize glyph with the window. Repeating the current value
    /// is a no-op; a real change resets the visual state to `Normal`.
    pub fn set_max_state(&mut self, value: bool) -> bool {
        let ControlKind::Maximize { maximized } = &mut self.kind else {
            return false;
        };
        if *maximized == value {
            return false;
        }
        *maximized = value;
        self.set_state(ButtonVisualState::Normal);
        true
    }

    pub fn ping(&self) -> Option<u32> {
        match self.kind {
            ControlKind::Signal { ping, .. } => Some(ping),
            _ => None,
        }
    }

    pub(crate) fn is_signal(&self) -> bool {
        matches!(self.kind, ControlKind::Signal { .. })
    }

    pub(crate) fn set_ping(&mut self, value: u32) {
        if let ControlKind::Signal { ping, .. } = &mut self.kind {
            *ping = value;
            self.dirty = true;
        }
    }

    pub(crate) fn set_colored(&mut self, value: bool) {
        if let ControlKind::Signal { colored, .. } = &mut self.kind {
            *colored = value;
            self.dirty = true;
        }
    }

    pub fn on_enter(&mut self) {
        if !self.enabled || self.is_pressed() {
            return;
        }
        self.set_state(ButtonVisualState::Hovered);
    }

    pub fn on_leave(&mut self) {
        self.set_state(ButtonVisualState::Normal);
    }

    /// Returns whether the press was consumed. Only the primary button
    /// presses a control; anything else falls through untouched.
    pub fn on_press(&mut self, button: PointerButton) -> bool {
        if !self.enabled || button != PointerButton::Primary {
            return false;
        }
        self.set_state(ButtonVisualState::Pressed);
        true
    }

    /// Returns `true` when this release completes a click.
    pub fn on_release(&mut self, button: PointerButton, inside: bool) -> bool {
        if button != PointerButton::Primary || !self.is_pressed() {
            return false;
        }
        self.set_state(if inside {
            ButtonVisualState::Hovered
        } else {
            ButtonVisualState::Normal
        });
        inside && self.enabled
    }

    /// Drawing commands for this control placed at `rect`.
    pub fn render_commands(&self, rect: RectF, dpr: f32) -> Vec<DrawCommand> {
        glyph::render(&self.kind, self.state, &self.palette, rect, dpr)
    }

    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C, rect: RectF) {
        let commands = self.render_commands(rect, canvas.device_pixel_ratio());
        replay(canvas, &commands);
    }

    /// Report and clear the pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
