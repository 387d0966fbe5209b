use crate::color::Rgba;
use crate::constants::{
    BUTTON_HEIGHT, BUTTON_WIDTH, RESIZE_BORDER, TITLE_BAR_HEIGHT, TITLE_FONT_SIZE,
};
use crate::drag::{DragTrigger, PlatformPolicy};
use crate::geometry::Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleBarStyle {
    /// Button cluster only.
    Plain,
    /// Window icon and title on the left, buttons on the right.
    #[default]
    Standard,
}

/// Construction-time settings of a title bar.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleBarConfig {
    pub height: f32,
    pub button_size: Size,
    pub style: TitleBarStyle,
    pub double_click_enabled: bool,
    pub policy: PlatformPolicy,
    pub title_font_size: f32,
    pub background: Rgba,
    pub resize_border: f32,
}

impl Default for TitleBarConfig {
    fn default() -> Self {
        Self {
            height: TITLE_BAR_HEIGHT,
            button_size: Size::new(BUTTON_WIDTH, BUTTON_HEIGHT),
            style: TitleBarStyle::default(),
            double_click_enabled: true,
            policy: PlatformPolicy::native(),
            title_font_size: TITLE_FONT_SIZE,
            background: Rgba::TRANSPARENT,
            resize_border: RESIZE_BORDER,
        }
    }
}

impl TitleBarConfig {
    pub fn plain() -> Self {
        Self::default().with_style(TitleBarStyle::Plain)
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn with_button_size(mut self, size: Size) -> Self {
        self.button_size = size;
        self
    }

    pub fn with_style(mut self, style: TitleBarStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_double_click(mut self, enabled: bool) -> Self {
        self.double_click_enabled = enabled;
        self
    }

    pub fn with_policy(mut self, policy: PlatformPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_drag_trigger(mut self, trigger: DragTrigger) -> Self {
        self.policy = self.policy.with_drag_trigger(trigger);
        self
    }

    pub fn with_release_pointer_after_toggle(mut self, enabled: bool) -> Self {
        self.policy = self.policy.with_release_pointer_after_toggle(enabled);
        self
    }

    pub fn with_title_font_size(mut self, size: f32) -> Self {
        self.title_font_size = size;
        self
    }

    pub fn with_background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    pub fn with_resize_border(mut self, border: f32) -> Self {
        self.resize_border = border;
        self
    }
}
