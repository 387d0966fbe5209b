use crate::color::Rgba;

/// Appearance state of a title bar control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonVisualState {
    #[default]
    Normal,
    Hovered,
    Pressed,
}

/// Foreground (glyph/text) and background colors used for one visual state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub foreground: Rgba,
    pub background: Rgba,
}

impl ColorPair {
    pub const fn new(foreground: Rgba, background: Rgba) -> Self {
        Self {
            foreground,
            background,
        }
    }
}

/// One `ColorPair` per `ButtonVisualState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatePalette {
    normal: ColorPair,
    hovered: ColorPair,
    pressed: ColorPair,
}

impl StatePalette {
    pub const fn new(normal: ColorPair, hovered: ColorPair, pressed: ColorPair) -> Self {
        Self {
            normal,
            hovered,
            pressed,
        }
    }

    /// Palette shared by minimize, maximize and tool items.
    pub const fn standard() -> Self {
        crate::theme::STANDARD_PALETTE
    }

    /// White-on-red palette used by the close control.
    pub const fn close() -> Self {
        crate::theme::CLOSE_PALETTE
    }

    pub fn pair(&self, state: ButtonVisualState) -> ColorPair {
        match state {
            ButtonVisualState::Normal => self.normal,
            ButtonVisualState::Hovered => self.hovered,
            ButtonVisualState::Pressed => self.pressed,
        }
    }

    fn pair_mut(&mut self, state: ButtonVisualState) -> &mut ColorPair {
        match state {
            ButtonVisualState::Normal => &mut self.normal,
            ButtonVisualState::Hovered => &mut self.hovered,
            ButtonVisualState::Pressed => &mut self.pressed,
        }
    }

    pub fn foreground(&self, state: ButtonVisualState) -> Rgba {
        self.pair(state).foreground
    }

    pub fn background(&self, state: ButtonVisualState) -> Rgba {
        self.pair(state).background
    }

    pub fn set_foreground(&mut self, state: ButtonVisualState, color: Rgba) {
        self.pair_mut(state).foreground = color;
    }

    pub fn set_background(&mut self, state: ButtonVisualState, color: Rgba) {
        self.pair_mut(state).background = color;
    }
}

impl Default for StatePalette {
    fn default() -> Self {
        Self::standard()
    }
}
