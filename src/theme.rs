use crate::color::Rgba;
use crate::state::{ColorPair, StatePalette};

// Centralized chrome colors. Controls copy these at construction so every
// instance can be recolored independently afterwards.

pub const GLYPH_RGB: (u8, u8, u8) = (0, 0, 0);
pub const CLOSE_HOVER_RGB: (u8, u8, u8) = (232, 17, 35);
pub const CLOSE_PRESSED_RGB: (u8, u8, u8) = (241, 112, 122);

/// Translucent black overlays, darker for each step of interaction.
pub const NORMAL_BG: Rgba = Rgba::new(0, 0, 0, 0);
pub const HOVER_BG: Rgba = Rgba::new(0, 0, 0, 26);
pub const PRESSED_BG: Rgba = Rgba::new(0, 0, 0, 51);

const fn from_rgb(rgb: (u8, u8, u8)) -> Rgba {
    Rgba::rgb(rgb.0, rgb.1, rgb.2)
}

pub const STANDARD_PALETTE: StatePalette = StatePalette::new(
    ColorPair::new(from_rgb(GLYPH_RGB), NORMAL_BG),
    ColorPair::new(from_rgb(GLYPH_RGB), HOVER_BG),
    ColorPair::new(from_rgb(GLYPH_RGB), PRESSED_BG),
);

pub const CLOSE_PALETTE: StatePalette = StatePalette::new(
    ColorPair::new(from_rgb(GLYPH_RGB), NORMAL_BG),
    ColorPair::new(Rgba::WHITE, from_rgb(CLOSE_HOVER_RGB)),
    ColorPair::new(Rgba::WHITE, from_rgb(CLOSE_PRESSED_RGB)),
);

// Signal strength item
pub fn signal_background() -> Rgba {
    HOVER_BG
}
pub fn signal_empty_bar() -> Rgba {
    HOVER_BG
}
pub fn signal_filled_bar() -> Rgba {
    Rgba::WHITE
}

// Title text in the standard bar
pub fn title_fg() -> Rgba {
    from_rgb(GLYPH_RGB)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ButtonVisualState;

    #[test]
    fn close_palette_signals_destructive_action() {
        let hovered = CLOSE_PALETTE.pair(ButtonVisualState::Hovered);
        assert_eq!(hovered.foreground, Rgba::WHITE);
        assert_eq!(hovered.background, Rgba::rgb(232, 17, 35));
        let normal = CLOSE_PALETTE.pair(ButtonVisualState::Normal);
        assert_eq!(normal, STANDARD_PALETTE.pair(ButtonVisualState::Normal));
    }
}
