use ratatui::style::Color;

use crate::color::Rgba;

/// Color depth a terminal can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    TrueColor,
    Indexed256,
}

impl ColorDepth {
    /// Truecolor when `COLORTERM` mentions `truecolor` or `24bit`, otherwise
    /// the xterm-256 palette.
    pub fn detect() -> Self {
        match std::env::var("COLORTERM") {
            Ok(var) => Self::from_colorterm(&var),
            Err(_) => ColorDepth::Indexed256,
        }
    }

    pub fn from_colorterm(value: &str) -> Self {
        let value = value.to_ascii_lowercase();
        if value.contains("truecolor") || value.contains("24bit") {
            ColorDepth::TrueColor
        } else {
            ColorDepth::Indexed256
        }
    }
}

/// Terminal color for an opaque `color`; alpha is ignored, callers
/// composite first.
pub fn to_terminal_color(color: Rgba, depth: ColorDepth) -> Color {
    match depth {
        ColorDepth::TrueColor => Color::Rgb(color.r, color.g, color.b),
        ColorDepth::Indexed256 => Color::Indexed(xterm_index(color.r, color.g, color.b)),
    }
}

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// Nearest entry among the 6x6x6 cube (16..=231) and the gray ramp
/// (232..=255).
fn xterm_index(r: u8, g: u8, b: u8) -> u8 {
    let (ri, gi, bi) = (cube_step(r), cube_step(g), cube_step(b));
    let cube = (
        CUBE_LEVELS[ri as usize],
        CUBE_LEVELS[gi as usize],
        CUBE_LEVELS[bi as usize],
    );
    let cube_idx = 16 + 36 * ri + 6 * gi + bi;

    let avg = (r as u16 + g as u16 + b as u16) / 3;
    let gray_step = ((avg.saturating_sub(8) + 5) / 10).min(23) as u8;
    let level = 8 + gray_step * 10;

    if distance((r, g, b), (level, level, level)) < distance((r, g, b), cube) {
        232 + gray_step
    } else {
        cube_idx
    }
}

fn cube_step(v: u8) -> u8 {
    CUBE_LEVELS
        .iter()
        .enumerate()
        .min_by_key(|(_, level)| (**level as i16 - v as i16).unsigned_abs())
        .map(|(i, _)| i as u8)
        .unwrap_or(0)
}

fn distance(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let d = |x: u8, y: u8| {
        let v = x as i32 - y as i32;
        (v * v) as u32
    };
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorterm_detection() {
        assert_eq!(ColorDepth::from_colorterm("truecolor"), ColorDepth::TrueColor);
        assert_eq!(ColorDepth::from_colorterm("24BIT"), ColorDepth::TrueColor);
        assert_eq!(ColorDepth::from_colorterm(""), ColorDepth::Indexed256);
    }

    #[test]
    fn exact_cube_colors_map_to_their_index() {
        assert_eq!(xterm_index(255, 0, 0), 196);
        assert_eq!(xterm_index(0, 0, 255), 21);
        assert_eq!(xterm_index(255, 255, 255), 231);
    }

    #[test]
    fn mid_grays_prefer_the_ramp() {
        let idx = xterm_index(128, 128, 128);
        assert!((232..=255).contains(&idx), "got {idx}");
    }

    #[test]
    fn truecolor_passes_channels_through() {
        let c = to_terminal_color(Rgba::rgb(232, 17, 35), ColorDepth::TrueColor);
        assert_eq!(c, Color::Rgb(232, 17, 35));
    }
}
