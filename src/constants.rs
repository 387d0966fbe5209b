//! Shared crate-wide constants.
//!
//! Units are logical pixels unless noted otherwise.

/// Fixed height of the title bar strip.
pub const TITLE_BAR_HEIGHT: f32 = 32.0;

/// Width of every system button and default width of tool items.
pub const BUTTON_WIDTH: f32 = 46.0;

/// Height of every control; matches the bar so the cluster fills it.
pub const BUTTON_HEIGHT: f32 = 32.0;

/// Side length of the window icon drawn by the standard title bar.
pub const ICON_SIZE: f32 = 20.0;

/// Gap between the bar's left edge and the window icon.
pub const ICON_LEFT_MARGIN: f32 = 10.0;

/// Horizontal padding on each side of the title text.
pub const TITLE_PADDING: f32 = 4.0;

/// Default point size of the title text.
pub const TITLE_FONT_SIZE: f32 = 13.0;

/// Default point size for tool item labels.
pub const ITEM_FONT_SIZE: f32 = 12.0;

/// Thickness of the invisible frame band that starts a window resize.
pub const RESIZE_BORDER: f32 = 8.0;

/// Corner radius of the signal strength bars.
pub const SIGNAL_BAR_RADIUS: f32 = 2.0;

/// Latency (ms) at or below which a signal item shows all four bars.
pub const SIGNAL_FULL_PING: u32 = 25;
