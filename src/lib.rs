//! Title bar core for frameless windows.
//!
//! Draws the system buttons and custom tool items, hit-tests the draggable
//! strip, starts native move/resize through a host window handle, and keeps
//! the maximize glyph in sync with the window. The `terminal` module hosts
//! it inside a ratatui/crossterm terminal.

pub mod canvas;
pub mod color;
pub mod config;
pub mod constants;
pub mod controller;
pub mod controls;
pub mod drag;
pub mod error;
pub mod event_loop;
pub mod geometry;
pub mod host;
pub mod input;
pub mod registry;
pub mod resize;
pub mod state;
pub mod term_color;
pub mod terminal;
pub mod theme;
pub mod tracing_sub;

pub use canvas::{Canvas, DrawCommand, IconImage, RasterCanvas, RecordingCanvas, TextAlign};
pub use color::Rgba;
pub use config::{TitleBarConfig, TitleBarStyle};
pub use controller::TitleBarController;
pub use controls::{Control, ControlId, ControlKind, SystemButton};
pub use drag::{DragController, DragTrigger, PlatformPolicy};
pub use error::{GlyphError, HostError, TitleBarError};
pub use geometry::{Point, RectF, Size};
pub use host::{EventSink, HostEvent, HostRequest, HostWindow, RecordingHost, SubscriptionId};
pub use input::{PointerButton, PointerEvent, PointerKind};
pub use registry::ControlRegistry;
pub use resize::ResizeEdge;
pub use state::{ButtonVisualState, ColorPair, StatePalette};
