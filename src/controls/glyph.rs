//! Per-variant drawing. Every function here is pure: it maps the control's
//! data, visual state and geometry to a list of drawing commands.

use indoc::formatdoc;

use super::ControlKind;
use super::signal::{SIGNAL_BARS, bars_for_ping, latency_color};
use crate::canvas::{DrawCommand, TextAlign};
use crate::color::Rgba;
use crate::constants::{BUTTON_HEIGHT, BUTTON_WIDTH, ITEM_FONT_SIZE, SIGNAL_BAR_RADIUS};
use crate::geometry::{Point, RectF};
use crate::state::{ButtonVisualState, StatePalette};
use crate::theme;

/// Truncate a logical coordinate onto the device pixel grid.
fn snap(v: f32, dpr: f32) -> f32 {
    (v * dpr).floor() / dpr
}

/// Glyph coordinates are authored for a 46x32 button; larger or smaller
/// controls keep the glyph centered.
fn glyph_origin(rect: RectF) -> Point {
    Point::new(
        rect.x + ((rect.width - BUTTON_WIDTH) / 2.0).floor(),
        rect.y + ((rect.height - BUTTON_HEIGHT) / 2.0).floor(),
    )
}

pub(crate) fn render(
    kind: &ControlKind,
    state: ButtonVisualState,
    palette: &StatePalette,
    rect: RectF,
    dpr: f32,
) -> Vec<DrawCommand> {
    let dpr = if dpr > 0.0 { dpr } else { 1.0 };
    let fg = palette.foreground(state);
    let mut out = Vec::with_capacity(8);
    if let ControlKind::Signal { .. } = kind {
        out.push(DrawCommand::FillRect {
            rect,
            color: theme::signal_background(),
        });
    } else {
        out.push(DrawCommand::FillRect {
            rect,
            color: palette.background(state),
        });
    }
    match kind {
        ControlKind::Minimize => minimize(&mut out, rect, fg, dpr),
        ControlKind::Maximize { maximized } => maximize(&mut out, rect, fg, dpr, *maximized),
        ControlKind::Close => out.push(DrawCommand::Svg {
            rect,
            document: close_svg(fg),
        }),
        ControlKind::Tool { text, icon, .. } => {
            if let Some(text) = text.as_deref().filter(|t| !t.is_empty()) {
                out.push(DrawCommand::Text {
                    rect,
                    text: text.to_string(),
                    color: fg,
                    size: ITEM_FONT_SIZE,
                    align: TextAlign::Center,
                });
            }
            if let Some(icon) = icon {
                out.push(DrawCommand::Image {
                    rect,
                    image: icon.clone(),
                });
            }
        }
        ControlKind::Signal { ping, colored, .. } => {
            let fill = if *colored { latency_color(*ping) } else { fg };
            signal_bars(&mut out, rect, bars_for_ping(*ping), fill);
        }
    }
    out
}

fn minimize(out: &mut Vec<DrawCommand>, rect: RectF, color: Rgba, dpr: f32) {
    let o = glyph_origin(rect);
    out.push(DrawCommand::Line {
        from: o.offset(18.0, 16.0),
        to: o.offset(28.0, 16.0),
        color,
        width: 1.0 / dpr,
    });
}

fn maximize(out: &mut Vec<DrawCommand>, rect: RectF, color: Rgba, dpr: f32, maximized: bool) {
    let o = glyph_origin(rect);
    let s = |v: f32| snap(v, dpr);
    let width = 1.0 / dpr;
    if !maximized {
        out.push(DrawCommand::StrokeRect {
            rect: RectF::new(o.x + s(18.0), o.y + s(11.0), s(10.0), s(10.0)),
            color,
            width,
        });
        return;
    }
    out.push(DrawCommand::StrokeRect {
        rect: RectF::new(o.x + s(18.0), o.y + s(13.0), s(8.0), s(8.0)),
        color,
        width,
    });
    // Back window of the overlap glyph: only its top and right edges show.
    let x0 = s(18.0) + s(2.0);
    let y0 = 13.0;
    let dw = s(2.0);
    let points = [
        (x0, y0),
        (x0, y0 - dw),
        (x0 + 8.0, y0 - dw),
        (x0 + 8.0, y0 - dw + 8.0),
        (x0 + 8.0 - dw, y0 - dw + 8.0),
    ]
    .into_iter()
    .map(|(x, y)| o.offset(x, y))
    .collect();
    out.push(DrawCommand::Polyline {
        points,
        color,
        width,
    });
}

/// Close icon as a standalone SVG document with the stroke recolored.
pub(crate) fn close_svg(stroke: Rgba) -> String {
    formatdoc! {r##"
        <svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
          <path d="M18 11 L28 21 M28 11 L18 21" fill="none" stroke="#{r:02x}{g:02x}{b:02x}" stroke-opacity="{opacity:.3}" stroke-width="1"/>
        </svg>
        "##,
        w = BUTTON_WIDTH,
        h = BUTTON_HEIGHT,
        r = stroke.r,
        g = stroke.g,
        b = stroke.b,
        opacity = stroke.a as f32 / 255.0,
    }
}

fn signal_bars(out: &mut Vec<DrawCommand>, rect: RectF, filled: usize, fill: Rgba) {
    const WIDTH_PADDING: i32 = 14;
    const HEIGHT_PADDING: i32 = 10;
    let w = rect.width as i32;
    let h = rect.height as i32;
    let bar_w = (w - WIDTH_PADDING) / SIGNAL_BARS as i32;
    let bar_h = (h - HEIGHT_PADDING) / SIGNAL_BARS as i32;
    if bar_w <= 3 || bar_h <= 0 {
        return;
    }
    let bar = |i: i32| {
        RectF::new(
            rect.x + (WIDTH_PADDING / 2 + i * bar_w) as f32,
            rect.y + ((h - 5) - bar_h * (i + 1)) as f32,
            (bar_w - 3) as f32,
            (bar_h * (i + 1)) as f32,
        )
    };
    for i in 0..SIGNAL_BARS as i32 {
        out.push(DrawCommand::FillRoundedRect {
            rect: bar(i),
            radius: SIGNAL_BAR_RADIUS,
            color: theme::signal_empty_bar(),
        });
    }
    for i in 0..filled.min(SIGNAL_BARS) as i32 {
        out.push(DrawCommand::FillRoundedRect {
            rect: bar(i),
            radius: SIGNAL_BAR_RADIUS,
            color: fill,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUTTON: RectF = RectF::new(0.0, 0.0, BUTTON_WIDTH, BUTTON_HEIGHT);

    #[test]
    fn snap_truncates_to_device_grid() {
        assert_eq!(snap(11.0, 1.0), 11.0);
        assert_eq!(snap(11.0, 1.25), 13.0 / 1.25);
        assert_eq!(snap(2.0, 1.5), 3.0 / 1.5);
    }

    #[test]
    fn minimize_draws_a_single_line() {
        let cmds = render(
            &ControlKind::Minimize,
            ButtonVisualState::Normal,
            &StatePalette::standard(),
            BUTTON,
            1.0,
        );
        assert_eq!(cmds.len(), 2);
        assert_eq!(
            cmds[1],
            DrawCommand::Line {
                from: Point::new(18.0, 16.0),
                to: Point::new(28.0, 16.0),
                color: Rgba::BLACK,
                width: 1.0,
            }
        );
    }

    #[test]
    fn maximize_glyph_depends_on_state() {
        let palette = StatePalette::standard();
        let restored = render(
            &ControlKind::Maximize { maximized: false },
            ButtonVisualState::Normal,
            &palette,
            BUTTON,
            1.0,
        );
        assert_eq!(restored.len(), 2);
        assert!(matches!(
            restored[1],
            DrawCommand::StrokeRect { rect, .. } if rect == RectF::new(18.0, 11.0, 10.0, 10.0)
        ));

        let maxed = render(
            &ControlKind::Maximize { maximized: true },
            ButtonVisualState::Normal,
            &palette,
            BUTTON,
            1.0,
        );
        assert_eq!(maxed.len(), 3);
        let DrawCommand::Polyline { points, .. } = &maxed[2] else {
            panic!("expected overlap polyline, got {:?}", maxed[2]);
        };
        assert_eq!(points.first(), Some(&Point::new(20.0, 13.0)));
        assert_eq!(points.last(), Some(&Point::new(26.0, 19.0)));
    }

    #[test]
    fn close_svg_is_recolored_per_state() {
        let palette = StatePalette::close();
        let hovered = render(
            &ControlKind::Close,
            ButtonVisualState::Hovered,
            &palette,
            BUTTON,
            1.0,
        );
        let DrawCommand::Svg { document, .. } = &hovered[1] else {
            panic!("expected svg glyph");
        };
        assert!(document.contains(r##"stroke="#ffffff""##));
        assert_eq!(
            hovered[0],
            DrawCommand::FillRect {
                rect: BUTTON,
                color: Rgba::rgb(232, 17, 35)
            }
        );
        let normal = close_svg(palette.foreground(ButtonVisualState::Normal));
        assert!(normal.contains(r##"stroke="#000000""##));
    }

    #[test]
    fn signal_fills_bars_from_ping() {
        let kind = ControlKind::Signal {
            key: "net".into(),
            ping: 60,
            colored: false,
        };
        let cmds = render(
            &kind,
            ButtonVisualState::Pressed,
            &StatePalette::standard(),
            BUTTON,
            1.0,
        );
        // background + 4 empty + 2 filled
        assert_eq!(cmds.len(), 7);
        assert_eq!(
            cmds[1],
            DrawCommand::FillRoundedRect {
                rect: RectF::new(7.0, 22.0, 5.0, 5.0),
                radius: 2.0,
                color: theme::signal_empty_bar(),
            }
        );
        assert!(matches!(
            cmds[4],
            DrawCommand::FillRoundedRect { rect, .. } if rect == RectF::new(31.0, 7.0, 5.0, 20.0)
        ));
    }

    #[test]
    fn tool_item_draws_text_then_icon() {
        let icon = crate::canvas::IconImage::solid(2, Rgba::WHITE).expect("icon");
        let kind = ControlKind::Tool {
            key: "net".into(),
            text: Some("Net".into()),
            icon: Some(icon),
        };
        let cmds = render(
            &kind,
            ButtonVisualState::Normal,
            &StatePalette::standard(),
            BUTTON,
            2.0,
        );
        assert!(matches!(&cmds[1], DrawCommand::Text { text, .. } if text == "Net"));
        assert!(matches!(cmds[2], DrawCommand::Image { .. }));
    }
}
