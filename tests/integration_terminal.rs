use std::time::{Duration, Instant};

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use frameless_titlebar::term_color::ColorDepth;
use frameless_titlebar::terminal::{
    DEFAULT_CELL_SIZE, PointerTranslator, TerminalCanvas, TerminalHost, cells_for,
};
use frameless_titlebar::{
    DragTrigger, HostWindow, IconImage, RectF, Rgba, TitleBarConfig, TitleBarController,
};

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn demo_bar() -> TitleBarController<TerminalHost> {
    let host = TerminalHost::new(
        RectF::new(0.0, 0.0, 640.0, 320.0),
        RectF::new(80.0, 32.0, 320.0, 160.0),
        "demo",
    );
    let config = TitleBarConfig::default()
        .with_drag_trigger(DragTrigger::Press)
        .with_release_pointer_after_toggle(false);
    let mut bar = TitleBarController::new(host, config);
    bar.set_width(320.0);
    bar
}

fn bar_rect(bar: &TitleBarController<TerminalHost>) -> RectF {
    let window = bar.host().window();
    RectF::new(window.x, window.y, window.width, bar.config().height)
}

fn feed(
    bar: &mut TitleBarController<TerminalHost>,
    translator: &mut PointerTranslator,
    event: MouseEvent,
    now: Instant,
) {
    let rect = bar_rect(bar);
    if let Some(pointer) = translator.translate(&event, rect, now) {
        bar.handle_pointer(pointer);
    }
}

#[test]
fn bar_renders_title_and_cluster_into_cells() {
    let mut bar = demo_bar();
    bar.host_mut().set_icon(IconImage::solid(20, Rgba::rgb(0, 120, 212)));
    bar.pump_host_events();

    let area = Rect::new(0, 0, 40, 2);
    let mut buffer = Buffer::empty(area);
    let mut canvas = TerminalCanvas::new(
        &mut buffer,
        area,
        Rgba::rgb(243, 243, 243),
        ColorDepth::TrueColor,
    );
    bar.render(&mut canvas);

    let text: String = (0..area.height)
        .flat_map(|y| (0..area.width).map(move |x| (x, y)))
        .map(|(x, y)| buffer[(x, y)].symbol().to_string())
        .collect();
    assert!(text.contains("demo"), "rendered: {text:?}");
    // icon sits left of the title
    assert_ne!(buffer[(2, 0)].bg, buffer[(20, 0)].bg);
}

#[test]
fn close_click_through_terminal_events() {
    let mut bar = demo_bar();
    let mut translator = PointerTranslator::new(DEFAULT_CELL_SIZE);
    let now = Instant::now();
    // window starts at column 10; close spans columns 44..50
    feed(&mut bar, &mut translator, mouse(MouseEventKind::Down(MouseButton::Left), 47, 2), now);
    feed(&mut bar, &mut translator, mouse(MouseEventKind::Up(MouseButton::Left), 47, 2), now);
    assert!(bar.host().close_requested());
}

#[test]
fn dragging_the_bar_moves_the_window() {
    let mut bar = demo_bar();
    let mut translator = PointerTranslator::new(DEFAULT_CELL_SIZE);
    let now = Instant::now();
    feed(&mut bar, &mut translator, mouse(MouseEventKind::Down(MouseButton::Left), 20, 2), now);
    assert!(bar.host().is_dragging());

    let target = translator.screen_point(24, 3);
    assert!(bar.host_mut().follow_pointer(target));
    assert_eq!(bar.host().window(), RectF::new(112.0, 48.0, 320.0, 160.0));
    assert!(bar.host_mut().end_session());
    assert_eq!(cells_for(bar.host().window(), DEFAULT_CELL_SIZE), Rect::new(14, 3, 40, 10));
}

#[test]
fn double_click_maximizes_terminal_window() {
    let mut bar = demo_bar();
    let mut translator = PointerTranslator::new(DEFAULT_CELL_SIZE);
    let now = Instant::now();
    for offset in [0, 100] {
        let at = now + Duration::from_millis(offset);
        feed(&mut bar, &mut translator, mouse(MouseEventKind::Down(MouseButton::Left), 20, 2), at);
        feed(&mut bar, &mut translator, mouse(MouseEventKind::Up(MouseButton::Left), 20, 2), at);
    }
    assert!(bar.host().is_maximized());
    assert!(bar.is_maximized());
    assert_eq!(bar.host().window(), bar.host().screen());
}

#[test]
fn frame_edge_resizes_terminal_window() {
    let mut bar = demo_bar();
    let window = bar.host().window();
    let translator = PointerTranslator::new(DEFAULT_CELL_SIZE);
    // right-most column of the window
    let grab = translator.screen_point(49, 6);
    let local = frameless_titlebar::Point::new(grab.x - window.x, grab.y - window.y);
    assert!(bar.handle_frame_press(local, window.size(), grab));
    bar.host_mut().follow_pointer(translator.screen_point(53, 6));
    assert_eq!(bar.host().window().width, 352.0);
    bar.host_mut().end_session();
}
