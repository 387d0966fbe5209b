use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use crossterm::event::{
    Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;

use frameless_titlebar::event_loop::{ControlFlow, EventLoop};
use frameless_titlebar::term_color::{ColorDepth, to_terminal_color};
use frameless_titlebar::terminal::canvas::clear_area;
use frameless_titlebar::terminal::{
    ConsoleInputDriver, ConsoleOutputDriver, DEFAULT_CELL_SIZE, PointerTranslator, TerminalCanvas,
    TerminalHost, cells_for, pixels_for,
};
use frameless_titlebar::{
    ButtonVisualState, DragTrigger, IconImage, Point, RectF, Rgba, SystemButton, TitleBarConfig,
    TitleBarController, tracing_sub,
};

const DESKTOP: Rgba = Rgba::rgb(58, 110, 165);
const WINDOW_BG: Rgba = Rgba::rgb(243, 243, 243);
const BODY_FG: Rgba = Rgba::rgb(40, 40, 40);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TriggerArg {
    Press,
    Move,
}

impl From<TriggerArg> for DragTrigger {
    fn from(arg: TriggerArg) -> Self {
        match arg {
            TriggerArg::Press => DragTrigger::Press,
            TriggerArg::Move => DragTrigger::Move,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "frameless-titlebar",
    about = "Frameless window title bar demo running inside the terminal"
)]
struct Args {
    /// Window title shown in the bar.
    #[arg(long, default_value = "Frameless window")]
    title: String,

    /// Tool item as KEY=TEXT (repeatable).
    #[arg(long = "item", value_name = "KEY=TEXT", value_parser = parse_item)]
    items: Vec<(String, String)>,

    /// Signal strength item key (repeatable). Click it to cycle the ping.
    #[arg(long = "signal", value_name = "KEY")]
    signals: Vec<String>,

    /// Disable double-click to maximize.
    #[arg(long)]
    no_double_click: bool,

    /// Hide the maximize button (also disables double-click toggling).
    #[arg(long)]
    hide_maximize: bool,

    /// Override the platform's drag strategy.
    #[arg(long, value_enum)]
    drag_trigger: Option<TriggerArg>,

    /// Append logs to this file; logging is discarded otherwise.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Hover/pressed color of tool items, as #rrggbb.
    #[arg(long, value_name = "COLOR", value_parser = parse_color)]
    accent: Option<Rgba>,
}

fn parse_item(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, text)) if !key.is_empty() => Ok((key.to_string(), text.to_string())),
        _ => Err(format!("expected KEY=TEXT, got `{raw}`")),
    }
}

fn parse_color(raw: &str) -> Result<Rgba, String> {
    raw.parse::<Rgba>().map_err(|err| err.to_string())
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    tracing_sub::init_default(args.log_file.as_deref())?;

    let mut output = ConsoleOutputDriver::new()?;
    let (cols, rows) = output.size()?;
    let mut demo = Demo::new(&args, cols, rows);
    output.enter()?;

    let mut event_loop = EventLoop::new(ConsoleInputDriver::new(), Duration::from_millis(16));
    let result = event_loop.run(|_, event| match event {
        None => {
            if demo.take_dirty() {
                output.draw(|frame| demo.render(frame))?;
            }
            Ok(ControlFlow::Continue)
        }
        Some(event) => Ok(demo.handle(event)),
    });

    output.exit()?;
    result
}

struct Demo {
    bar: TitleBarController<TerminalHost>,
    translator: PointerTranslator,
    depth: ColorDepth,
    status: String,
    dirty: bool,
}

impl Demo {
    fn new(args: &Args, cols: u16, rows: u16) -> Self {
        let screen = pixels_for(Rect::new(0, 0, cols, rows), DEFAULT_CELL_SIZE);
        let window = pixels_for(
            Rect::new(cols / 8, rows / 6, (cols * 3 / 4).max(30), (rows * 2 / 3).max(8)),
            DEFAULT_CELL_SIZE,
        );
        let mut host = TerminalHost::new(screen, window, args.title.clone());
        if let Some(icon) = IconImage::solid(20, Rgba::rgb(0, 120, 212)) {
            host.set_icon(Some(icon));
        }

        let mut config = TitleBarConfig::default().with_double_click(!args.no_double_click);
        if let Some(trigger) = args.drag_trigger {
            config = config.with_drag_trigger(trigger.into());
        }
        let mut bar = TitleBarController::new(host, config);

        for (key, text) in &args.items {
            let item = bar.add_item(key, Some(text.as_str()));
            if let Some(accent) = args.accent {
                item.set_background(ButtonVisualState::Hovered, accent.with_alpha(96));
                item.set_background(ButtonVisualState::Pressed, accent.with_alpha(160));
            }
        }
        for key in &args.signals {
            bar.add_signal_item(key);
            let _ = bar.set_signal_colored(key, true);
        }
        if args.hide_maximize {
            bar.system_mut(SystemButton::Maximize).set_hidden(true);
        }

        Self {
            bar,
            translator: PointerTranslator::new(DEFAULT_CELL_SIZE),
            depth: ColorDepth::detect(),
            status: "Drag the bar to move, drag an edge to resize, q to quit".into(),
            dirty: true,
        }
    }

    fn take_dirty(&mut self) -> bool {
        let width = self.bar.host().window().width;
        self.bar.set_width(width);
        let bar_dirty = self.bar.take_redraw();
        std::mem::take(&mut self.dirty) | bar_dirty
    }

    fn handle(&mut self, event: Event) -> ControlFlow {
        self.dirty = true;
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if self.bar.host().is_minimized() {
                    self.bar.host_mut().unminimize();
                    return ControlFlow::Continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => ControlFlow::Quit,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        ControlFlow::Quit
                    }
                    _ => ControlFlow::Continue,
                }
            }
            Event::Resize(cols, rows) => {
                let screen = pixels_for(Rect::new(0, 0, cols, rows), DEFAULT_CELL_SIZE);
                self.bar.host_mut().set_screen(screen);
                ControlFlow::Continue
            }
            Event::Mouse(mouse) => {
                self.on_mouse(mouse);
                if self.bar.host().close_requested() {
                    ControlFlow::Quit
                } else {
                    ControlFlow::Continue
                }
            }
            _ => ControlFlow::Continue,
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        if self.bar.host().is_minimized() {
            return;
        }
        let screen = self.translator.screen_point(mouse.column, mouse.row);
        if self.bar.host().is_dragging() {
            match mouse.kind {
                MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                    self.bar.host_mut().follow_pointer(screen);
                    return;
                }
                MouseEventKind::Up(_) => {
                    self.bar.host_mut().end_session();
                }
                _ => return,
            }
        }

        let window = self.bar.host().window();
        if mouse.kind == MouseEventKind::Down(MouseButton::Left) && window.contains(screen) {
            let local = Point::new(screen.x - window.x, screen.y - window.y);
            if self.bar.handle_frame_press(local, window.size(), screen) {
                return;
            }
        }

        let bar_rect = RectF::new(window.x, window.y, window.width, self.bar.config().height);
        if let Some(event) = self.translator.translate(&mouse, bar_rect, Instant::now()) {
            self.bar.handle_pointer(event);
        }
        for key in self.bar.take_item_clicks() {
            self.on_item_click(&key);
        }
    }

    fn on_item_click(&mut self, key: &str) {
        let ping = self.bar.widget(key).ok().and_then(|item| item.ping());
        match ping {
            Some(ping) => {
                let next = (ping + 30) % 150;
                let _ = self.bar.set_ping(key, next);
                self.status = format!("{key}: {next} ms");
            }
            None => self.status = format!("clicked `{key}`"),
        }
    }

    fn render(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();
        let depth = self.depth;
        let buf = frame.buffer_mut();
        clear_area(buf, area, DESKTOP, depth);

        let host = self.bar.host();
        if host.is_minimized() {
            let hint = "minimized - press any key to restore";
            let style = Style::default().fg(to_terminal_color(Rgba::WHITE, depth));
            buf.set_stringn(1, area.bottom().saturating_sub(1), hint, area.width as usize, style);
            return;
        }

        let window = cells_for(host.window(), DEFAULT_CELL_SIZE).intersection(area);
        clear_area(buf, window, WINDOW_BG, depth);
        let bar_rows = (self.bar.config().height / DEFAULT_CELL_SIZE.height).ceil() as u16;
        let bar_area = Rect {
            height: bar_rows.min(window.height),
            ..window
        };
        let mut canvas = TerminalCanvas::new(buf, bar_area, WINDOW_BG, depth);
        self.bar.render(&mut canvas);

        let style = Style::default()
            .fg(to_terminal_color(BODY_FG, depth))
            .bg(to_terminal_color(WINDOW_BG, depth));
        let body_y = window.y + bar_rows + 1;
        if body_y < window.bottom() {
            let width = window.width.saturating_sub(4) as usize;
            buf.set_stringn(window.x + 2, body_y, &self.status, width, style);
        }
    }
}
