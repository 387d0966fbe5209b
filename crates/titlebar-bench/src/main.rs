use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use frameless_titlebar::term_color::ColorDepth;
use frameless_titlebar::terminal::{DEFAULT_CELL_SIZE, TerminalCanvas};
use frameless_titlebar::{
    Point, PointerButton, PointerEvent, PointerKind, RasterCanvas, RecordingHost, Rgba,
    TitleBarConfig, TitleBarController,
};

#[derive(Parser, Debug)]
#[command(
    name = "titlebar-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Headless benchmark for title bar pointer dispatch and rendering"
)]
struct BenchCli {
    /// Pointer sweeps / frames per phase.
    #[arg(short = 'n', long = "iterations", default_value_t = 2_000)]
    iterations: u32,

    /// Title bar width in logical pixels.
    #[arg(short = 'w', long = "width", default_value_t = 800.0)]
    width: f32,

    /// Tool items added to the right cluster.
    #[arg(short = 'i', long = "items", default_value_t = 2)]
    items: u32,

    /// Device pixel ratio of the raster phase.
    #[arg(long = "scale", default_value_t = 2.0)]
    scale: f32,
}

struct BenchConfig {
    iterations: u32,
    width: f32,
    items: u32,
    scale: f32,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(1..=1_000_000).contains(&cli.iterations) {
            return Err("iterations must be between 1 and 1000000".to_string());
        }
        if !(200.0..=8192.0).contains(&cli.width) {
            return Err("width must be between 200 and 8192".to_string());
        }
        if cli.items > 16 {
            return Err("at most 16 items".to_string());
        }
        if !(0.5..=4.0).contains(&cli.scale) {
            return Err("scale must be between 0.5 and 4".to_string());
        }
        Ok(Self {
            iterations: cli.iterations,
            width: cli.width,
            items: cli.items,
            scale: cli.scale,
        })
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    let mut bar = build_bar(&config);
    let dispatch = bench_dispatch(&mut bar, &config);
    let raster = bench_raster(&bar, &config)?;
    let cells = bench_cells(&bar, &config);

    println!(
        "{}",
        indoc::formatdoc!(
            r#"
            Title bar bench: width {width:.0}px, {items} item(s), {iterations} iteration(s).
            {dispatch}
            {raster}
            {cells}
            "#,
            width = config.width,
            items = config.items,
            iterations = config.iterations,
            dispatch = dispatch.line(),
            raster = raster.line(),
            cells = cells.line(),
        )
    );
    Ok(())
}

fn build_bar(config: &BenchConfig) -> TitleBarController<RecordingHost> {
    let host = RecordingHost::new().with_title("Benchmark window");
    let mut bar = TitleBarController::new(host, TitleBarConfig::default());
    for n in 0..config.items {
        let key = format!("item-{n}");
        if n % 2 == 0 {
            bar.add_signal_item(&key);
            let _ = bar.set_ping(&key, 20 + n * 15);
        } else {
            bar.add_item(&key, Some("Tool"));
        }
    }
    bar.set_width(config.width);
    bar
}

struct PhaseStats {
    label: &'static str,
    unit: &'static str,
    count: u64,
    elapsed: Duration,
}

impl PhaseStats {
    fn line(&self) -> String {
        let secs = self.elapsed.as_secs_f64();
        let rate = if secs > 0.0 {
            self.count as f64 / secs
        } else {
            0.0
        };
        let per = if self.count > 0 {
            secs * 1_000_000.0 / self.count as f64
        } else {
            0.0
        };
        format!(
            "{:<9} {:>10} {} in {:>8.2} ms | {:>12.0}/s | {:>8.2} us each",
            self.label,
            self.count,
            self.unit,
            secs * 1_000.0,
            rate,
            per
        )
    }
}

/// Sweep the pointer across the bar, clicking every eighth step so hover,
/// click and drag paths all run. Requests the host records are discarded
/// every sweep.
fn bench_dispatch(bar: &mut TitleBarController<RecordingHost>, config: &BenchConfig) -> PhaseStats {
    let steps = (config.width / 4.0) as u32;
    let y = bar.config().height / 2.0;
    let mut count = 0u64;
    let start = Instant::now();
    for _ in 0..config.iterations {
        for step in 0..steps {
            let pos = Point::new(step as f32 * 4.0 + 1.0, y);
            bar.handle_pointer(PointerEvent::local(PointerKind::Move, pos));
            if step % 8 == 0 {
                let button = PointerButton::Primary;
                bar.handle_pointer(PointerEvent::local(PointerKind::Press(button), pos));
                bar.handle_pointer(PointerEvent::local(PointerKind::Release(button), pos));
                count += 2;
            }
            count += 1;
        }
        bar.handle_pointer(PointerEvent::local(PointerKind::Leave, Point::default()));
        bar.host_mut().take_requests();
        count += 1;
    }
    PhaseStats {
        label: "dispatch",
        unit: "events",
        count,
        elapsed: start.elapsed(),
    }
}

fn bench_raster(
    bar: &TitleBarController<RecordingHost>,
    config: &BenchConfig,
) -> io::Result<PhaseStats> {
    let mut canvas = RasterCanvas::new(bar.bar_size(), config.scale)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty raster canvas"))?;
    let start = Instant::now();
    for _ in 0..config.iterations {
        canvas.clear();
        bar.render(&mut canvas);
    }
    Ok(PhaseStats {
        label: "raster",
        unit: "frames",
        count: u64::from(config.iterations),
        elapsed: start.elapsed(),
    })
}

fn bench_cells(bar: &TitleBarController<RecordingHost>, config: &BenchConfig) -> PhaseStats {
    let cols = (config.width / DEFAULT_CELL_SIZE.width).ceil() as u16;
    let rows = (bar.config().height / DEFAULT_CELL_SIZE.height).ceil() as u16;
    let area = Rect::new(0, 0, cols, rows);
    let mut buffer = Buffer::empty(area);
    let start = Instant::now();
    for _ in 0..config.iterations {
        buffer.reset();
        let mut canvas = TerminalCanvas::new(
            &mut buffer,
            area,
            Rgba::rgb(243, 243, 243),
            ColorDepth::TrueColor,
        );
        bar.render(&mut canvas);
    }
    PhaseStats {
        label: "cells",
        unit: "frames",
        count: u64::from(config.iterations),
        elapsed: start.elapsed(),
    }
}
