// SPDX-License-Identifier: GPL-3.0-only

//! Terminal-based booth runtime
//!
//! Presents the booth framebuffer in the terminal using Unicode half-block
//! characters for improved vertical resolution. Mouse presses stand in for
//! the touchscreen and Ctrl+C requests a clean shutdown.

use crate::app::{App, Devices};
use crate::backends::camera::VirtualCamera;
use crate::backends::printer::SpoolPrinter;
use crate::backends::{BackendResult, Display, Framebuffer, InputEvent, InputSource};
use crate::config::BoothConfig;
use crate::constants::display::{HEIGHT, WIDTH};
use crate::media::I420Converter;
use crate::ui::{IconRegistry, Point, Rect};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use image::{RgbImage, RgbaImage};
use ratatui::{Terminal, backend::CrosstermBackend, buffer::Buffer, style::Color, widgets::Widget};
use std::io::{self, stdout};
use std::time::Duration;
use tracing::{error, info};

type Area = ratatui::layout::Rect;

/// Run the booth in the terminal
pub fn run(config: BoothConfig) -> Result<(), Box<dyn std::error::Error>> {
    let icons = IconRegistry::load_dir(&config.icons_dir);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_booth(config, icons, terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;

    if let Err(e) = &result {
        error!(error = %e, "Booth stopped with an error");
    }
    result
}

fn run_booth(
    config: BoothConfig,
    icons: IconRegistry,
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let devices = Devices {
        camera: Box::new(VirtualCamera::new()),
        converter: Box::new(I420Converter),
        printer: Box::new(SpoolPrinter::new(config.spool_dir.clone())),
        display: Box::new(TerminalDisplay::new(terminal)),
        input: Box::new(TerminalInput::new(WIDTH, HEIGHT)),
    };
    info!(icons = icons.len(), "Starting terminal booth");

    let mut app = App::new(config, icons, devices)?;
    app.run()?;
    Ok(())
}

/// Framebuffer mirrored to the terminal on every `present`
pub struct TerminalDisplay {
    framebuffer: Framebuffer,
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalDisplay {
    pub fn new(terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Self {
        Self {
            framebuffer: Framebuffer::new(WIDTH, HEIGHT),
            terminal,
        }
    }
}

impl Display for TerminalDisplay {
    fn size(&self) -> (u32, u32) {
        self.framebuffer.size()
    }

    fn blit(&mut self, image: &RgbImage, position: Point) -> BackendResult<()> {
        self.framebuffer.blit(image, position)
    }

    fn blit_icon(&mut self, bitmap: &RgbaImage, position: Point) -> BackendResult<()> {
        self.framebuffer.blit_icon(bitmap, position)
    }

    fn fill_rect(&mut self, color: [u8; 3], rect: Rect) -> BackendResult<()> {
        self.framebuffer.fill_rect(color, rect)
    }

    fn present(&mut self) -> BackendResult<()> {
        self.framebuffer.present()?;
        let widget = FrameWidget {
            pixels: self.framebuffer.pixels(),
        };
        self.terminal.draw(|f| f.render_widget(widget, f.area()))?;
        Ok(())
    }
}

/// Mouse and keyboard events translated into touch input
pub struct TerminalInput {
    fb_width: u32,
    fb_height: u32,
}

impl TerminalInput {
    pub fn new(fb_width: u32, fb_height: u32) -> Self {
        Self {
            fb_width,
            fb_height,
        }
    }

    fn translate(&self, event: Event) -> Option<InputEvent> {
        match event {
            Event::Key(key)
                if key.kind == KeyEventKind::Press
                    && key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                Some(InputEvent::Interrupt)
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let (cols, rows) = crossterm::terminal::size().ok()?;
                let area = image_area(Area::new(0, 0, cols, rows), self.fb_width, self.fb_height);
                cell_to_pixel(area, mouse.column, mouse.row, self.fb_width, self.fb_height)
                    .map(InputEvent::Tap)
            }
            _ => None,
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self, timeout: Duration) -> BackendResult<Vec<InputEvent>> {
        let mut events = Vec::new();
        let mut wait = timeout;
        while event::poll(wait)? {
            if let Some(ev) = self.translate(event::read()?) {
                events.push(ev);
            }
            wait = Duration::ZERO;
        }
        Ok(events)
    }
}

/// Cell area that shows a `fb_width` x `fb_height` image with its aspect ratio kept
///
/// Each cell covers one pixel column and two pixel rows.
pub fn image_area(area: Area, fb_width: u32, fb_height: u32) -> Area {
    let cols = area.width as u32;
    let pixel_rows = area.height as u32 * 2;

    let (width, height) = if cols * fb_height > pixel_rows * fb_width {
        // Terminal is wider - fit to height
        (pixel_rows * fb_width / fb_height, area.height as u32)
    } else {
        // Terminal is taller - fit to width
        (cols, cols * fb_height / fb_width / 2)
    };
    let (width, height) = (width as u16, height as u16);

    Area::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}

/// Framebuffer pixel under a terminal cell, if the cell shows the image
pub fn cell_to_pixel(area: Area, column: u16, row: u16, fb_width: u32, fb_height: u32) -> Option<Point> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    if column < area.x || row < area.y || column >= area.x + area.width || row >= area.y + area.height {
        return None;
    }
    let tx = (column - area.x) as u32;
    let ty = (row - area.y) as u32;
    let x = tx * fb_width / area.width as u32;
    // Center of the cell's two pixel rows
    let y = (ty * 2 + 1) * fb_height / (area.height as u32 * 2);
    Some(Point::new(x as i32, y as i32))
}

/// Widget that renders the framebuffer using half-block characters
struct FrameWidget<'a> {
    pixels: &'a RgbImage,
}

impl Widget for FrameWidget<'_> {
    fn render(self, area: Area, buf: &mut Buffer) {
        let (fb_w, fb_h) = self.pixels.dimensions();
        if fb_w == 0 || fb_h == 0 {
            return;
        }
        let target = image_area(area, fb_w, fb_h);
        if target.width == 0 || target.height == 0 {
            return;
        }

        let x_scale = fb_w as f64 / target.width as f64;
        let y_scale = fb_h as f64 / (target.height as f64 * 2.0);

        // Upper half (▀) coloured with fg, lower half with bg
        for ty in 0..target.height {
            for tx in 0..target.width {
                let src_x = ((tx as f64 * x_scale) as u32).min(fb_w - 1);
                let src_top = ((ty as f64 * 2.0 * y_scale) as u32).min(fb_h - 1);
                let src_bottom = (((ty as f64 * 2.0 + 1.0) * y_scale) as u32).min(fb_h - 1);

                let top = self.pixels.get_pixel(src_x, src_top).0;
                let bottom = self.pixels.get_pixel(src_x, src_bottom).0;

                if let Some(cell) = buf.cell_mut((target.x + tx, target.y + ty)) {
                    cell.set_char('▀');
                    cell.set_fg(Color::Rgb(top[0], top[1], top[2]));
                    cell.set_bg(Color::Rgb(bottom[0], bottom[1], bottom[2]));
                }
            }
        }
    }
}
