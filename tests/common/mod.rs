// SPDX-License-Identifier: GPL-3.0-only

//! Test doubles shared by the integration tests

#![allow(dead_code)]

use image::{GrayImage, Rgb, RgbImage, RgbaImage};
use photobooth::app::{App, Devices};
use photobooth::backends::input::ScriptedInput;
use photobooth::backends::{
    BackendError, BackendResult, Camera, CaptureProfile, Crop, Display, Framebuffer, Printer,
};
use photobooth::config::BoothConfig;
use photobooth::constants::busy::{FRAME_COUNT, LABEL_ICON, frame_icon};
use photobooth::media::I420Converter;
use photobooth::ui::{Icon, IconRegistry, Point, Rect};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Everything the recording camera saw
#[derive(Debug, Default)]
pub struct CameraLog {
    pub resolution: (u32, u32),
    pub crop: Option<Crop>,
    pub effects: Vec<String>,
    pub captures: Vec<(u32, u32)>,
    pub fail_next_capture: bool,
    pub corrupt_next_capture: bool,
    pub preview_frames: usize,
}

impl CameraLog {
    pub fn profile(&self) -> (u32, u32, Option<Crop>) {
        (self.resolution.0, self.resolution.1, self.crop)
    }
}

/// Camera that records calls and can be told to fail the next still
pub struct RecordingCamera(pub Arc<Mutex<CameraLog>>);

impl Camera for RecordingCamera {
    fn set_resolution(&mut self, width: u32, height: u32) -> BackendResult<()> {
        self.0.lock().unwrap().resolution = (width, height);
        Ok(())
    }

    fn set_crop(&mut self, crop: Crop) -> BackendResult<()> {
        self.0.lock().unwrap().crop = Some(crop);
        Ok(())
    }

    fn set_image_effect(&mut self, effect: &str) -> BackendResult<()> {
        self.0.lock().unwrap().effects.push(effect.to_string());
        Ok(())
    }

    fn capture_to_file(&mut self, path: &Path) -> BackendResult<()> {
        let mut log = self.0.lock().unwrap();
        let (w, h) = log.resolution;
        log.captures.push((w, h));
        if std::mem::take(&mut log.fail_next_capture) {
            std::fs::write(path, [0xFF, 0xD8])?;
            return Err(BackendError::Device("simulated still failure".to_string()));
        }
        if std::mem::take(&mut log.corrupt_next_capture) {
            std::fs::write(path, b"not a jpeg")?;
            return Ok(());
        }
        // Quarter-size still keeps the tests fast
        let still = RgbImage::from_fn(w / 4, h / 4, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
        still.save_with_format(path, image::ImageFormat::Jpeg)?;
        Ok(())
    }

    fn capture_raw_frame(&mut self, buffer: &mut [u8]) -> BackendResult<()> {
        let mut log = self.0.lock().unwrap();
        log.preview_frames += 1;
        let (w, h) = log.resolution;
        let y_size = (w * h) as usize;
        buffer[..y_size].fill(90);
        buffer[y_size..].fill(128);
        Ok(())
    }
}

/// Printer that keeps the dimensions of every printed image
#[derive(Default)]
pub struct PrinterLog {
    pub printed: Vec<(u32, u32)>,
    pub fed: Vec<u8>,
    pub fail: bool,
}

pub struct RecordingPrinter(pub Arc<Mutex<PrinterLog>>);

impl Printer for RecordingPrinter {
    fn print_image(&mut self, image: &GrayImage, _feed_after: bool) -> BackendResult<()> {
        let mut log = self.0.lock().unwrap();
        if log.fail {
            return Err(BackendError::Device("paper out".to_string()));
        }
        log.printed.push(image.dimensions());
        Ok(())
    }

    fn feed(&mut self, lines: u8) -> BackendResult<()> {
        self.0.lock().unwrap().fed.push(lines);
        Ok(())
    }
}

/// Framebuffer the test keeps a handle to
pub struct SharedDisplay(pub Arc<Mutex<Framebuffer>>);

impl Display for SharedDisplay {
    fn size(&self) -> (u32, u32) {
        self.0.lock().unwrap().size()
    }

    fn blit(&mut self, image: &RgbImage, position: Point) -> BackendResult<()> {
        self.0.lock().unwrap().blit(image, position)
    }

    fn blit_icon(&mut self, bitmap: &RgbaImage, position: Point) -> BackendResult<()> {
        self.0.lock().unwrap().blit_icon(bitmap, position)
    }

    fn fill_rect(&mut self, color: [u8; 3], rect: Rect) -> BackendResult<()> {
        self.0.lock().unwrap().fill_rect(color, rect)
    }

    fn present(&mut self) -> BackendResult<()> {
        self.0.lock().unwrap().present()
    }
}

/// Busy and effect icons so decorations are observable
pub fn icons() -> IconRegistry {
    let solid = |v: u8| Some(RgbaImage::from_pixel(4, 4, image::Rgba([v, v, v, 255])));
    let mut all = vec![Icon::new(LABEL_ICON, solid(250)), Icon::new("fx-none", solid(1))];
    for n in 0..FRAME_COUNT {
        all.push(Icon::new(frame_icon(n), solid(20 + n as u8)));
    }
    for name in ["fx-sketch", "fx-solarize", "fx-negative"] {
        all.push(Icon::new(name, solid(2)));
    }
    IconRegistry::from_icons(all)
}

/// A booth wired to recording doubles inside a scratch directory
pub struct Booth {
    pub app: App,
    pub camera: Arc<Mutex<CameraLog>>,
    pub printer: Arc<Mutex<PrinterLog>>,
    pub display: Arc<Mutex<Framebuffer>>,
    pub dir: tempfile::TempDir,
}

pub fn config_in(dir: &Path) -> BoothConfig {
    BoothConfig {
        photos_dir: dir.join("photos"),
        icons_dir: dir.join("icons"),
        settings_path: dir.join("photobooth.json"),
        spool_dir: dir.join("spool"),
        print_settle_ms: 0,
        print_feed_lines: 2,
        print_pause_ms: 0,
    }
}

pub fn booth_with(dir: tempfile::TempDir, config: BoothConfig, input: ScriptedInput) -> Booth {
    let camera = Arc::new(Mutex::new(CameraLog::default()));
    let printer = Arc::new(Mutex::new(PrinterLog::default()));
    let display = Arc::new(Mutex::new(Framebuffer::new(320, 240)));

    let devices = Devices {
        camera: Box::new(RecordingCamera(Arc::clone(&camera))),
        converter: Box::new(I420Converter),
        printer: Box::new(RecordingPrinter(Arc::clone(&printer))),
        display: Box::new(SharedDisplay(Arc::clone(&display))),
        input: Box::new(input),
    };
    let app = App::new(config, icons(), devices).unwrap();
    Booth {
        app,
        camera,
        printer,
        display,
        dir,
    }
}

pub fn booth(input: ScriptedInput) -> Booth {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    booth_with(dir, config, input)
}

/// Create an empty `IMG_NNNN.JPG` placeholder
pub fn touch_photo(dir: &Path, index: i32) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(format!("IMG_{:04}.JPG", index)), b"x").unwrap();
}

/// Create a decodable photo
pub fn write_photo(dir: &Path, index: i32, shade: u8) {
    std::fs::create_dir_all(dir).unwrap();
    RgbImage::from_pixel(64, 48, Rgb([shade, shade, shade]))
        .save_with_format(dir.join(format!("IMG_{:04}.JPG", index)), image::ImageFormat::Jpeg)
        .unwrap();
}

pub fn preview_profile() -> (u32, u32, Option<Crop>) {
    let p = CaptureProfile::PREVIEW;
    (p.width, p.height, Some(p.crop))
}
