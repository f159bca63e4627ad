// SPDX-License-Identifier: GPL-3.0-only

//! Capture operations handlers
//!
//! A capture allocates a sequence number, switches the camera to the
//! still profile, captures to disk, decodes the result twice (once for
//! the screen, once for the printer), then prints. Any failure before
//! printing is logged, the unfinished file is removed and the viewfinder
//! simply resumes.

use crate::app::App;
use crate::app::state::CachedImage;
use crate::app::view::show_image;
use crate::backends::CaptureProfile;
use crate::constants::display::{HEIGHT, WIDTH};
use crate::errors::{AppError, AppResult, PhotoError};
use image::{GrayImage, RgbImage};
use std::thread;
use tracing::{error, info, warn};

/// Output of a successful still capture
struct Capture {
    shown: RgbImage,
    printed: GrayImage,
}

impl App {
    // =========================================================================
    // Capture Operations Handlers
    // =========================================================================

    /// Shutter: capture, process, show and print one photo
    pub(crate) fn take_picture(&mut self) -> AppResult<()> {
        if let Err(e) = self.store.ensure_dir() {
            warn!(path = %self.store.dir().display(), error = %e, "Photo directory unavailable, capture skipped");
            return Ok(());
        }
        let index = match self.store.allocate() {
            Ok(index) => index,
            Err(e) => {
                warn!(error = %e, "Capture skipped");
                return Ok(());
            }
        };

        info!(index, "Taking picture");
        self.capture.last_saved_index = index;
        self.capture.cached = None;

        let outcome = self.while_busy(|app| {
            let result = app.capture_still(index);
            app.restore_preview();
            result
        })?;

        let capture = match outcome {
            Ok(capture) => capture,
            Err(e) => {
                error!(index, error = %e, "Capture failed");
                return Ok(());
            }
        };

        let display = self
            .display
            .as_mut()
            .ok_or_else(|| AppError::Display("Display unavailable after capture".to_string()))?;
        show_image(display.as_mut(), Some(&capture.shown))
            .and_then(|_| display.present())
            .map_err(|e| AppError::Display(e.to_string()))?;

        match self.print(&capture.printed) {
            Ok(()) => self.capture.last_loaded_index = index,
            Err(e) => error!(index, error = %e, "Printing failed"),
        }

        self.capture.cached = Some(CachedImage {
            index,
            image: capture.shown,
        });
        Ok(())
    }

    /// Still capture and post-processing into the allocated slot
    fn capture_still(&mut self, index: i32) -> AppResult<Capture> {
        let path = self.store.path_for(index);

        CaptureProfile::STILL
            .apply(self.camera.as_mut())
            .map_err(|e| AppError::Camera(e.to_string()))?;

        if let Err(e) = self.camera.capture_to_file(&path) {
            self.store.discard(index);
            return Err(PhotoError::CaptureFailed(e.to_string()).into());
        }

        let finished = self.finish_still(index);
        if finished.is_err() {
            // An undecodable or half-overwritten file must not reach the gallery
            self.store.discard(index);
        }
        finished
    }

    fn finish_still(&self, index: i32) -> AppResult<Capture> {
        let path = self.store.path_for(index);
        self.store.set_photo_permissions(index)?;

        let shown = self.pipeline.decode_for_display(&path, WIDTH, HEIGHT)?;
        let printed = self.pipeline.process_file(&path)?;
        Ok(Capture { shown, printed })
    }

    /// Put the camera back into the viewfinder profile
    fn restore_preview(&mut self) {
        if let Err(e) = self.preview_profile.apply(self.camera.as_mut()) {
            error!(error = %e, "Failed to restore preview profile");
        }
    }

    /// Print, feed and pause so the strip can be torn off
    fn print(&mut self, image: &GrayImage) -> AppResult<()> {
        let printer_error = |e: crate::backends::BackendError| AppError::Printer(e.to_string());

        self.printer.print_image(image, true).map_err(printer_error)?;
        thread::sleep(self.config.print_settle());
        self.printer
            .feed(self.config.print_feed_lines)
            .map_err(printer_error)?;
        thread::sleep(self.config.print_pause());
        Ok(())
    }
}
