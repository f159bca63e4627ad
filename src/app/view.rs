// SPDX-License-Identifier: GPL-3.0-only

//! Frame rendering
//!
//! Live modes pull a raw preview frame from the camera every iteration;
//! playback modes reuse the cached photo; the empty gallery shows nothing.
//! Buttons are always composited last so they sit above the image.

use super::App;
use super::state::ScreenMode;
use crate::backends::{BackendResult, Display};
use crate::constants::display::{BACKGROUND, STATUS_BAR, STATUS_BAR_COLOR};
use crate::errors::{AppError, AppResult};
use crate::ui::{Rect, Screen};
use image::RgbImage;
use tracing::warn;

impl App {
    /// Render the active screen once
    pub(crate) fn render(&mut self) -> AppResult<()> {
        let preview = if self.mode.is_live() {
            self.capture_preview()
        } else {
            None
        };

        let image = match self.mode {
            mode if mode.is_live() => preview.as_ref(),
            ScreenMode::PLAYBACK | ScreenMode::DELETE_CONFIRM => {
                self.capture.cached.as_ref().map(|c| &c.image)
            }
            _ => None,
        };

        let screen = &self.screens[self.mode.index()];
        let display = self
            .display
            .as_mut()
            .ok_or_else(|| AppError::Display("Display is held by the busy indicator".to_string()))?;
        compose(display.as_mut(), image, screen).map_err(|e| AppError::Display(e.to_string()))
    }

    /// Grab and convert one viewfinder frame; failures render as no image
    fn capture_preview(&mut self) -> Option<RgbImage> {
        let (width, height) = (self.preview_profile.width, self.preview_profile.height);
        self.preview_buffer.resize(self.preview_profile.raw_frame_len(), 0);

        if let Err(e) = self.camera.capture_raw_frame(&mut self.preview_buffer) {
            warn!(error = %e, "Preview frame capture failed");
            return None;
        }
        let rgb = match self.converter.convert(&self.preview_buffer, width, height) {
            Ok(rgb) => rgb,
            Err(e) => {
                warn!(error = %e, "Preview frame conversion failed");
                return None;
            }
        };
        RgbImage::from_raw(width, height, rgb)
    }
}

/// Paint an image centered, letterboxing when it does not cover the display
pub fn show_image(display: &mut dyn Display, image: Option<&RgbImage>) -> BackendResult<()> {
    let (width, height) = display.size();
    let full = Rect::new(0, 0, width, height);
    if image.is_none_or(|img| img.height() < height) {
        display.fill_rect(BACKGROUND, full)?;
    }
    if let Some(img) = image {
        display.blit(img, full.centered(img.width(), img.height()))?;
    }
    Ok(())
}

/// Image, status bar, then the screen's buttons in declaration order
pub fn compose(display: &mut dyn Display, image: Option<&RgbImage>, screen: &Screen) -> BackendResult<()> {
    show_image(display, image)?;
    let (x, y, w, h) = STATUS_BAR;
    display.fill_rect(STATUS_BAR_COLOR, Rect::new(x, y, w, h))?;
    screen.draw(display)?;
    display.present()
}
