// SPDX-License-Identifier: GPL-3.0-only

//! Synthetic camera used when no sensor is attached
//!
//! Produces an animated test pattern for the viewfinder and writes
//! a JPEG of the same pattern for still captures. A handful of the
//! firmware effects are emulated; the rest pass frames through unchanged.

use super::{Camera, CaptureProfile, Crop};
use crate::backends::{BackendError, BackendResult};
use crate::constants::EFFECTS;
use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;
use tracing::{debug, info};

/// Test-pattern camera
pub struct VirtualCamera {
    width: u32,
    height: u32,
    crop: Crop,
    effect: String,
    frame_counter: u32,
    fail_next_capture: bool,
}

impl VirtualCamera {
    pub fn new() -> Self {
        Self {
            width: CaptureProfile::PREVIEW.width,
            height: CaptureProfile::PREVIEW.height,
            crop: Crop::FULL,
            effect: EFFECTS[0].to_string(),
            frame_counter: 0,
            fail_next_capture: false,
        }
    }

    /// Make the next still capture fail after writing a truncated file
    pub fn fail_next_capture(&mut self) {
        self.fail_next_capture = true;
    }

    /// Current resolution
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Current crop
    pub fn crop(&self) -> Crop {
        self.crop
    }

    /// Current effect name
    pub fn effect(&self) -> &str {
        &self.effect
    }

    fn pattern_luma(&self, x: u32, y: u32) -> u8 {
        let phase = self.frame_counter.wrapping_mul(3);
        ((x * 255 / self.width.max(1)).wrapping_add(y * 64 / self.height.max(1)) + phase) as u8
    }

    fn apply_effect_luma(&self, luma: u8) -> u8 {
        match self.effect.as_str() {
            "negative" => 255 - luma,
            "solarize" if luma > 128 => 255 - luma,
            "posterise" => luma & 0xC0,
            "washedout" => ((luma as i32 - 128) / 2 + 128) as u8,
            _ => luma,
        }
    }

    fn apply_effect_chroma(&self, chroma: u8) -> u8 {
        match self.effect.as_str() {
            "negative" => 255 - chroma,
            "washedout" => ((chroma as u16 + 128) / 2) as u8,
            _ => chroma,
        }
    }
}

impl Default for VirtualCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera for VirtualCamera {
    fn set_resolution(&mut self, width: u32, height: u32) -> BackendResult<()> {
        if width == 0 || height == 0 {
            return Err(BackendError::Device(format!(
                "Invalid resolution {}x{}",
                width, height
            )));
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn set_crop(&mut self, crop: Crop) -> BackendResult<()> {
        self.crop = crop;
        Ok(())
    }

    fn set_image_effect(&mut self, effect: &str) -> BackendResult<()> {
        if !EFFECTS.contains(&effect) {
            return Err(BackendError::Device(format!("Unknown effect: {}", effect)));
        }
        debug!(effect, "Virtual camera effect changed");
        self.effect = effect.to_string();
        Ok(())
    }

    fn capture_to_file(&mut self, path: &Path) -> BackendResult<()> {
        if std::mem::take(&mut self.fail_next_capture) {
            std::fs::write(path, [0xFF, 0xD8, 0xFF])?;
            return Err(BackendError::Device("Still port timed out".to_string()));
        }

        let (width, height) = (self.width, self.height);
        let image = RgbImage::from_fn(width, height, |x, y| {
            let luma = self.apply_effect_luma(self.pattern_luma(x, y));
            let r = self.apply_effect_chroma((x * 255 / width) as u8);
            let b = self.apply_effect_chroma((y * 255 / height) as u8);
            Rgb([r / 2 + luma / 2, luma, b / 2 + luma / 2])
        });
        image.save_with_format(path, ImageFormat::Jpeg)?;
        info!(path = %path.display(), width, height, "Virtual still captured");
        Ok(())
    }

    fn capture_raw_frame(&mut self, buffer: &mut [u8]) -> BackendResult<()> {
        let (width, height) = (self.width as usize, self.height as usize);
        let y_size = width * height;
        let expected = y_size * 3 / 2;
        if buffer.len() != expected {
            return Err(BackendError::Device(format!(
                "Raw buffer size mismatch: expected {}, got {}",
                expected,
                buffer.len()
            )));
        }

        for y in 0..height {
            for x in 0..width {
                buffer[y * width + x] =
                    self.apply_effect_luma(self.pattern_luma(x as u32, y as u32));
            }
        }

        // I420: quarter-size U plane followed by quarter-size V plane
        let chroma_w = width / 2;
        let chroma_h = height / 2;
        let (u_plane, v_plane) = buffer[y_size..].split_at_mut(chroma_w * chroma_h);
        for cy in 0..chroma_h {
            for cx in 0..chroma_w {
                let idx = cy * chroma_w + cx;
                u_plane[idx] = self.apply_effect_chroma((cx * 255 / chroma_w.max(1)) as u8);
                v_plane[idx] = self.apply_effect_chroma((cy * 255 / chroma_h.max(1)) as u8);
            }
        }

        self.frame_counter = self.frame_counter.wrapping_add(1);
        Ok(())
    }
}
