// SPDX-License-Identifier: GPL-3.0-only

//! Print post-processing
//!
//! Turns a full-resolution capture into the grayscale strip sent to the
//! thermal printer:
//! - Proportional resize to the print width
//! - Crop (or pad) to the strip height from the top-left
//! - Rotate 90° counter-clockwise so the strip runs along the paper
//! - Grayscale conversion
//! - Sharpness, brightness and contrast enhancement, in that order
//!
//! The enhancement steps interpolate between the image and a degenerate
//! version of it (smoothed, black, mean gray). Factors above 1 extrapolate
//! away from the degenerate image.

use crate::constants::print;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma, RgbImage};
use tracing::debug;

/// Post-processing configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PostProcessingConfig {
    /// Width the capture is scaled to
    pub target_width: u32,
    /// Height kept after scaling
    pub target_height: u32,
    /// Sharpness factor (1.0 = no change)
    pub sharpness: f32,
    /// Brightness factor (1.0 = no change)
    pub brightness: f32,
    /// Contrast factor (1.0 = no change)
    pub contrast: f32,
}

impl Default for PostProcessingConfig {
    fn default() -> Self {
        Self {
            target_width: print::TARGET_WIDTH,
            target_height: print::TARGET_HEIGHT,
            sharpness: print::SHARPNESS,
            brightness: print::BRIGHTNESS,
            contrast: print::CONTRAST,
        }
    }
}

/// Post-processor for captured stills
#[derive(Debug, Clone, Default)]
pub struct PostProcessor {
    config: PostProcessingConfig,
}

impl PostProcessor {
    pub fn new(config: PostProcessingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PostProcessingConfig {
        &self.config
    }

    /// Run the full chain on a decoded capture
    pub fn process(&self, image: &DynamicImage) -> Result<GrayImage, String> {
        if image.width() == 0 || image.height() == 0 {
            return Err("Cannot process an empty image".to_string());
        }
        debug!(
            width = image.width(),
            height = image.height(),
            "Starting print post-processing"
        );

        let rgb = image.to_rgb8();
        let scaled = self.resize_to_width(&rgb);
        let strip = self.crop_to_height(&scaled);
        let rotated = imageops::rotate270(&strip);
        let gray = luma(&rotated);

        let gray = enhance_sharpness(&gray, self.config.sharpness);
        let gray = enhance_brightness(&gray, self.config.brightness);
        let gray = enhance_contrast(&gray, self.config.contrast);

        debug!(width = gray.width(), height = gray.height(), "Post-processing complete");
        Ok(gray)
    }

    /// Scale so the width equals the target, height truncated proportionally
    fn resize_to_width(&self, image: &RgbImage) -> RgbImage {
        let target_w = self.config.target_width;
        let ratio = target_w as f64 / image.width() as f64;
        let target_h = ((image.height() as f64 * ratio) as u32).max(1);
        imageops::resize(image, target_w, target_h, FilterType::Lanczos3)
    }

    /// Keep the top `target_height` rows; shorter images are padded with black
    fn crop_to_height(&self, image: &RgbImage) -> RgbImage {
        let (w, h) = (self.config.target_width, self.config.target_height);
        if image.height() >= h {
            return imageops::crop_imm(image, 0, 0, w, h).to_image();
        }
        let mut canvas = RgbImage::new(w, h);
        imageops::replace(&mut canvas, image, 0, 0);
        canvas
    }
}

/// Blend `image` with `degenerate`: `degenerate + factor * (image - degenerate)`
fn blend(image: &GrayImage, factor: f32, degenerate: impl Fn(u32, u32) -> f32) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let d = degenerate(x, y);
        let v = d + factor * (image.get_pixel(x, y)[0] as f32 - d);
        Luma([v.clamp(0.0, 255.0) as u8])
    })
}

/// Sharpness against a 3x3 smoothing kernel; border pixels are their own degenerate
fn enhance_sharpness(image: &GrayImage, factor: f32) -> GrayImage {
    const KERNEL: [[f32; 3]; 3] = [[1.0, 1.0, 1.0], [1.0, 5.0, 1.0], [1.0, 1.0, 1.0]];
    const SCALE: f32 = 13.0;

    let (w, h) = image.dimensions();
    let smoothed = GrayImage::from_fn(w, h, |x, y| {
        if x == 0 || y == 0 || x + 1 >= w || y + 1 >= h {
            return *image.get_pixel(x, y);
        }
        let mut sum = 0.0;
        for (ky, row) in KERNEL.iter().enumerate() {
            for (kx, weight) in row.iter().enumerate() {
                sum += weight * image.get_pixel(x + kx as u32 - 1, y + ky as u32 - 1)[0] as f32;
            }
        }
        Luma([(sum / SCALE).round().clamp(0.0, 255.0) as u8])
    });

    blend(image, factor, |x, y| smoothed.get_pixel(x, y)[0] as f32)
}

/// ITU-R 601 luma, `L = (299 R + 587 G + 114 B) / 1000`
fn luma(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let l = (r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000;
        Luma([l as u8])
    })
}

/// Brightness against black
fn enhance_brightness(image: &GrayImage, factor: f32) -> GrayImage {
    blend(image, factor, |_, _| 0.0)
}

/// Contrast against the rounded mean gray level
fn enhance_contrast(image: &GrayImage, factor: f32) -> GrayImage {
    let count = (image.width() as u64 * image.height() as u64).max(1);
    let total: u64 = image.pixels().map(|p| p[0] as u64).sum();
    let mean = (total as f64 / count as f64 + 0.5).floor() as f32;
    blend(image, factor, |_, _| mean)
}
