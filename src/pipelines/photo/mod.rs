// SPDX-License-Identifier: GPL-3.0-only

//! Still photo pipeline
//!
//! ```text
//! Still capture (JPEG on disk)
//!       ├─→ display decode → fit to screen → cached playback image
//!       └─→ print decode → post-processing → overwrite JPEG → printer
//! ```
//!
//! The two decodes are independent so a failure in post-processing never
//! leaves a half-modified display image behind.

pub mod processing;

pub use processing::{PostProcessingConfig, PostProcessor};

use crate::constants::print::JPEG_QUALITY;
use crate::errors::PhotoError;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Decode, process and persist captured stills
#[derive(Debug, Clone, Default)]
pub struct PhotoPipeline {
    post_processor: PostProcessor,
}

impl PhotoPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `path` scaled to fit `max_width` x `max_height`, aspect preserved
    pub fn decode_for_display(
        &self,
        path: &Path,
        max_width: u32,
        max_height: u32,
    ) -> Result<RgbImage, PhotoError> {
        let image = image::open(path)?.to_rgb8();
        let (w, h) = fit_within(image.width(), image.height(), max_width, max_height);
        if (w, h) == image.dimensions() {
            return Ok(image);
        }
        debug!(from = ?image.dimensions(), to = ?(w, h), "Scaling photo for display");
        Ok(imageops::resize(&image, w, h, FilterType::Triangle))
    }

    /// Post-process the photo at `path` and overwrite it with the print version
    pub fn process_file(&self, path: &Path) -> Result<GrayImage, PhotoError> {
        let decoded = image::open(path)?;
        let processed = self
            .post_processor
            .process(&decoded)
            .map_err(PhotoError::ProcessingFailed)?;
        save_jpeg(&processed, path)?;
        info!(
            path = %path.display(),
            width = processed.width(),
            height = processed.height(),
            "Processed photo saved"
        );
        Ok(processed)
    }
}

/// Largest size with the same aspect ratio that fits the bounds
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }
    let scale = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );
    let w = ((width as f64 * scale).round() as u32).clamp(1, max_width);
    let h = ((height as f64 * scale).round() as u32).clamp(1, max_height);
    (w, h)
}

fn save_jpeg(image: &GrayImage, path: &Path) -> Result<(), PhotoError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY)
        .encode_image(image)
        .map_err(|e| PhotoError::SaveFailed(e.to_string()))?;
    // Dropping the writer would swallow a failed final write
    writer.flush()?;
    Ok(())
}
