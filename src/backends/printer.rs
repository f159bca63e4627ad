// SPDX-License-Identifier: GPL-3.0-only

//! Thermal printer abstraction
//!
//! The wire protocol lives behind [`Printer`]. [`SpoolPrinter`] stands in
//! for the hardware by writing each printed image into a spool directory.

use super::BackendResult;
use image::GrayImage;
use std::path::PathBuf;
use tracing::{debug, info};

/// Printer interface consumed by the capture pipeline
pub trait Printer {
    /// Print a grayscale raster; `feed_after` advances paper past the tear bar
    fn print_image(&mut self, image: &GrayImage, feed_after: bool) -> BackendResult<()>;

    /// Advance the paper by `lines` text lines
    fn feed(&mut self, lines: u8) -> BackendResult<()>;
}

/// Printer that spools rasters to PNG files
pub struct SpoolPrinter {
    spool_dir: PathBuf,
    printed: usize,
}

impl SpoolPrinter {
    pub fn new(spool_dir: PathBuf) -> Self {
        Self {
            spool_dir,
            printed: 0,
        }
    }

    /// Number of images printed since creation
    pub fn printed(&self) -> usize {
        self.printed
    }
}

impl Printer for SpoolPrinter {
    fn print_image(&mut self, image: &GrayImage, feed_after: bool) -> BackendResult<()> {
        std::fs::create_dir_all(&self.spool_dir)?;
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = self
            .spool_dir
            .join(format!("print_{}_{:03}.png", timestamp, self.printed));
        image.save(&path)?;
        self.printed += 1;
        info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            feed_after,
            "Image spooled to printer"
        );
        Ok(())
    }

    fn feed(&mut self, lines: u8) -> BackendResult<()> {
        debug!(lines, "Printer feed");
        Ok(())
    }
}
