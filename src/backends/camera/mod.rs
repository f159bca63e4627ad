// SPDX-License-Identifier: GPL-3.0-only

//! Camera abstraction
//!
//! The booth drives a single camera that toggles between two profiles:
//! a low-resolution preview profile used for the live viewfinder and a
//! full-resolution profile used for still captures.

pub mod virtual_camera;

pub use virtual_camera::VirtualCamera;

use super::BackendResult;
use crate::constants::camera as profile;
use std::path::Path;
use tracing::debug;

/// Normalised sensor crop (fractions of the full frame)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crop {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Crop {
    /// The whole sensor area
    pub const FULL: Crop = Crop {
        x: profile::FULL_CROP.0,
        y: profile::FULL_CROP.1,
        width: profile::FULL_CROP.2,
        height: profile::FULL_CROP.3,
    };
}

impl Default for Crop {
    fn default() -> Self {
        Self::FULL
    }
}

/// Resolution and crop applied together when switching camera modes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureProfile {
    pub width: u32,
    pub height: u32,
    pub crop: Crop,
}

impl CaptureProfile {
    /// Live viewfinder profile
    pub const PREVIEW: CaptureProfile = CaptureProfile {
        width: profile::PREVIEW_RESOLUTION.0,
        height: profile::PREVIEW_RESOLUTION.1,
        crop: Crop::FULL,
    };

    /// Still capture profile
    pub const STILL: CaptureProfile = CaptureProfile {
        width: profile::CAPTURE_RESOLUTION.0,
        height: profile::CAPTURE_RESOLUTION.1,
        crop: Crop::FULL,
    };

    /// Size of one raw I420 preview frame for this profile
    pub fn raw_frame_len(&self) -> usize {
        (self.width * self.height * 3 / 2) as usize
    }

    /// Apply this profile to a camera
    pub fn apply(&self, camera: &mut dyn Camera) -> BackendResult<()> {
        debug!(width = self.width, height = self.height, crop = ?self.crop, "Applying camera profile");
        camera.set_resolution(self.width, self.height)?;
        camera.set_crop(self.crop)
    }
}

/// Camera driver interface consumed by the booth
pub trait Camera {
    /// Set the sensor output resolution
    fn set_resolution(&mut self, width: u32, height: u32) -> BackendResult<()>;

    /// Set the sensor crop
    fn set_crop(&mut self, crop: Crop) -> BackendResult<()>;

    /// Select an image effect by name (see [`crate::constants::EFFECTS`])
    fn set_image_effect(&mut self, effect: &str) -> BackendResult<()>;

    /// Capture a still JPEG to `path` through the still port
    fn capture_to_file(&mut self, path: &Path) -> BackendResult<()>;

    /// Capture one raw preview frame (I420) through the video port into `buffer`
    fn capture_raw_frame(&mut self, buffer: &mut [u8]) -> BackendResult<()>;
}
