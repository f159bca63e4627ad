// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Display geometry
pub mod display {
    /// Framebuffer width in pixels
    pub const WIDTH: u32 = 320;

    /// Framebuffer height in pixels
    pub const HEIGHT: u32 = 240;

    /// Bottom status bar region (x, y, w, h), redrawn every frame under the buttons
    pub const STATUS_BAR: (i32, i32, u32, u32) = (0, 176, 320, 64);

    /// Status bar fill colour
    pub const STATUS_BAR_COLOR: [u8; 3] = [0, 0, 20];

    /// Letterbox background colour
    pub const BACKGROUND: [u8; 3] = [0, 0, 0];
}

/// Camera resolution/crop profiles
pub mod camera {
    /// Still capture resolution
    pub const CAPTURE_RESOLUTION: (u32, u32) = (1296, 972);

    /// Live preview resolution (matches the display)
    pub const PREVIEW_RESOLUTION: (u32, u32) = (super::display::WIDTH, super::display::HEIGHT);

    /// Normalised crop covering the whole sensor
    pub const FULL_CROP: (f32, f32, f32, f32) = (0.0, 0.0, 1.0, 1.0);
}

/// Photo storage naming
pub mod storage {
    /// Filename prefix before the 4-digit sequence number
    pub const FILE_PREFIX: &str = "IMG_";

    /// Filename suffix after the sequence number
    pub const FILE_SUFFIX: &str = ".JPG";

    /// Highest sequence number; allocation and navigation wrap past it to 0
    pub const MAX_INDEX: i32 = 9999;

    /// Number of distinct sequence numbers
    pub const INDEX_SPACE: i32 = MAX_INDEX + 1;

    /// Directory mode: owner rwx, group r-x, other r-x
    pub const DIR_MODE: u32 = 0o755;

    /// Photo file mode: owner rw, group r, other r
    pub const FILE_MODE: u32 = 0o644;
}

/// Print post-processing chain
pub mod print {
    /// Width the capture is scaled to before cropping
    pub const TARGET_WIDTH: u32 = 700;

    /// Height the scaled capture is cropped to
    pub const TARGET_HEIGHT: u32 = 384;

    /// Sharpness enhancement factor
    pub const SHARPNESS: f32 = 3.0;

    /// Brightness enhancement factor
    pub const BRIGHTNESS: f32 = 1.2;

    /// Contrast enhancement factor
    pub const CONTRAST: f32 = 2.0;

    /// JPEG quality used when overwriting the stored photo
    pub const JPEG_QUALITY: u8 = 90;
}

/// Busy indicator animation
pub mod busy {
    use super::Duration;

    /// Delay between spinner frames
    pub const FRAME_INTERVAL: Duration = Duration::from_millis(150);

    /// Number of spinner frames (icons `work-0` .. `work-4`)
    pub const FRAME_COUNT: usize = 5;

    /// Icon shown in the label slot while busy
    pub const LABEL_ICON: &str = "working";

    /// Spinner frame icon name
    pub fn frame_icon(n: usize) -> String {
        format!("work-{}", n)
    }
}

/// Poll timeout while draining input in static screen modes
pub const STATIC_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Image effects supported by the camera, in cycling order
///
/// A fixed list is used because several effects advertised by camera
/// firmware are invalid on the preview port or have no visible result.
pub const EFFECTS: [&str; 17] = [
    "none",
    "sketch",
    "gpen",
    "pastel",
    "watercolor",
    "oilpaint",
    "hatch",
    "negative",
    "colorswap",
    "posterise",
    "denoise",
    "blur",
    "film",
    "washedout",
    "emboss",
    "cartoon",
    "solarize",
];

/// Icon name for an effect's label on the effect settings page
pub fn effect_icon(effect: usize) -> String {
    format!("fx-{}", EFFECTS[effect % EFFECTS.len()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_icon_names() {
        assert_eq!(effect_icon(0), "fx-none");
        assert_eq!(effect_icon(16), "fx-solarize");
        assert_eq!(effect_icon(EFFECTS.len()), "fx-none");
    }

    #[test]
    fn test_spinner_frame_names() {
        assert_eq!(busy::frame_icon(0), "work-0");
        assert_eq!(busy::frame_icon(busy::FRAME_COUNT - 1), "work-4");
    }
}
