// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use image::RgbImage;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Index into the screen table
///
/// Modes at or above [`ScreenMode::VIEWFINDER`] are live: they redraw every
/// loop iteration. Lower modes are static and redraw only on change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScreenMode(pub usize);

impl ScreenMode {
    pub const PLAYBACK: ScreenMode = ScreenMode(0);
    pub const DELETE_CONFIRM: ScreenMode = ScreenMode(1);
    pub const EMPTY_GALLERY: ScreenMode = ScreenMode(2);
    pub const VIEWFINDER: ScreenMode = ScreenMode(3);
    /// First settings page
    pub const EFFECT_SETTINGS: ScreenMode = ScreenMode(4);
    /// Last settings page
    pub const QUIT_CONFIRM: ScreenMode = ScreenMode(5);

    pub const fn index(self) -> usize {
        self.0
    }

    pub const fn is_live(self) -> bool {
        self.0 >= Self::VIEWFINDER.0
    }

    pub const fn is_settings(self) -> bool {
        self.0 >= Self::EFFECT_SETTINGS.0
    }

    /// Step through the settings pages, wrapping within `first..=last`
    pub fn cycle_settings(self, delta: i32, last: ScreenMode) -> ScreenMode {
        let first = Self::EFFECT_SETTINGS.0 as i32;
        let span = last.0 as i32 - first + 1;
        if span <= 0 {
            return self;
        }
        let offset = (self.0 as i32 - first + delta).rem_euclid(span);
        ScreenMode((first + offset) as usize)
    }
}

impl std::fmt::Display for ScreenMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match *self {
            Self::PLAYBACK => "playback",
            Self::DELETE_CONFIRM => "delete-confirm",
            Self::EMPTY_GALLERY => "empty-gallery",
            Self::VIEWFINDER => "viewfinder",
            Self::EFFECT_SETTINGS => "effect-settings",
            Self::QUIT_CONFIRM => "quit-confirm",
            _ => return write!(f, "mode-{}", self.0),
        };
        f.write_str(name)
    }
}

/// Destinations reachable from the viewfinder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewTarget {
    /// Last used settings page
    Settings,
    /// Gallery playback
    Playback,
    /// Take a picture
    Shutter,
}

/// Behaviour attached to a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Persist settings and leave the main loop
    Quit,
    /// Previous/next settings page
    SettingNav(i32),
    /// Previous/next image effect
    EffectNav(i32),
    /// Viewfinder buttons
    View(ViewTarget),
    /// Leave settings or playback for the viewfinder
    Done,
    /// Previous/next photo; `0` asks to delete the current one
    ImageNav(i32),
    /// Delete confirmation answer
    Delete(bool),
}

/// Decoded photo kept for playback, with the sequence number it came from
#[derive(Debug, Clone)]
pub struct CachedImage {
    pub index: i32,
    pub image: RgbImage,
}

/// State touched by capture and gallery navigation
#[derive(Debug)]
pub struct CaptureState {
    /// Shared with the busy indicator thread; true while a blocking call runs
    pub busy: Arc<AtomicBool>,
    /// Sequence number of the most recent capture, -1 if none yet
    pub last_saved_index: i32,
    /// Sequence number of the photo being shown, -1 if none
    pub last_loaded_index: i32,
    /// Image shown in playback modes
    pub cached: Option<CachedImage>,
}

impl Default for CaptureState {
    fn default() -> Self {
        Self {
            busy: Arc::new(AtomicBool::new(false)),
            last_saved_index: -1,
            last_loaded_index: -1,
            cached: None,
        }
    }
}

impl CaptureState {
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }
}
