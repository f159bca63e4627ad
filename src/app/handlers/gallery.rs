// SPDX-License-Identifier: GPL-3.0-only

//! Gallery navigation handlers

use crate::app::App;
use crate::app::state::{CachedImage, ScreenMode};
use crate::app::view::show_image;
use crate::constants::display::{HEIGHT, WIDTH};
use crate::errors::{AppError, AppResult, PhotoError};
use image::RgbImage;
use tracing::{debug, info, warn};

impl App {
    /// Play button: show the cached photo, else the newest one on disk
    pub(crate) fn open_playback(&mut self) -> AppResult<()> {
        if let Some(cached) = &self.capture.cached {
            self.capture.last_loaded_index = cached.index;
            self.mode = ScreenMode::PLAYBACK;
            self.prior_mode = None;
            return Ok(());
        }

        match self.store.range() {
            Some((_, newest)) => self.load_image(newest),
            None => {
                debug!("Gallery is empty");
                self.mode = ScreenMode::EMPTY_GALLERY;
                Ok(())
            }
        }
    }

    /// Load photo `index` for playback
    pub(crate) fn load_image(&mut self, index: i32) -> AppResult<()> {
        let decoded = self.while_busy(|app| app.decode_photo(index))?;
        self.apply_loaded(index, decoded);
        Ok(())
    }

    /// Step to the nearest existing photo in `direction` from the current one
    pub(crate) fn show_next_image(&mut self, direction: i32) -> AppResult<()> {
        let from = self.capture.last_loaded_index;
        let found = self.while_busy(|app| {
            app.store
                .find_next(from, direction)
                .map(|index| (index, app.decode_photo(index)))
        })?;

        match found {
            Some((index, decoded)) => self.apply_loaded(index, decoded),
            None => self.show_empty_gallery(),
        }
        Ok(())
    }

    /// Delete confirmation: remove the current photo and move to a neighbour
    pub(crate) fn delete_current(&mut self, confirmed: bool) -> AppResult<()> {
        self.mode = ScreenMode::PLAYBACK;
        self.prior_mode = None;
        if !confirmed {
            return Ok(());
        }

        let index = self.capture.last_loaded_index;
        if let Err(e) = self.store.delete(index) {
            warn!(index, error = %e, "Failed to delete photo");
        }
        self.capture.cached = None;

        if self.store.range().is_none() {
            info!("Last photo deleted");
            self.show_empty_gallery();
            return Ok(());
        }

        let display = self
            .display
            .as_mut()
            .ok_or_else(|| AppError::Display("Display unavailable".to_string()))?;
        show_image(display.as_mut(), None)
            .and_then(|_| display.present())
            .map_err(|e| AppError::Display(e.to_string()))?;
        self.show_next_image(-1)
    }

    fn decode_photo(&self, index: i32) -> Result<RgbImage, PhotoError> {
        self.pipeline
            .decode_for_display(&self.store.path_for(index), WIDTH, HEIGHT)
    }

    /// Switch to playback of `index`; an undecodable photo plays back as blank
    fn apply_loaded(&mut self, index: i32, decoded: Result<RgbImage, PhotoError>) {
        self.capture.cached = match decoded {
            Ok(image) => Some(CachedImage { index, image }),
            Err(e) => {
                warn!(index, error = %e, "Failed to load photo");
                None
            }
        };
        self.capture.last_loaded_index = index;
        self.mode = ScreenMode::PLAYBACK;
        self.prior_mode = None;
        debug!(index, "Photo loaded");
    }

    fn show_empty_gallery(&mut self) {
        self.capture.cached = None;
        self.capture.last_loaded_index = -1;
        self.mode = ScreenMode::EMPTY_GALLERY;
    }
}
