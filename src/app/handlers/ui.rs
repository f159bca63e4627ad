// SPDX-License-Identifier: GPL-3.0-only

//! Screen navigation and settings handlers

use crate::app::App;
use crate::app::screens::{self, EFFECT_LABEL_SLOT};
use crate::app::state::{Action, ScreenMode, ViewTarget};
use crate::constants::{EFFECTS, effect_icon};
use crate::errors::AppResult;
use tracing::{debug, warn};

impl App {
    // =========================================================================
    // Action Dispatch
    // =========================================================================

    /// Apply a button action
    ///
    /// Recoverable failures are handled inside; only display failures
    /// come back as errors.
    pub fn handle_action(&mut self, action: Action) -> AppResult<()> {
        debug!(?action, mode = %self.mode, "Handling action");
        match action {
            Action::Quit => {
                self.quit();
                Ok(())
            }
            Action::SettingNav(delta) => {
                self.mode = self.mode.cycle_settings(delta, screens::last_mode());
                Ok(())
            }
            Action::EffectNav(delta) => {
                let count = EFFECTS.len() as i32;
                let next = (self.effect as i32 + delta).rem_euclid(count);
                self.set_effect(next as usize);
                Ok(())
            }
            Action::View(ViewTarget::Settings) => {
                self.mode = self.settings_mode;
                Ok(())
            }
            Action::View(ViewTarget::Playback) => self.open_playback(),
            Action::View(ViewTarget::Shutter) => self.take_picture(),
            Action::Done => {
                self.leave_to_viewfinder();
                Ok(())
            }
            Action::ImageNav(0) => {
                self.mode = ScreenMode::DELETE_CONFIRM;
                Ok(())
            }
            Action::ImageNav(direction) => self.show_next_image(direction),
            Action::Delete(confirmed) => self.delete_current(confirmed),
        }
    }

    /// Remember the settings page and persist settings when leaving one
    fn leave_to_viewfinder(&mut self) {
        if self.mode.is_settings() {
            self.settings_mode = self.mode;
            self.save_settings();
        }
        self.mode = ScreenMode::VIEWFINDER;
    }

    /// Select an effect on the camera and show its label
    ///
    /// Out-of-range indices are ignored.
    pub(crate) fn set_effect(&mut self, effect: usize) {
        let Some(name) = EFFECTS.get(effect) else {
            warn!(effect, "Effect index out of range");
            return;
        };
        self.effect = effect;
        if let Err(e) = self.camera.set_image_effect(name) {
            warn!(effect = name, error = %e, "Camera rejected image effect");
        }
        if let Some(label) =
            self.screens[ScreenMode::EFFECT_SETTINGS.index()].button_mut(EFFECT_LABEL_SLOT)
        {
            label.set_background_icon(&self.icons, Some(&effect_icon(effect)));
        }
        debug!(effect = name, "Effect selected");
    }
}
