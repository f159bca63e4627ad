// SPDX-License-Identifier: GPL-3.0-only

//! Photo booth application
//!
//! [`App`] owns every collaborator and the booth state. The main loop
//! alternates between draining touch input (each tap routed through the
//! active screen to a single action dispatcher) and rendering one frame.
//!
//! # Modules
//!
//! - [`state`]: Screen modes, actions and capture state
//! - [`screens`]: Layout and behaviour tables for every screen
//! - [`busy`]: Spinner thread shown during blocking calls
//! - [`view`]: Frame composition
//! - [`handlers`]: Action handlers grouped by concern

pub mod busy;
pub mod handlers;
pub mod screens;
pub mod state;
pub mod view;

pub use state::{Action, CachedImage, CaptureState, ScreenMode, ViewTarget};

use crate::backends::{Camera, CaptureProfile, Display, InputEvent, InputSource, Printer};
use crate::config::{BoothConfig, Owner};
use crate::constants::STATIC_POLL_INTERVAL;
use crate::errors::{AppError, AppResult};
use crate::media::RawFrameConverter;
use crate::pipelines::photo::PhotoPipeline;
use crate::settings::{Settings, SettingsStore};
use crate::storage::PhotoStore;
use crate::ui::{Dispatch, IconRegistry, Screen};
use busy::{BusyIndicator, BusySlots};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Hardware collaborators handed to the booth
pub struct Devices {
    pub camera: Box<dyn Camera>,
    pub converter: Box<dyn RawFrameConverter>,
    pub printer: Box<dyn Printer>,
    pub display: Box<dyn Display>,
    pub input: Box<dyn InputSource>,
}

pub struct App {
    config: BoothConfig,
    icons: IconRegistry,
    screens: Vec<Screen>,
    camera: Box<dyn Camera>,
    converter: Box<dyn RawFrameConverter>,
    printer: Box<dyn Printer>,
    /// Lent to the busy indicator while a blocking call runs
    display: Option<Box<dyn Display>>,
    input: Box<dyn InputSource>,
    store: PhotoStore,
    settings_store: SettingsStore,
    pipeline: PhotoPipeline,
    preview_profile: CaptureProfile,
    preview_buffer: Vec<u8>,
    mode: ScreenMode,
    /// Mode drawn by the last render; `None` forces a redraw
    prior_mode: Option<ScreenMode>,
    settings_mode: ScreenMode,
    effect: usize,
    capture: CaptureState,
    running: bool,
}

impl App {
    /// Build the screens, put the camera in preview mode and restore settings
    pub fn new(config: BoothConfig, icons: IconRegistry, devices: Devices) -> AppResult<Self> {
        let Devices {
            mut camera,
            converter,
            printer,
            display,
            input,
        } = devices;

        let preview_profile = CaptureProfile::PREVIEW;
        preview_profile
            .apply(camera.as_mut())
            .map_err(|e| AppError::Camera(e.to_string()))?;

        let screens = screens::build(&icons);
        let store = PhotoStore::new(config.photos_dir.clone(), Owner::invoking_user());
        let settings_store = SettingsStore::new(config.settings_path.clone());

        let mut app = Self {
            config,
            icons,
            screens,
            camera,
            converter,
            printer,
            display: Some(display),
            input,
            store,
            settings_store,
            pipeline: PhotoPipeline::new(),
            preview_buffer: vec![0; preview_profile.raw_frame_len()],
            preview_profile,
            mode: ScreenMode::VIEWFINDER,
            prior_mode: None,
            settings_mode: ScreenMode::EFFECT_SETTINGS,
            effect: 0,
            capture: CaptureState::default(),
            running: false,
        };

        // Icons are bound by now, so the effect label can be swapped
        if let Some(settings) = app.settings_store.load() {
            info!(effect = settings.effect, "Restoring stored settings");
            app.set_effect(settings.effect);
        }

        Ok(app)
    }

    /// Run until quit is confirmed or an interrupt arrives
    pub fn run(&mut self) -> AppResult<()> {
        info!(photos = %self.store.dir().display(), "Photo booth running");
        self.running = true;

        while self.running {
            self.drain_input()?;
            if !self.running {
                break;
            }
            self.render()?;
            self.prior_mode = Some(self.mode);
        }

        info!("Photo booth stopped");
        Ok(())
    }

    /// Handle input until the next render is due
    ///
    /// Live modes render every iteration; static modes keep polling until
    /// an action changes the mode or forces a refresh.
    fn drain_input(&mut self) -> AppResult<()> {
        loop {
            let timeout = if self.mode.is_live() {
                Duration::ZERO
            } else {
                STATIC_POLL_INTERVAL
            };
            let events = self
                .input
                .poll(timeout)
                .map_err(|e| AppError::Other(format!("Input error: {}", e)))?;

            for event in events {
                self.handle_event(event)?;
                if !self.running {
                    return Ok(());
                }
            }

            if self.mode.is_live() || self.prior_mode != Some(self.mode) {
                return Ok(());
            }
        }
    }

    fn handle_event(&mut self, event: InputEvent) -> AppResult<()> {
        match event {
            InputEvent::Tap(point) => match self.screens[self.mode.index()].dispatch(point) {
                Dispatch::Action(action) => self.handle_action(action),
                Dispatch::Consumed | Dispatch::Ignored => Ok(()),
            },
            InputEvent::Interrupt => {
                info!("Interrupted, shutting down");
                self.quit();
                Ok(())
            }
        }
    }

    /// Run `op` with the busy indicator animating the current screen
    ///
    /// The display is unavailable to `op`. Afterwards the spinner slots are
    /// cleared and the next render is forced to redraw everything.
    pub(crate) fn while_busy<T>(&mut self, op: impl FnOnce(&mut Self) -> T) -> AppResult<T> {
        let display = self
            .display
            .take()
            .ok_or_else(|| AppError::Display("Busy indicator already running".to_string()))?;
        let mode = self.mode;
        let screen = &self.screens[mode.index()];
        let slots = screen.busy_slots().and_then(|(label, spinner)| {
            Some(BusySlots {
                label: screen.button(label)?.clone(),
                spinner: screen.button(spinner)?.clone(),
            })
        });

        let indicator = BusyIndicator::start(
            Arc::clone(&self.capture.busy),
            display,
            slots,
            self.icons.clone(),
        );
        let result = op(self);
        let finished = indicator.finish()?;

        self.display = Some(finished.display);
        let screen = &mut self.screens[mode.index()];
        if let (Some(slots), Some((label, spinner))) = (finished.slots, screen.busy_slots()) {
            if let Some(button) = screen.button_mut(label) {
                *button = slots.label;
            }
            if let Some(button) = screen.button_mut(spinner) {
                *button = slots.spinner;
            }
        }
        self.prior_mode = None;
        debug!(%mode, "Busy period finished");
        Ok(result)
    }

    fn save_settings(&self) {
        self.settings_store.save(&Settings {
            effect: self.effect,
        });
    }

    fn quit(&mut self) {
        self.save_settings();
        self.running = false;
    }

    pub fn mode(&self) -> ScreenMode {
        self.mode
    }

    /// Settings page the gear button returns to
    pub fn settings_mode(&self) -> ScreenMode {
        self.settings_mode
    }

    /// Index into [`crate::constants::EFFECTS`]
    pub fn effect(&self) -> usize {
        self.effect
    }

    pub fn capture_state(&self) -> &CaptureState {
        &self.capture
    }

    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    pub fn store(&self) -> &PhotoStore {
        &self.store
    }

    pub fn config(&self) -> &BoothConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the next render must redraw regardless of mode
    pub fn refresh_pending(&self) -> bool {
        self.prior_mode != Some(self.mode)
    }
}
