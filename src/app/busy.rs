// SPDX-License-Identifier: GPL-3.0-only

//! Busy indicator
//!
//! While the main thread blocks on the camera or a decode, a background
//! thread animates the active screen's label and spinner slots. The
//! shared `busy` flag is the only stop signal.
//!
//! Only one side draws at a time: the display is moved into the spinner
//! thread when it starts and handed back by [`BusyIndicator::finish`],
//! which clears the flag and joins before returning.

use crate::backends::Display;
use crate::constants::busy::{FRAME_COUNT, FRAME_INTERVAL, LABEL_ICON, frame_icon};
use crate::errors::{AppError, AppResult};
use crate::ui::{Button, IconRegistry};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Label and spinner buttons lent to the indicator thread
#[derive(Debug, Clone)]
pub struct BusySlots {
    pub label: Button,
    pub spinner: Button,
}

/// What the indicator hands back once joined
pub struct Finished {
    pub display: Box<dyn Display>,
    /// Slot buttons with their decorations cleared
    pub slots: Option<BusySlots>,
}

/// Running spinner thread
pub struct BusyIndicator {
    handle: Option<JoinHandle<Finished>>,
    busy: Arc<AtomicBool>,
}

impl BusyIndicator {
    /// Raise `busy` and start animating `slots` on `display`
    pub fn start(
        busy: Arc<AtomicBool>,
        display: Box<dyn Display>,
        slots: Option<BusySlots>,
        icons: IconRegistry,
    ) -> Self {
        busy.store(true, Ordering::SeqCst);
        let flag = Arc::clone(&busy);

        let handle = thread::spawn(move || {
            let mut display = display;
            let mut slots = slots;
            if let Some(slots) = slots.as_mut() {
                animate(display.as_mut(), slots, &icons, &flag);
                slots.label.set_background_icon(&icons, None);
                slots.spinner.set_background_icon(&icons, None);
            } else {
                while flag.load(Ordering::SeqCst) {
                    thread::sleep(FRAME_INTERVAL);
                }
            }
            debug!("Busy indicator exiting");
            Finished { display, slots }
        });

        Self {
            handle: Some(handle),
            busy,
        }
    }

    /// Whether the thread has not finished yet
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Lower `busy`, wait for the thread and take the display back
    pub fn finish(mut self) -> AppResult<Finished> {
        self.busy.store(false, Ordering::SeqCst);
        let handle = self
            .handle
            .take()
            .ok_or_else(|| AppError::Display("Busy indicator already joined".to_string()))?;
        handle
            .join()
            .map_err(|_| AppError::Display("Busy indicator thread panicked".to_string()))
    }
}

impl Drop for BusyIndicator {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!("BusyIndicator dropped, stopping spinner");
            self.busy.store(false, Ordering::SeqCst);
            if handle.join().is_err() {
                warn!("Busy indicator thread panicked");
            }
        }
    }
}

/// Paint the label once, then cycle spinner frames until `busy` drops
fn animate(display: &mut dyn Display, slots: &mut BusySlots, icons: &IconRegistry, busy: &AtomicBool) {
    slots.label.set_background_icon(icons, Some(LABEL_ICON));
    if let Err(e) = slots.label.draw(display).and_then(|_| display.present()) {
        warn!(error = %e, "Busy label draw failed");
    }

    let mut frame = 0;
    while busy.load(Ordering::SeqCst) {
        slots
            .spinner
            .set_background_icon(icons, Some(&frame_icon(frame)));
        if let Err(e) = slots.spinner.draw(display).and_then(|_| display.present()) {
            warn!(error = %e, frame, "Spinner draw failed");
        }
        frame = (frame + 1) % FRAME_COUNT;
        thread::sleep(FRAME_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{BackendResult, Framebuffer};
    use crate::ui::{Icon, Point, Rect};
    use image::{Rgba, RgbaImage};
    use std::sync::Mutex;
    use std::time::Duration;

    fn icons() -> IconRegistry {
        let solid = |v| Some(RgbaImage::from_pixel(2, 2, Rgba([v, v, v, 255])));
        let mut all = vec![Icon::new(LABEL_ICON, solid(200))];
        for n in 0..FRAME_COUNT {
            all.push(Icon::new(frame_icon(n), solid(10 + n as u8)));
        }
        IconRegistry::from_icons(all)
    }

    fn slots() -> BusySlots {
        BusySlots {
            label: Button::new(Rect::new(0, 0, 4, 4)),
            spinner: Button::new(Rect::new(4, 0, 4, 4)),
        }
    }

    #[test]
    fn test_start_raises_and_finish_lowers_flag() {
        let busy = Arc::new(AtomicBool::new(false));
        let indicator = BusyIndicator::start(
            Arc::clone(&busy),
            Box::new(Framebuffer::new(8, 4)),
            Some(slots()),
            icons(),
        );
        assert!(busy.load(Ordering::SeqCst));
        thread::sleep(Duration::from_millis(50));

        let finished = indicator.finish().unwrap();
        assert!(!busy.load(Ordering::SeqCst));
        let slots = finished.slots.unwrap();
        assert!(slots.label.background().is_none());
        assert!(slots.spinner.background().is_none());
    }

    /// Framebuffer the test can inspect while the spinner owns the display
    struct SharedFramebuffer(Arc<Mutex<Framebuffer>>);

    impl Display for SharedFramebuffer {
        fn size(&self) -> (u32, u32) {
            self.0.lock().unwrap().size()
        }
        fn blit(&mut self, image: &image::RgbImage, position: Point) -> BackendResult<()> {
            self.0.lock().unwrap().blit(image, position)
        }
        fn blit_icon(&mut self, bitmap: &RgbaImage, position: Point) -> BackendResult<()> {
            self.0.lock().unwrap().blit_icon(bitmap, position)
        }
        fn fill_rect(&mut self, color: [u8; 3], rect: Rect) -> BackendResult<()> {
            self.0.lock().unwrap().fill_rect(color, rect)
        }
        fn present(&mut self) -> BackendResult<()> {
            self.0.lock().unwrap().present()
        }
    }

    #[test]
    fn test_label_and_spinner_are_painted() {
        let fb = Arc::new(Mutex::new(Framebuffer::new(8, 4)));
        let busy = Arc::new(AtomicBool::new(false));
        let indicator = BusyIndicator::start(
            Arc::clone(&busy),
            Box::new(SharedFramebuffer(Arc::clone(&fb))),
            Some(slots()),
            icons(),
        );
        thread::sleep(Duration::from_millis(400));
        indicator.finish().unwrap();

        let fb = fb.lock().unwrap();
        // Label icon centered in (0,0,4,4)
        assert_eq!(fb.pixel(1, 1), Some([200, 200, 200]));
        // Some spinner frame centered in (4,0,4,4)
        let spinner = fb.pixel(5, 1).unwrap()[0];
        assert!((10..10 + FRAME_COUNT as u8).contains(&spinner));
        // Label present plus at least two spinner frames
        assert!(fb.presented() >= 3);
    }

    #[test]
    fn test_without_slots_still_joins() {
        let busy = Arc::new(AtomicBool::new(false));
        let indicator =
            BusyIndicator::start(Arc::clone(&busy), Box::new(Framebuffer::new(1, 1)), None, icons());
        assert!(indicator.is_running());
        let finished = indicator.finish().unwrap();
        assert!(finished.slots.is_none());
        assert!(!busy.load(Ordering::SeqCst));
    }

    #[test]
    fn test_drop_stops_thread() {
        let busy = Arc::new(AtomicBool::new(false));
        let indicator =
            BusyIndicator::start(Arc::clone(&busy), Box::new(Framebuffer::new(1, 1)), None, icons());
        drop(indicator);
        assert!(!busy.load(Ordering::SeqCst));
    }
}
