// SPDX-License-Identifier: GPL-3.0-only

//! Tappable screen regions
//!
//! A button is a fixed rectangle with optional decorations (fill colour,
//! background icon, foreground icon) and an optional action. Buttons
//! without an action still consume taps, which lets a screen declare
//! passive regions that shield the buttons declared after them.

use super::geom::{Point, Rect};
use super::icons::{Icon, IconRegistry};
use crate::app::Action;
use crate::backends::{BackendResult, Display};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Button {
    bounds: Rect,
    fill: Option<[u8; 3]>,
    background: Option<Arc<Icon>>,
    foreground: Option<Arc<Icon>>,
    action: Option<Action>,
}

impl Button {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            fill: None,
            background: None,
            foreground: None,
            action: None,
        }
    }

    pub fn with_fill(mut self, color: [u8; 3]) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn action(&self) -> Option<Action> {
        self.action
    }

    pub fn background(&self) -> Option<&Arc<Icon>> {
        self.background.as_ref()
    }

    pub fn foreground(&self) -> Option<&Arc<Icon>> {
        self.foreground.as_ref()
    }

    /// Whether `point` lies within the bounds, edges inclusive
    pub fn hit_test(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    /// Resolve the background icon by name, or clear it with `None`
    ///
    /// An unknown name leaves the current icon untouched.
    pub fn set_background_icon(&mut self, icons: &IconRegistry, name: Option<&str>) {
        match name {
            None => self.background = None,
            Some(name) => {
                if let Some(icon) = icons.get(name) {
                    self.background = Some(icon);
                }
            }
        }
    }

    /// Resolve the foreground icon by name, or clear it with `None`
    pub fn set_foreground_icon(&mut self, icons: &IconRegistry, name: Option<&str>) {
        match name {
            None => self.foreground = None,
            Some(name) => {
                if let Some(icon) = icons.get(name) {
                    self.foreground = Some(icon);
                }
            }
        }
    }

    /// Paint fill, then background icon, then foreground icon
    pub fn draw(&self, display: &mut dyn Display) -> BackendResult<()> {
        if let Some(color) = self.fill {
            display.fill_rect(color, self.bounds)?;
        }
        for icon in [&self.background, &self.foreground].into_iter().flatten() {
            if let Some(bitmap) = &icon.bitmap {
                let origin = self.bounds.centered(bitmap.width(), bitmap.height());
                display.blit_icon(bitmap, origin)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::Framebuffer;
    use image::{Rgba, RgbaImage};

    fn registry() -> IconRegistry {
        IconRegistry::from_icons([
            Icon::new("dot", Some(RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255])))),
            Icon::new("blank", None),
        ])
    }

    #[test]
    fn test_hit_test_inclusive_edges() {
        let button = Button::new(Rect::new(0, 188, 156, 52));
        assert!(button.hit_test(Point::new(0, 188)));
        assert!(button.hit_test(Point::new(155, 239)));
        assert!(!button.hit_test(Point::new(156, 239)));
        assert!(!button.hit_test(Point::new(155, 240)));
        assert!(!button.hit_test(Point::new(-1, 200)));
        assert!(!button.hit_test(Point::new(10, 187)));
    }

    #[test]
    fn test_background_icon_set_and_clear() {
        let icons = registry();
        let mut button = Button::new(Rect::new(0, 0, 10, 10));
        button.set_background_icon(&icons, Some("dot"));
        assert_eq!(button.background().unwrap().name, "dot");

        button.set_background_icon(&icons, Some("missing"));
        assert_eq!(button.background().unwrap().name, "dot");

        button.set_background_icon(&icons, None);
        assert!(button.background().is_none());
    }

    #[test]
    fn test_draw_centers_icon_over_fill() {
        let icons = registry();
        let mut button = Button::new(Rect::new(1, 1, 5, 5)).with_fill([10, 20, 30]);
        button.set_background_icon(&icons, Some("dot"));
        button.set_foreground_icon(&icons, Some("blank"));

        let mut fb = Framebuffer::new(8, 8);
        button.draw(&mut fb).unwrap();

        // (5 - 2) / 2 = 1 → icon at (2, 2)..(3, 3)
        assert_eq!(fb.pixel(1, 1), Some([10, 20, 30]));
        assert_eq!(fb.pixel(2, 2), Some([255, 255, 255]));
        assert_eq!(fb.pixel(3, 3), Some([255, 255, 255]));
        assert_eq!(fb.pixel(4, 4), Some([10, 20, 30]));
        assert_eq!(fb.pixel(0, 0), Some([0, 0, 0]));
    }
}
