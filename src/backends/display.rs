// SPDX-License-Identifier: GPL-3.0-only

//! Display abstraction and the in-memory framebuffer
//!
//! Drawing goes into an RGB framebuffer; `present` pushes it to the
//! physical output. The trait is `Send` so the busy indicator thread
//! can take ownership of the display for the duration of a blocking call.

use super::BackendResult;
use crate::ui::{Point, Rect};
use image::{Rgb, RgbImage, RgbaImage};

/// Output surface consumed by the renderer and the busy indicator
pub trait Display: Send {
    /// Surface size in pixels
    fn size(&self) -> (u32, u32);

    /// Copy an opaque image with its top-left corner at `position`
    fn blit(&mut self, image: &RgbImage, position: Point) -> BackendResult<()>;

    /// Alpha-blend an icon bitmap with its top-left corner at `position`
    fn blit_icon(&mut self, bitmap: &RgbaImage, position: Point) -> BackendResult<()>;

    /// Fill a rectangle with a solid colour
    fn fill_rect(&mut self, color: [u8; 3], rect: Rect) -> BackendResult<()>;

    /// Make everything drawn so far visible
    fn present(&mut self) -> BackendResult<()>;
}

/// RGB framebuffer with clipped drawing primitives
#[derive(Debug, Clone)]
pub struct Framebuffer {
    pixels: RgbImage,
    presented: usize,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbImage::new(width, height),
            presented: 0,
        }
    }

    /// Current framebuffer contents
    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// Number of completed `present` calls
    pub fn presented(&self) -> usize {
        self.presented
    }

    /// Pixel at (x, y), if inside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Visible intersection of a `width` x `height` area at `position`,
    /// as (dest_x, dest_y, src_x, src_y, w, h)
    fn clip(&self, position: Point, width: u32, height: u32) -> Option<(u32, u32, u32, u32, u32, u32)> {
        let (fb_w, fb_h) = self.pixels.dimensions();
        let x0 = position.x.max(0);
        let y0 = position.y.max(0);
        let x1 = (position.x + width as i32).min(fb_w as i32);
        let y1 = (position.y + height as i32).min(fb_h as i32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((
            x0 as u32,
            y0 as u32,
            (x0 - position.x) as u32,
            (y0 - position.y) as u32,
            (x1 - x0) as u32,
            (y1 - y0) as u32,
        ))
    }

    fn mark_presented(&mut self) {
        self.presented += 1;
    }
}

impl Display for Framebuffer {
    fn size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn blit(&mut self, image: &RgbImage, position: Point) -> BackendResult<()> {
        let Some((dx, dy, sx, sy, w, h)) = self.clip(position, image.width(), image.height())
        else {
            return Ok(());
        };
        for row in 0..h {
            for col in 0..w {
                let src = image.get_pixel(sx + col, sy + row);
                self.pixels.put_pixel(dx + col, dy + row, *src);
            }
        }
        Ok(())
    }

    fn blit_icon(&mut self, bitmap: &RgbaImage, position: Point) -> BackendResult<()> {
        let Some((dx, dy, sx, sy, w, h)) = self.clip(position, bitmap.width(), bitmap.height())
        else {
            return Ok(());
        };
        for row in 0..h {
            for col in 0..w {
                let src = bitmap.get_pixel(sx + col, sy + row).0;
                let alpha = src[3] as u16;
                if alpha == 0 {
                    continue;
                }
                let dst = self.pixels.get_pixel_mut(dx + col, dy + row);
                for c in 0..3 {
                    let blended = (src[c] as u16 * alpha + dst.0[c] as u16 * (255 - alpha)) / 255;
                    dst.0[c] = blended as u8;
                }
            }
        }
        Ok(())
    }

    fn fill_rect(&mut self, color: [u8; 3], rect: Rect) -> BackendResult<()> {
        let Some((dx, dy, _, _, w, h)) = self.clip(Point::new(rect.x, rect.y), rect.width, rect.height)
        else {
            return Ok(());
        };
        for row in dy..dy + h {
            for col in dx..dx + w {
                self.pixels.put_pixel(col, row, Rgb(color));
            }
        }
        Ok(())
    }

    fn present(&mut self) -> BackendResult<()> {
        self.mark_presented();
        Ok(())
    }
}
