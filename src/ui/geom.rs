// SPDX-License-Identifier: GPL-3.0-only

//! Screen-space geometry

/// A point in framebuffer pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with origin and size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive right edge
    pub fn x2(&self) -> i32 {
        self.x + self.width as i32 - 1
    }

    /// Inclusive bottom edge
    pub fn y2(&self) -> i32 {
        self.y + self.height as i32 - 1
    }

    /// Whether `point` lies inside, edges included
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.x2() && point.y >= self.y && point.y <= self.y2()
    }

    /// Top-left position that centers a `width` x `height` item in this rect
    ///
    /// Uses floor division so odd remainders bias towards the top-left.
    pub fn centered(&self, width: u32, height: u32) -> Point {
        let dx = (self.width as i32 - width as i32).div_euclid(2);
        let dy = (self.height as i32 - height as i32).div_euclid(2);
        Point::new(self.x + dx, self.y + dy)
    }
}
