// SPDX-License-Identifier: GPL-3.0-only

//! Touch UI primitives: geometry, icons, buttons and screens

pub mod button;
pub mod geom;
pub mod icons;
pub mod screen;

pub use button::Button;
pub use geom::{Point, Rect};
pub use icons::{Icon, IconRegistry};
pub use screen::{Dispatch, Screen};
