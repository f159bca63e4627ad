// SPDX-License-Identifier: GPL-3.0-only

//! Photo Booth - A touchscreen photo booth controller
//!
//! This library drives a camera, a small touchscreen and a thermal printer:
//! a live viewfinder, still capture with print post-processing, a gallery
//! with deletion, and a handful of persisted settings.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Screen-mode state machine, busy indicator and main loop
//! - [`ui`]: Icons, buttons and screens
//! - [`backends`]: Camera, printer, display and input abstraction
//! - [`media`]: Raw viewfinder frame conversion
//! - [`pipelines`]: Still photo post-processing
//! - [`storage`]: Photo directory and gallery scanning
//! - [`settings`]: Persisted user preferences
//! - [`config`]: Booth configuration
//!
//! # Example
//!
//! ```ignore
//! // The booth is normally run via the binary:
//! // photobooth terminal --config booth.json
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod media;
pub mod pipelines;
pub mod settings;
pub mod storage;
pub mod terminal;
pub mod ui;

// Re-export commonly used types
pub use app::{Action, App, Devices, ScreenMode, ViewTarget};
pub use config::BoothConfig;
pub use errors::{AppError, AppResult};
