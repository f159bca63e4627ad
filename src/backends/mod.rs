// SPDX-License-Identifier: GPL-3.0-only

//! Hardware abstraction layer
//!
//! The booth core only talks to hardware through the traits in this module:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  App Layer                   │
//! └────────────────────┬────────────────────────┘
//!                      │
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                   │
//! │  ┌──────────┐ ┌─────────┐ ┌──────────────┐  │
//! │  │  Camera  │ │ Printer │ │ Display/Input│  │
//! │  └──────────┘ └─────────┘ └──────────────┘  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`camera`]: Camera trait, capture profiles and the virtual camera
//! - [`printer`]: Thermal printer trait and the spool printer
//! - [`display`]: Display trait and the in-memory framebuffer
//! - [`input`]: Touch input events

pub mod camera;
pub mod display;
pub mod input;
pub mod printer;

pub use camera::{Camera, CaptureProfile, Crop};
pub use display::{Display, Framebuffer};
pub use input::{InputEvent, InputSource};
pub use printer::Printer;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Backend error types
#[derive(Debug, Clone)]
pub enum BackendError {
    /// Device reported a failure
    Device(String),
    /// General I/O error
    IoError(String),
    /// Other errors
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::Device(msg) => write!(f, "Device error: {}", msg),
            BackendError::IoError(msg) => write!(f, "I/O error: {}", msg),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::IoError(err.to_string())
    }
}

impl From<image::ImageError> for BackendError {
    fn from(err: image::ImageError) -> Self {
        BackendError::Other(err.to_string())
    }
}
