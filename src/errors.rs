// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the photo booth
//!
//! Operation boundaries (capture, load, save, delete) catch these, log them
//! and fall back to a safe screen state. Only display or input failures are
//! allowed to leave the main loop.

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Camera-related errors
    Camera(String),
    /// Photo capture and post-processing errors
    Photo(PhotoError),
    /// Storage/filesystem errors
    Storage(String),
    /// Settings persistence errors
    Settings(String),
    /// Display backend errors
    Display(String),
    /// Printer errors
    Printer(String),
    /// Configuration errors
    Config(String),
    /// Generic error with message
    Other(String),
}

/// Photo capture errors
#[derive(Debug, Clone)]
pub enum PhotoError {
    /// Still capture failed
    CaptureFailed(String),
    /// Captured file could not be decoded
    DecodeFailed(String),
    /// Post-processing chain failed
    ProcessingFailed(String),
    /// Save failed
    SaveFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(msg) => write!(f, "Camera error: {}", msg),
            AppError::Photo(e) => write!(f, "Photo error: {}", e),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Settings(msg) => write!(f, "Settings error: {}", msg),
            AppError::Display(msg) => write!(f, "Display error: {}", msg),
            AppError::Printer(msg) => write!(f, "Printer error: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for PhotoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoError::CaptureFailed(msg) => write!(f, "Capture failed: {}", msg),
            PhotoError::DecodeFailed(msg) => write!(f, "Decode failed: {}", msg),
            PhotoError::ProcessingFailed(msg) => write!(f, "Processing failed: {}", msg),
            PhotoError::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for PhotoError {}

impl From<PhotoError> for AppError {
    fn from(err: PhotoError) -> Self {
        AppError::Photo(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for PhotoError {
    fn from(err: std::io::Error) -> Self {
        PhotoError::SaveFailed(err.to_string())
    }
}

impl From<image::ImageError> for PhotoError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => PhotoError::SaveFailed(e.to_string()),
            image::ImageError::Encoding(e) => PhotoError::SaveFailed(e.to_string()),
            other => PhotoError::DecodeFailed(other.to_string()),
        }
    }
}

impl From<crate::backends::BackendError> for AppError {
    fn from(err: crate::backends::BackendError) -> Self {
        AppError::Other(err.to_string())
    }
}
