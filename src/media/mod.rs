// SPDX-License-Identifier: GPL-3.0-only

//! Media processing utilities
//!
//! # Color Space Conversion
//!
//! Viewfinder frames arrive from the camera's video port as raw planar
//! YUV 4:2:0 (I420), which must be converted to RGB before display. The
//! [`yuv_converter`] module defines the converter interface the renderer
//! calls and a CPU implementation of it.

pub mod yuv_converter;

pub use yuv_converter::{I420Converter, RawFrameConverter};
