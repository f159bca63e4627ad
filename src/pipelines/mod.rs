// SPDX-License-Identifier: GPL-3.0-only

//! Processing pipelines
//!
//! # Modules
//!
//! - [`photo`]: Still capture decoding, print post-processing and persistence

pub mod photo;
