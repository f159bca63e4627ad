// SPDX-License-Identifier: GPL-3.0-only

//! Action handler modules
//!
//! Handlers are grouped by concern; each adds methods to [`super::App`].

pub mod capture;
pub mod gallery;
pub mod ui;
