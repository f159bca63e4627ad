// SPDX-License-Identifier: GPL-3.0-only

//! Named bitmap assets
//!
//! Icons are discovered at startup from a directory of PNG files, one icon
//! per file named after the file stem. The registry owns the bitmaps;
//! buttons hold shared handles resolved once by name.

use image::RgbaImage;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A named bitmap; the bitmap is absent when the file failed to decode
#[derive(Debug, Clone)]
pub struct Icon {
    pub name: String,
    pub bitmap: Option<RgbaImage>,
}

impl Icon {
    pub fn new(name: impl Into<String>, bitmap: Option<RgbaImage>) -> Self {
        Self {
            name: name.into(),
            bitmap,
        }
    }

    /// Decode `path` into an icon called `name`; decode failures leave the bitmap empty
    pub fn load(name: &str, path: &Path) -> Self {
        let bitmap = match image::open(path) {
            Ok(img) => Some(img.to_rgba8()),
            Err(e) => {
                warn!(icon = name, path = %path.display(), error = %e, "Icon failed to load");
                None
            }
        };
        Self::new(name, bitmap)
    }
}

/// Owner of every loaded icon
#[derive(Debug, Default, Clone)]
pub struct IconRegistry {
    icons: Vec<Arc<Icon>>,
}

impl IconRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from already-decoded icons
    pub fn from_icons(icons: impl IntoIterator<Item = Icon>) -> Self {
        Self {
            icons: icons.into_iter().map(Arc::new).collect(),
        }
    }

    /// Load every `*.png` in `dir`
    ///
    /// An unreadable directory yields an empty registry; the booth still
    /// runs, just without decorations.
    pub fn load_dir(dir: &Path) -> Self {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "Icon directory unreadable");
                return Self::new();
            }
        };

        let mut icons = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let is_png = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
            if !is_png {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            debug!(icon = name, "Loading icon");
            icons.push(Arc::new(Icon::load(name, &path)));
        }

        info!(count = icons.len(), path = %dir.display(), "Icons loaded");
        Self { icons }
    }

    /// Resolve an icon by exact name
    pub fn get(&self, name: &str) -> Option<Arc<Icon>> {
        self.icons.iter().find(|icon| icon.name == name).cloned()
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}
