// SPDX-License-Identifier: GPL-3.0-only

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Owner applied to created directories and photo files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner {
    pub uid: u32,
    pub gid: u32,
}

impl Owner {
    /// The user who invoked the booth
    ///
    /// Under `sudo` this is the original user from `SUDO_UID`/`SUDO_GID`,
    /// otherwise the process identity.
    pub fn invoking_user() -> Self {
        // SAFETY: getuid/getgid have no preconditions and cannot fail
        let (uid, gid) = unsafe { (libc::getuid(), libc::getgid()) };
        Self {
            uid: env_id("SUDO_UID").unwrap_or(uid),
            gid: env_id("SUDO_GID").unwrap_or(gid),
        }
    }
}

fn env_id(var: &str) -> Option<u32> {
    std::env::var(var).ok()?.trim().parse().ok()
}

/// Booth configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoothConfig {
    /// Directory where captured photos are stored
    pub photos_dir: PathBuf,
    /// Directory scanned for `*.png` icons
    pub icons_dir: PathBuf,
    /// Persisted user preferences
    pub settings_path: PathBuf,
    /// Output directory for the spool printer
    pub spool_dir: PathBuf,
    /// Delay between showing a capture and printing it
    pub print_settle_ms: u64,
    /// Blank lines fed after each print
    pub print_feed_lines: u8,
    /// Delay after printing before the viewfinder resumes
    pub print_pause_ms: u64,
}

impl Default for BoothConfig {
    fn default() -> Self {
        let photos_dir = dirs::picture_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("photobooth");
        Self {
            spool_dir: photos_dir.join("spool"),
            photos_dir,
            icons_dir: PathBuf::from("icons"),
            settings_path: PathBuf::from("photobooth.json"),
            print_settle_ms: 300,
            print_feed_lines: 2,
            print_pause_ms: 2500,
        }
    }
}

impl BoothConfig {
    /// Load from an optional JSON file; a missing file yields defaults
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let Some(path) = path else {
            debug!("No configuration file given, using defaults");
            return Ok(Self::default());
        };
        if !path.exists() {
            info!(path = %path.display(), "Configuration file not found, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    pub fn print_settle(&self) -> Duration {
        Duration::from_millis(self.print_settle_ms)
    }

    pub fn print_pause(&self) -> Duration {
        Duration::from_millis(self.print_pause_ms)
    }

    /// Log file used by the terminal runtime, next to the settings file
    pub fn log_path(&self) -> PathBuf {
        self.settings_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join("photobooth.log")
    }
}
