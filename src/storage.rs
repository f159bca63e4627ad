// SPDX-License-Identifier: GPL-3.0-only

//! Photo directory management
//!
//! Photos are named `IMG_NNNN.JPG` with a 4-digit sequence number in
//! `0..=9999`. Numbers are allocated by probing upward from 1 and the
//! gallery is walked by stepping ±1 with wrap-around.

use crate::config::Owner;
use crate::constants::storage::{DIR_MODE, FILE_MODE, FILE_PREFIX, FILE_SUFFIX, INDEX_SPACE, MAX_INDEX};
use crate::errors::{AppError, AppResult};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File name for a sequence number
pub fn file_name(index: i32) -> String {
    format!("{}{:04}{}", FILE_PREFIX, index, FILE_SUFFIX)
}

/// Sequence number encoded in a file name, if it matches `IMG_[0-9]{4}.JPG`
pub fn parse_index(name: &str) -> Option<i32> {
    let digits = name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Step a sequence number by `direction`, wrapping 9999 ↔ 0
pub fn step_index(index: i32, direction: i32) -> i32 {
    (index + direction).rem_euclid(INDEX_SPACE)
}

/// Lowest and highest sequence numbers present in `dir`
///
/// An unreadable directory counts as empty.
pub fn img_range(dir: &Path) -> Option<(i32, i32)> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(path = %dir.display(), error = %e, "Photo directory unreadable");
            return None;
        }
    };

    entries
        .flatten()
        .filter_map(|entry| parse_index(entry.file_name().to_str()?))
        .fold(None, |range, i| match range {
            None => Some((i, i)),
            Some((lo, hi)) => Some((lo.min(i), hi.max(i))),
        })
}

/// Photo storage rooted at a single directory
#[derive(Debug, Clone)]
pub struct PhotoStore {
    dir: PathBuf,
    owner: Owner,
}

impl PhotoStore {
    pub fn new(dir: impl Into<PathBuf>, owner: Owner) -> Self {
        Self {
            dir: dir.into(),
            owner,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, index: i32) -> PathBuf {
        self.dir.join(file_name(index))
    }

    pub fn exists(&self, index: i32) -> bool {
        self.path_for(index).is_file()
    }

    pub fn range(&self) -> Option<(i32, i32)> {
        img_range(&self.dir)
    }

    /// Create the photo directory if needed, owned by the booth user with mode 0755
    pub fn ensure_dir(&self) -> AppResult<()> {
        if self.dir.is_dir() {
            return Ok(());
        }

        fs::create_dir_all(&self.dir)?;
        std::os::unix::fs::chown(&self.dir, Some(self.owner.uid), Some(self.owner.gid))?;
        fs::set_permissions(&self.dir, fs::Permissions::from_mode(DIR_MODE))?;
        info!(path = %self.dir.display(), uid = self.owner.uid, gid = self.owner.gid, "Created photo directory");
        Ok(())
    }

    /// First free sequence number, probing from 1 upward and wrapping past 9999 to 0
    pub fn allocate(&self) -> AppResult<i32> {
        let mut index = 1;
        for _ in 0..INDEX_SPACE {
            if !self.exists(index) {
                debug!(index, "Allocated sequence number");
                return Ok(index);
            }
            index = step_index(index, 1);
        }
        Err(AppError::Storage(format!(
            "No free sequence number in {}",
            self.dir.display()
        )))
    }

    /// Nearest existing photo stepping from `from` in `direction`
    ///
    /// `from` itself is only considered after a full lap.
    pub fn find_next(&self, from: i32, direction: i32) -> Option<i32> {
        let direction = if direction < 0 { -1 } else { 1 };
        let mut index = from.clamp(-1, MAX_INDEX + 1);
        for _ in 0..INDEX_SPACE {
            index = step_index(index, direction);
            if self.exists(index) {
                return Some(index);
            }
        }
        None
    }

    /// Mark a freshly captured photo owner rw, group/other read
    pub fn set_photo_permissions(&self, index: i32) -> AppResult<()> {
        fs::set_permissions(self.path_for(index), fs::Permissions::from_mode(FILE_MODE))?;
        Ok(())
    }

    pub fn delete(&self, index: i32) -> AppResult<()> {
        let path = self.path_for(index);
        fs::remove_file(&path)?;
        info!(path = %path.display(), "Photo deleted");
        Ok(())
    }

    /// Remove a capture that never completed; a missing file is fine
    pub fn discard(&self, index: i32) {
        let path = self.path_for(index);
        match fs::remove_file(&path) {
            Ok(()) => debug!(path = %path.display(), "Discarded partial capture"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to discard partial capture"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> Owner {
        // SAFETY: no preconditions
        let (uid, gid) = unsafe { (libc::getuid(), libc::getgid()) };
        Owner { uid, gid }
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn test_parse_index_pattern() {
        assert_eq!(parse_index("IMG_0042.JPG"), Some(42));
        assert_eq!(parse_index("IMG_9999.JPG"), Some(9999));
        assert_eq!(parse_index("IMG_042.JPG"), None);
        assert_eq!(parse_index("IMG_00042.JPG"), None);
        assert_eq!(parse_index("IMG_00a2.JPG"), None);
        assert_eq!(parse_index("IMG_0042.jpg"), None);
        assert_eq!(parse_index("img_0042.JPG"), None);
        assert_eq!(file_name(7), "IMG_0007.JPG");
    }

    #[test]
    fn test_step_index_wraps() {
        assert_eq!(step_index(9999, 1), 0);
        assert_eq!(step_index(0, -1), 9999);
        assert_eq!(step_index(-1, 1), 0);
        assert_eq!(step_index(-1, -1), 9998);
    }

    #[test]
    fn test_img_range_ignores_non_matching() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "IMG_0003.JPG");
        touch(dir.path(), "IMG_0100.JPG");
        touch(dir.path(), "IMG_0007.JPG");
        touch(dir.path(), "IMG_12.JPG");
        touch(dir.path(), "notes.txt");
        assert_eq!(img_range(dir.path()), Some((3, 100)));
    }

    #[test]
    fn test_allocate_skips_existing() {
        let dir = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(dir.path(), owner());
        assert_eq!(store.allocate().unwrap(), 1);
        for name in ["IMG_0001.JPG", "IMG_0002.JPG", "IMG_0003.JPG"] {
            touch(dir.path(), name);
        }
        assert_eq!(store.allocate().unwrap(), 4);
    }

    #[test]
    fn test_find_next_wraps_both_ways() {
        let dir = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(dir.path(), owner());
        assert_eq!(store.find_next(5, 1), None);

        touch(dir.path(), "IMG_0002.JPG");
        touch(dir.path(), "IMG_9998.JPG");
        assert_eq!(store.find_next(2, 1), Some(9998));
        assert_eq!(store.find_next(9998, 1), Some(2));
        assert_eq!(store.find_next(2, -1), Some(9998));
        // A lone photo is found again after a full lap
        fs::remove_file(dir.path().join("IMG_9998.JPG")).unwrap();
        assert_eq!(store.find_next(2, -1), Some(2));
    }

    #[test]
    fn test_ensure_dir_sets_mode() {
        let dir = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(dir.path().join("a/b"), owner());
        store.ensure_dir().unwrap();
        let mode = fs::metadata(store.dir()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, DIR_MODE);
        // Existing directories are left alone
        store.ensure_dir().unwrap();
    }

    #[test]
    fn test_discard_missing_is_quiet() {
        let dir = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(dir.path(), owner());
        store.discard(12);
        touch(dir.path(), "IMG_0012.JPG");
        store.discard(12);
        assert!(!store.exists(12));
    }
}
