// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for photo storage

mod common;

use common::touch_photo;
use photobooth::config::Owner;
use photobooth::storage::{PhotoStore, img_range};

fn store_in(dir: &std::path::Path) -> PhotoStore {
    PhotoStore::new(dir, Owner::invoking_user())
}

#[test]
fn test_img_range_ignores_other_files() {
    let dir = tempfile::tempdir().unwrap();
    for index in [3, 17, 100] {
        touch_photo(dir.path(), index);
    }
    std::fs::write(dir.path().join("notes.txt"), b"").unwrap();
    std::fs::write(dir.path().join("IMG_12.JPG"), b"").unwrap();
    std::fs::write(dir.path().join("img_0500.jpg"), b"").unwrap();

    assert_eq!(img_range(dir.path()), Some((3, 100)));
}

#[test]
fn test_img_range_without_photos() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(img_range(dir.path()), None);
    assert_eq!(img_range(&dir.path().join("missing")), None);
}

#[test]
fn test_allocate_takes_first_gap() {
    let dir = tempfile::tempdir().unwrap();
    for index in 1..=3 {
        touch_photo(dir.path(), index);
    }
    assert_eq!(store_in(dir.path()).allocate().unwrap(), 4);
}

#[test]
fn test_allocate_wraps_to_zero() {
    let dir = tempfile::tempdir().unwrap();
    for index in 1..=9999 {
        touch_photo(dir.path(), index);
    }
    let store = store_in(dir.path());
    assert_eq!(store.allocate().unwrap(), 0);

    touch_photo(dir.path(), 0);
    assert!(store.allocate().is_err(), "A full directory has no free number");
}

#[test]
fn test_delete_and_discard() {
    let dir = tempfile::tempdir().unwrap();
    touch_photo(dir.path(), 8);
    let store = store_in(dir.path());

    store.delete(8).unwrap();
    assert!(!store.exists(8));
    assert!(store.delete(8).is_err());
    store.discard(8);
}
