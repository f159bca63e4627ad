// SPDX-License-Identifier: GPL-3.0-only

use std::process::Command;

fn main() {
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-changed=.git/refs/tags");
    println!("cargo::rerun-if-env-changed=PHOTOBOOTH_VERSION");

    // Packagers may pin the version string
    let version = std::env::var("PHOTOBOOTH_VERSION").unwrap_or_else(|_| version_from_git());

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

/// Crate version with the commit appended, e.g. `0.1.0-abcdef1`
///
/// Commits past the latest tag are marked `0.1.0-dirty-abcdef1`; without
/// git the plain crate version is used.
fn version_from_git() -> String {
    let base = std::env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());
    let Some(hash) = git(&["rev-parse", "--short", "HEAD"]) else {
        return base;
    };

    let on_tag = git(&["describe", "--tags", "--exact-match", "--match", "v*"]).is_some();
    if on_tag {
        format!("{}-{}", base, hash)
    } else {
        format!("{}-dirty-{}", base, hash)
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}
