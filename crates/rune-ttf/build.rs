//! Build script for rune-ttf.
//!
//! Exports the version of the rendering library (swash) that this build is
//! linked against as `RUNE_TTF_NATIVE_VERSION`, read from the nearest
//! `Cargo.lock`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Lowest swash release the `swash = "0.1"` requirement accepts. Used when
/// no lockfile is visible (e.g. building from a packaged crate).
const FALLBACK_VERSION: &str = "0.1.0";

fn find_lockfile(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join("Cargo.lock"))
        .find(|path| path.is_file())
}

fn locked_version(lockfile: &Path, package: &str) -> Option<String> {
    let content = fs::read_to_string(lockfile).ok()?;
    let lock: toml::Table = content.parse().ok()?;
    lock.get("package")?
        .as_array()?
        .iter()
        .filter_map(|entry| entry.as_table())
        .find(|entry| entry.get("name").and_then(|n| n.as_str()) == Some(package))
        .and_then(|entry| entry.get("version")?.as_str().map(str::to_string))
}

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_default());
    let lockfile = find_lockfile(&manifest_dir);

    let version = match &lockfile {
        Some(path) => {
            println!("cargo:rerun-if-changed={}", path.display());
            locked_version(path, "swash")
        }
        None => None,
    };
    let version = version.unwrap_or_else(|| FALLBACK_VERSION.to_string());

    println!("cargo:rustc-env=RUNE_TTF_NATIVE_VERSION={version}");
    println!("cargo:rerun-if-changed=build.rs");
}
