//! llama.cpp source management (fetch, cache, clean).
//!
//! The checkout is presence-cached: an existing llama.cpp/ directory is
//! never updated in place. `clean` is the only way to drop it.

#![allow(clippy::cast_precision_loss)] // Checkout sizes don't need u64 precision for display

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Upstream repository for the inference engine.
pub const REPO_URL: &str = "https://github.com/ggerganov/llama.cpp.git";

/// Directory name of the checkout under the project root.
pub const REPO_DIR: &str = "llama.cpp";

/// Path to the checkout.
pub fn repo_path(root: &Path) -> PathBuf {
    root.join(REPO_DIR)
}

/// Get the path to the checkout, failing if not cached.
pub fn require(root: &Path) -> Result<PathBuf> {
    let path = repo_path(root);
    if !path.exists() {
        bail!("{REPO_DIR} not found. Run: builder fetch");
    }
    Ok(path)
}

/// Clone llama.cpp if not already present (idempotent).
pub fn fetch(root: &Path) -> Result<()> {
    let dest = repo_path(root);

    if dest.exists() {
        println!("✅ llama.cpp repository already exists");
        return Ok(());
    }

    println!("📥 Cloning llama.cpp repository...");

    let dest_str = dest
        .to_str()
        .context("Destination path contains invalid UTF-8")?;

    let status = Command::new("git")
        .args(["clone", REPO_URL, dest_str])
        .status()
        .context("Failed to run git clone")?;

    if !status.success() {
        bail!("git clone failed for llama.cpp");
    }

    println!("✅ llama.cpp cloned successfully");
    Ok(())
}

/// Show cache status for the checkout and the staged artifacts.
pub fn status(root: &Path) -> Result<()> {
    println!("Cache Status:\n");

    let path = repo_path(root);
    if path.exists() {
        let size = dir_size(&path)?;
        println!(
            "  {:12} [cached] {:.1} MB",
            REPO_DIR,
            size as f64 / 1_000_000.0
        );
    } else {
        println!("  {REPO_DIR:12} [missing] {REPO_URL}");
    }

    println!();
    for (_, dest) in crate::builder::artifacts::ARTIFACTS {
        if root.join(dest).exists() {
            println!("  {dest:14} [staged]");
        } else {
            println!("  {dest:14} [missing]");
        }
    }

    Ok(())
}

/// Remove the cached checkout.
pub fn clean(root: &Path) -> Result<()> {
    let path = repo_path(root);
    if path.exists() {
        std::fs::remove_dir_all(&path)
            .with_context(|| format!("Removing {}", path.display()))?;
        println!("Cleaned: {REPO_DIR}");
    } else {
        println!("{REPO_DIR} not in cache");
    }
    Ok(())
}

/// Get directory size in bytes.
fn dir_size(path: &Path) -> Result<u64> {
    let path_str = path.to_str().context("Path contains invalid UTF-8")?;

    let output = Command::new("du")
        .args(["-sb", path_str])
        .output()
        .context("Failed to get directory size")?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let size_str = stdout.split_whitespace().next().unwrap_or("0");
    Ok(size_str.parse().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fetch_skips_existing_checkout() {
        // An existing directory short-circuits before any git invocation,
        // so this succeeds with no network access.
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join(REPO_DIR)).unwrap();

        fetch(tmp.path()).unwrap();
        assert!(tmp.path().join(REPO_DIR).is_dir());
    }

    #[test]
    fn test_fetch_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join(REPO_DIR)).unwrap();

        fetch(tmp.path()).unwrap();
        fetch(tmp.path()).unwrap();
    }

    #[test]
    fn test_require_fails_when_not_cached() {
        let tmp = TempDir::new().unwrap();
        let err = require(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("builder fetch"));
    }

    #[test]
    fn test_require_returns_cached_path() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join(REPO_DIR)).unwrap();

        let path = require(tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join(REPO_DIR));
    }

    #[test]
    fn test_clean_removes_checkout() {
        let tmp = TempDir::new().unwrap();
        let repo = tmp.path().join(REPO_DIR);
        std::fs::create_dir(&repo).unwrap();
        std::fs::write(repo.join("CMakeLists.txt"), "project(llama)\n").unwrap();

        clean(tmp.path()).unwrap();
        assert!(!repo.exists());
    }

    #[test]
    fn test_clean_tolerates_empty_cache() {
        let tmp = TempDir::new().unwrap();
        clean(tmp.path()).unwrap();
    }
}
