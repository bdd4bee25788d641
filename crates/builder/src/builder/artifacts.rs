//! Artifact staging.
//!
//! Copies the Emscripten build outputs into wasm/ for the demo page.

use anyhow::{Context, Result};
use std::path::Path;

/// Expected build outputs and where they get staged, relative to the
/// project root.
pub const ARTIFACTS: &[(&str, &str)] = &[
    ("llama.cpp/build-em/bin/main.wasm", "wasm/main.wasm"),
    ("llama.cpp/build-em/bin/main.js", "wasm/main.js"),
];

/// Copy the build outputs into wasm/.
///
/// Missing sources are reported individually and flip the aggregate result
/// to false, but never stop the remaining copies.
pub fn collect(root: &Path) -> Result<bool> {
    println!("📁 Copying WASM files...");

    std::fs::create_dir_all(root.join("wasm")).context("Creating wasm/")?;

    copy_pairs(root, ARTIFACTS)
}

/// Copy each (source, destination) pair independently.
pub fn copy_pairs(root: &Path, pairs: &[(&str, &str)]) -> Result<bool> {
    let mut success = true;

    for (src, dest) in pairs {
        let src_path = root.join(src);
        let dest_path = root.join(dest);

        if let Some(parent) = dest_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Creating {}", parent.display()))?;
        }

        if src_path.exists() {
            std::fs::copy(&src_path, &dest_path)
                .with_context(|| format!("Copying {src} to {dest}"))?;
            println!("✅ Copied {}", file_name(src));
        } else {
            println!("❌ {src} not found");
            success = false;
        }
    }

    Ok(success)
}

fn file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copies_present_and_reports_missing() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("out")).unwrap();
        std::fs::write(tmp.path().join("out/present.wasm"), b"\0asm").unwrap();

        let pairs = &[
            ("out/present.wasm", "wasm/present.wasm"),
            ("out/absent.js", "wasm/absent.js"),
        ];
        let ok = copy_pairs(tmp.path(), pairs).unwrap();

        // The present file is staged even though the aggregate fails.
        assert!(!ok);
        assert!(tmp.path().join("wasm/present.wasm").exists());
        assert!(!tmp.path().join("wasm/absent.js").exists());
    }

    #[test]
    fn test_all_present_yields_success() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("out")).unwrap();
        std::fs::write(tmp.path().join("out/a.wasm"), b"\0asm").unwrap();
        std::fs::write(tmp.path().join("out/b.js"), "export default {};\n").unwrap();

        let pairs = &[("out/a.wasm", "wasm/a.wasm"), ("out/b.js", "wasm/b.js")];
        assert!(copy_pairs(tmp.path(), pairs).unwrap());

        assert_eq!(
            std::fs::read(tmp.path().join("wasm/a.wasm")).unwrap(),
            b"\0asm"
        );
    }

    #[test]
    fn test_copy_overwrites_stale_destination() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("out")).unwrap();
        std::fs::create_dir_all(tmp.path().join("wasm")).unwrap();
        std::fs::write(tmp.path().join("out/a.js"), "fresh").unwrap();
        std::fs::write(tmp.path().join("wasm/a.js"), "stale").unwrap();

        assert!(copy_pairs(tmp.path(), &[("out/a.js", "wasm/a.js")]).unwrap());
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("wasm/a.js")).unwrap(),
            "fresh"
        );
    }

    #[test]
    fn test_collect_creates_wasm_dir() {
        let tmp = TempDir::new().unwrap();
        let ok = collect(tmp.path()).unwrap();

        // No build ran: nothing staged, but the destination dir exists.
        assert!(!ok);
        assert!(tmp.path().join("wasm").is_dir());
    }
}
