//! Emscripten cross-compile of the llama.cpp checkout.
//!
//! Configures and builds inside a throwaway build-em/ tree; the build
//! directory never carries state between runs.

use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::builder::vendor;

/// Build directory name inside the checkout.
pub const BUILD_DIR: &str = "build-em";

/// Parallelism handed to make.
const MAKE_JOBS: &str = "4";

/// Named build product handed to make.
const MAKE_TARGET: &str = "main";

/// CMake flags for the Emscripten configure: WASM target on, every
/// accelerator backend off, -O3 with LTO for both C and C++.
const CMAKE_FLAGS: &[&str] = &[
    "-DCMAKE_BUILD_TYPE=Release",
    "-DLLAMA_WASM=ON",
    "-DLLAMA_BLAS=OFF",
    "-DLLAMA_METAL=OFF",
    "-DLLAMA_CUDA=OFF",
    "-DLLAMA_OPENCL=OFF",
    "-DLLAMA_VULKAN=OFF",
    "-DCMAKE_C_FLAGS=-O3 -DNDEBUG -flto",
    "-DCMAKE_CXX_FLAGS=-O3 -DNDEBUG -flto",
];

/// Scoped working-directory change.
///
/// Restores the original directory on drop, on success and error paths
/// alike, so no caller ever observes the process in a changed directory.
pub struct CwdGuard {
    original: PathBuf,
}

impl CwdGuard {
    pub fn enter(dir: &Path) -> Result<Self> {
        let original = env::current_dir().context("Reading current directory")?;
        env::set_current_dir(dir).with_context(|| format!("Entering {}", dir.display()))?;
        Ok(Self { original })
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.original);
    }
}

/// Cross-compile llama.cpp to WebAssembly.
pub fn build(root: &Path) -> Result<()> {
    let repo = vendor::require(root)?;

    println!("🔨 Building llama.cpp for WebAssembly...");

    let _cwd = CwdGuard::enter(&repo)?;

    let build_dir = reset_build_dir(&repo)?;

    println!("⚙️  Configuring with CMake...");
    configure(&build_dir)?;

    println!("🔧 Building...");
    compile(&build_dir)?;

    println!("✅ Build completed successfully!");
    Ok(())
}

/// Destroy and recreate the build directory so every configure starts
/// from an empty tree with no stale cache state.
pub fn reset_build_dir(repo: &Path) -> Result<PathBuf> {
    let build_dir = repo.join(BUILD_DIR);
    if build_dir.exists() {
        std::fs::remove_dir_all(&build_dir)
            .with_context(|| format!("Removing stale {BUILD_DIR}"))?;
    }
    std::fs::create_dir_all(&build_dir).with_context(|| format!("Creating {BUILD_DIR}"))?;
    Ok(build_dir)
}

fn configure(build_dir: &Path) -> Result<()> {
    let status = Command::new("emcmake")
        .arg("cmake")
        .arg("..")
        .args(CMAKE_FLAGS)
        .current_dir(build_dir)
        .status()
        .context("Failed to run emcmake cmake")?;

    if !status.success() {
        bail!("CMake configure failed");
    }
    Ok(())
}

fn compile(build_dir: &Path) -> Result<()> {
    let status = Command::new("emmake")
        .args(["make", "-j", MAKE_JOBS, MAKE_TARGET])
        .current_dir(build_dir)
        .status()
        .context("Failed to run emmake make")?;

    if !status.success() {
        bail!("WebAssembly build failed");
    }
    Ok(())
}
