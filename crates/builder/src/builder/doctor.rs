//! Toolchain checks.
//!
//! The pipeline shells out to git, cmake and make under the Emscripten
//! wrappers, so all of them must resolve before anything mutates the tree.

use anyhow::{bail, Result};

/// Tools that must be on PATH before the pipeline runs.
pub const REQUIRED_TOOLS: &[&str] = &["git", "cmake", "make"];

/// Return the subset of `tools` that does not resolve on PATH.
pub fn missing_tools(tools: &[&str]) -> Vec<String> {
    tools
        .iter()
        .filter(|tool| which::which(tool).is_err())
        .map(|tool| (*tool).to_string())
        .collect()
}

/// Check that every required tool resolves. Terminal on failure.
pub fn check() -> Result<()> {
    let mut ok = true;

    for tool in missing_tools(REQUIRED_TOOLS) {
        println!("❌ {tool} is not installed. Please install it first.");
        ok = false;
    }

    // emcc gets a dedicated install hint.
    if which::which("emcc").is_err() {
        println!("❌ Emscripten is not installed or not in PATH.");
        println!("Please install Emscripten from https://emscripten.org/docs/getting_started/downloads.html");
        ok = false;
    }

    if !ok {
        bail!("missing required tools");
    }

    println!("✅ All dependencies found!");
    Ok(())
}
