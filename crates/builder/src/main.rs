//! # llama.cpp WebAssembly builder
//!
//! Fetch llama.cpp and cross-compile it to WebAssembly for the browser
//! chat demo, then stage the artifacts and loader scaffolding.
//!
//! ## Usage
//!
//! ```bash
//! builder            # Full pipeline: doctor + fetch + build + stage
//! builder doctor     # Check required tools
//! builder fetch      # Clone llama.cpp
//! builder wasm       # Cross-compile to WebAssembly
//! builder status     # Show cache status
//! ```
//!
//! ## Architecture
//!
//! - Engine: built from source (llama.cpp checkout, Emscripten toolchain)
//! - Demo scaffolding: generated fixed-content files (wasm/init.js, test.html)

use anyhow::Result;
use clap::Parser;

mod builder;

#[derive(Parser)]
#[command(name = "builder", about = "llama.cpp WebAssembly build pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Option<builder::BuildCommands>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let root = std::env::current_dir()?;

    match cli.command.unwrap_or(builder::BuildCommands::All) {
        builder::BuildCommands::All => builder::build_all(&root)?,
        builder::BuildCommands::Doctor => builder::doctor::check()?,
        builder::BuildCommands::Fetch => builder::vendor::fetch(&root)?,
        builder::BuildCommands::Wasm => builder::wasm::build(&root)?,
        builder::BuildCommands::Collect => builder::collect_and_warn(&root)?,
        builder::BuildCommands::Scaffold => builder::scaffold::write_all(&root)?,
        builder::BuildCommands::Status => builder::vendor::status(&root)?,
        builder::BuildCommands::Clean => builder::vendor::clean(&root)?,
    }

    Ok(())
}
