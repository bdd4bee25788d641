//! Generated scaffolding: the loader shim and the smoke-test page.
//!
//! Both files are fixed text, rewritten in full on every run. Hand edits
//! do not survive a build.

use anyhow::{Context, Result};
use std::path::Path;

/// Loader shim staged at wasm/init.js.
///
/// The shim keeps a module-level singleton: the first call imports and
/// initializes the compiled module, later calls return the cached handle
/// without reloading.
pub const INIT_JS: &str = r"// WebAssembly wrapper for llama.cpp
let wasmModule = null;

async function initWasm() {
    if (wasmModule) return wasmModule;

    try {
        // Import the generated JS file
        const Module = await import('./main.js');

        // Initialize the module
        wasmModule = await Module.default();

        console.log('WASM module initialized successfully');
        return wasmModule;
    } catch (error) {
        console.error('Failed to initialize WASM module:', error);
        throw error;
    }
}

// Export for use in workers and main thread
export default initWasm;
export { initWasm };
";

/// Smoke-test page staged at test.html. Imports the loader shim and
/// reports load success or failure in the page itself.
pub const TEST_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>WASM Build Test</title>
</head>
<body>
    <h1>WASM Build Test</h1>
    <div id="status">Testing WASM module...</div>

    <script type="module">
        async function testWasm() {
            const statusDiv = document.getElementById('status');

            try {
                const initWasm = await import('./wasm/init.js');
                const wasmModule = await initWasm.default();

                statusDiv.innerHTML = '✅ WASM module loaded successfully!';
                statusDiv.style.color = 'green';

                console.log('WASM module:', wasmModule);
            } catch (error) {
                statusDiv.innerHTML = '❌ WASM module failed to load: ' + error.message;
                statusDiv.style.color = 'red';

                console.error('WASM test failed:', error);
            }
        }

        testWasm();
    </script>
</body>
</html>
"#;

/// Write the loader shim (full overwrite).
pub fn write_loader(root: &Path) -> Result<()> {
    let path = root.join("wasm").join("init.js");
    std::fs::create_dir_all(root.join("wasm")).context("Creating wasm/")?;
    std::fs::write(&path, INIT_JS).with_context(|| format!("Writing {}", path.display()))?;

    println!("✅ Created WASM wrapper");
    Ok(())
}

/// Write the smoke-test page (full overwrite).
pub fn write_test_page(root: &Path) -> Result<()> {
    let path = root.join("test.html");
    std::fs::write(&path, TEST_HTML).with_context(|| format!("Writing {}", path.display()))?;

    println!("✅ Created test page (test.html)");
    Ok(())
}

/// Write both scaffold files.
pub fn write_all(root: &Path) -> Result<()> {
    write_loader(root)?;
    write_test_page(root)
}
