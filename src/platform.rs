//! Cross-platform resolution of the directory holding persisted settings.
//!
//! Mirrors the usual dotdir-first convention with a permission fallback
//! chain so read-only homes and locked-down data directories still work.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the settings directory with a cross-platform fallback chain.
///
/// Priority order:
/// 1. Explicit override (for testing/CI)
/// 2. Home directory (~/.gba-clock)
/// 3. Platform-specific data directory (XDG on Linux, AppData on Windows)
/// 4. Current working directory (last resort)
///
/// Each directory is validated for write access before being selected.
pub fn get_settings_dir(override_dir: Option<&PathBuf>) -> Result<PathBuf> {
    // Priority 1: Explicit override (testing/CI)
    if let Some(dir) = override_dir {
        ensure_writable(dir)?;
        return Ok(dir.clone());
    }

    // Priority 2: Home directory (traditional Unix-style)
    if let Some(home) = home::home_dir() {
        let dir = home.join(".gba-clock");
        if ensure_writable(&dir).is_ok() {
            return Ok(dir);
        }
        eprintln!(
            "Warning: Cannot write to {}. Trying fallback locations.",
            dir.display()
        );
    }

    // Priority 3: Platform-specific data directory
    if let Some(data) = dirs::data_local_dir() {
        let dir = data.join("gba-clock");
        if ensure_writable(&dir).is_ok() {
            return Ok(dir);
        }
    }

    // Priority 4: Current working directory (absolute last resort)
    let dir = PathBuf::from(".gba-clock");
    ensure_writable(&dir).context(
        "Cannot create a settings directory in any location. \
         Check file permissions.",
    )?;
    Ok(dir)
}

/// Ensure a directory exists and is writable by the current user.
///
/// Creates the directory if it doesn't exist, then tests write access
/// by creating and removing a temporary file.
pub fn ensure_writable(dir: &PathBuf) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let test_path = dir.join(".write_test");
    fs::write(&test_path, b"test")
        .with_context(|| format!("Directory {} is not writable", dir.display()))?;

    // Cleanup test file, ignore errors (file might be held by antivirus on Windows)
    let _ = fs::remove_file(&test_path);

    Ok(())
}
