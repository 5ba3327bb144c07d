//! Config directory resolution.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Directory name under the platform config root.
const APP_DIR: &str = "holidaze";

/// Returns `~/.config/holidaze` (or the platform equivalent).
///
/// # Errors
///
/// Fails when the platform config directory cannot be determined.
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("failed to determine the config directory")?;
    Ok(base.join(APP_DIR))
}
