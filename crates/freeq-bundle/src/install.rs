use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::{BUNDLE_BINARY, BUNDLE_NAME};

/// Default user-level VST3 root, `~/.vst3`.
pub fn default_vst3_root() -> Result<PathBuf> {
    let home = dirs::home_dir().context("home directory unavailable")?;
    Ok(home.join(".vst3"))
}

/// Architecture directory per the VST3 Linux bundle convention, e.g.
/// `x86_64-linux`.
pub fn arch_dir() -> String {
    format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS)
}

/// Where the plugin binary lives inside an installed bundle.
pub fn bundle_binary_path(vst3_root: &Path) -> PathBuf {
    vst3_root
        .join(BUNDLE_NAME)
        .join("Contents")
        .join(arch_dir())
        .join(BUNDLE_BINARY)
}

/// Copies the built library into the bundle layout, creating the directory
/// tree if needed and overwriting a previous install.
pub fn install(artifact: &Path, vst3_root: &Path) -> Result<PathBuf> {
    let contents = vst3_root
        .join(BUNDLE_NAME)
        .join("Contents")
        .join(arch_dir());
    fs::create_dir_all(&contents)
        .with_context(|| format!("failed to create {}", contents.display()))?;

    let dest = contents.join(BUNDLE_BINARY);
    fs::copy(artifact, &dest).with_context(|| {
        format!(
            "failed to copy {} to {}",
            artifact.display(),
            dest.display()
        )
    })?;
    info!(dest = %dest.display(), "installed plugin binary");
    Ok(dest)
}

/// Removes the installed bundle. Returns whether anything was removed;
/// an absent bundle is not an error.
pub fn uninstall(vst3_root: &Path) -> Result<bool> {
    let bundle = vst3_root.join(BUNDLE_NAME);
    if !bundle.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(&bundle)
        .with_context(|| format!("failed to remove {}", bundle.display()))?;
    info!(bundle = %bundle.display(), "removed bundle");
    Ok(true)
}
