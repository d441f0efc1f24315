use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::{PLUGIN_ARTIFACT, PLUGIN_PACKAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Release,
    Debug,
}

impl Profile {
    /// Subdirectory of the target directory holding this profile's output.
    pub fn dir(&self) -> &'static str {
        match self {
            Profile::Release => "release",
            Profile::Debug => "debug",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir())
    }
}

/// Path where cargo leaves the plugin library for the given profile.
pub fn artifact_path(target_dir: &Path, profile: Profile) -> PathBuf {
    target_dir.join(profile.dir()).join(PLUGIN_ARTIFACT)
}

/// Builds the plugin package and returns the artifact path.
///
/// Honors `$CARGO` so invocations from within cargo itself reuse the same
/// toolchain. A failed build or a missing artifact afterwards is an error.
pub fn build_plugin(target_dir: &Path, profile: Profile) -> Result<PathBuf> {
    let cargo = env::var_os("CARGO")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("cargo"));

    let mut command = Command::new(&cargo);
    command.args(["build", "--package", PLUGIN_PACKAGE]);
    if profile == Profile::Release {
        command.arg("--release");
    }
    command.arg("--target-dir").arg(target_dir);

    info!(package = PLUGIN_PACKAGE, %profile, "building plugin");
    let status = command
        .status()
        .with_context(|| format!("failed to run {}", cargo.display()))?;
    if !status.success() {
        bail!("cargo build exited with {status}");
    }

    let artifact = artifact_path(target_dir, profile);
    if !artifact.is_file() {
        bail!(
            "build succeeded but {} was not produced",
            artifact.display()
        );
    }
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn artifact_path_follows_profile() {
        let release = artifact_path(Path::new("target"), Profile::Release);
        assert_eq!(release, Path::new("target/release/libfreeq.so"));
        let debug = artifact_path(Path::new("/tmp/out"), Profile::Debug);
        assert_eq!(debug, Path::new("/tmp/out/debug/libfreeq.so"));
    }
}
