//! Packaging pipeline for the FreeQ plugin.
//!
//! The pipeline has three strictly ordered steps:
//!
//! 1. build the `freeq` cdylib with cargo,
//! 2. append every directory from `LD_LIBRARY_PATH` to the library's
//!    embedded rpath list with `patchelf` (best-effort per entry),
//! 3. install the result as `FreeQ.vst3/Contents/<arch>/FreeQ.so` under the
//!    VST3 root (`~/.vst3` by default).
//!
//! Re-running the pipeline overwrites the installed binary in place; no
//! duplicate directories are ever created.

use std::path::PathBuf;

use anyhow::{ensure, Result};
use tracing::info;

mod build;
mod install;
mod rpath;

pub use build::{artifact_path, build_plugin, Profile};
pub use install::{arch_dir, bundle_binary_path, default_vst3_root, install, uninstall};
pub use rpath::{env_search_paths, patch_rpaths, search_paths};

/// Cargo package that produces the plugin library.
pub const PLUGIN_PACKAGE: &str = "freeq";
/// File name of the built shared library.
pub const PLUGIN_ARTIFACT: &str = "libfreeq.so";
/// Name of the installed bundle directory.
pub const BUNDLE_NAME: &str = "FreeQ.vst3";
/// Name of the plugin binary inside the bundle.
pub const BUNDLE_BINARY: &str = "FreeQ.so";

#[derive(Debug, Clone)]
pub struct BundleConfig {
    pub profile: Profile,
    pub target_dir: PathBuf,
    pub vst3_root: PathBuf,
    /// Directories to embed into the library's rpath list.
    pub rpath_dirs: Vec<PathBuf>,
    /// Reuse an existing artifact instead of invoking cargo.
    pub skip_build: bool,
}

#[derive(Debug, Clone)]
pub struct BundleReport {
    pub artifact: PathBuf,
    pub installed: PathBuf,
    pub rpaths_patched: usize,
}

/// Runs the full pipeline: build, patch, install.
pub fn run(config: &BundleConfig) -> Result<BundleReport> {
    let artifact = if config.skip_build {
        let path = artifact_path(&config.target_dir, config.profile);
        ensure!(
            path.is_file(),
            "no plugin artifact at {} (run without --skip-build first)",
            path.display()
        );
        path
    } else {
        build_plugin(&config.target_dir, config.profile)?
    };

    let rpaths_patched = if config.rpath_dirs.is_empty() {
        0
    } else {
        patch_rpaths(&artifact, &config.rpath_dirs)?
    };

    let installed = install(&artifact, &config.vst3_root)?;
    info!(
        artifact = %artifact.display(),
        installed = %installed.display(),
        rpaths_patched,
        "bundle complete"
    );

    Ok(BundleReport {
        artifact,
        installed,
        rpaths_patched,
    })
}
