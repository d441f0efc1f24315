use std::env;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Splits a search path list the way the dynamic loader does (colons on
/// Linux), dropping empty entries.
pub fn search_paths(value: &OsStr) -> Vec<PathBuf> {
    env::split_paths(value)
        .filter(|path| !path.as_os_str().is_empty())
        .collect()
}

/// The directories currently listed in `LD_LIBRARY_PATH`, in order.
pub fn env_search_paths() -> Vec<PathBuf> {
    env::var_os("LD_LIBRARY_PATH")
        .map(|value| search_paths(&value))
        .unwrap_or_default()
}

fn patchelf_binary() -> PathBuf {
    env::var_os("PATCHELF")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("patchelf"))
}

/// Appends each directory to the library's embedded rpath list via
/// `patchelf --add-rpath`.
///
/// Patching is best-effort per entry: a patchelf invocation that exits
/// non-zero is logged and skipped, and the remaining entries are still
/// applied. An unspawnable patchelf fails the step as a whole. Returns the
/// number of entries embedded.
pub fn patch_rpaths(artifact: &Path, dirs: &[PathBuf]) -> Result<usize> {
    let patchelf = patchelf_binary();
    let mut patched = 0;
    for dir in dirs {
        let status = Command::new(&patchelf)
            .arg("--add-rpath")
            .arg(dir)
            .arg(artifact)
            .status();
        match status {
            Ok(status) if status.success() => {
                debug!(dir = %dir.display(), "embedded rpath entry");
                patched += 1;
            }
            Ok(status) => {
                warn!(dir = %dir.display(), %status, "patchelf failed, skipping entry");
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(err).with_context(|| {
                    format!(
                        "{} not found; install patchelf to embed rpath entries",
                        patchelf.display()
                    )
                });
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to run {}", patchelf.display()));
            }
        }
    }
    Ok(patched)
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn search_paths_splits_in_order_and_drops_empties() {
        let value = OsString::from("/usr/lib:/opt/audio/lib::/home/user/lib:");
        let paths = search_paths(&value);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/usr/lib"),
                PathBuf::from("/opt/audio/lib"),
                PathBuf::from("/home/user/lib"),
            ]
        );
    }

    #[test]
    fn search_paths_handles_empty_value() {
        assert_eq!(search_paths(OsStr::new("")), Vec::<PathBuf>::new());
    }

    #[test]
    fn patch_outcomes_follow_the_patchelf_exit() {
        let dirs = vec![PathBuf::from("/usr/lib")];
        let artifact = Path::new("/dev/null");

        // Entry-level failures are skipped, a successful run is counted,
        // and a missing binary fails the whole step.
        env::set_var("PATCHELF", "true");
        assert_eq!(patch_rpaths(artifact, &dirs).unwrap(), 1);

        env::set_var("PATCHELF", "false");
        assert_eq!(patch_rpaths(artifact, &dirs).unwrap(), 0);

        env::set_var("PATCHELF", "freeq-no-such-patchelf");
        assert!(patch_rpaths(artifact, &dirs).is_err());

        env::remove_var("PATCHELF");
    }
}
