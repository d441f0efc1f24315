use std::fs;

use assert_cmd::Command;
use tempfile::tempdir;

use freeq_bundle::{bundle_binary_path, PLUGIN_ARTIFACT};

#[test]
fn install_with_existing_artifact_places_the_bundle() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("target");
    fs::create_dir_all(target.join("release")).unwrap();
    fs::write(target.join("release").join(PLUGIN_ARTIFACT), b"elf bytes").unwrap();
    let vst3 = dir.path().join("vst3");

    Command::cargo_bin("freeq-bundle")
        .unwrap()
        .arg("install")
        .arg("--skip-build")
        .arg("--no-rpath")
        .arg("--target-dir")
        .arg(&target)
        .arg("--vst3-dir")
        .arg(&vst3)
        .assert()
        .success();

    let installed = bundle_binary_path(&vst3);
    assert_eq!(fs::read(&installed).unwrap(), b"elf bytes");

    // Second run overwrites in place.
    Command::cargo_bin("freeq-bundle")
        .unwrap()
        .arg("install")
        .arg("--skip-build")
        .arg("--no-rpath")
        .arg("--target-dir")
        .arg(&target)
        .arg("--vst3-dir")
        .arg(&vst3)
        .assert()
        .success();
    assert!(installed.is_file());
}

#[test]
fn install_without_artifact_fails() {
    let dir = tempdir().unwrap();

    Command::cargo_bin("freeq-bundle")
        .unwrap()
        .arg("install")
        .arg("--skip-build")
        .arg("--no-rpath")
        .arg("--target-dir")
        .arg(dir.path().join("target"))
        .arg("--vst3-dir")
        .arg(dir.path().join("vst3"))
        .assert()
        .failure();
}

#[test]
fn uninstall_tolerates_a_missing_bundle() {
    let dir = tempdir().unwrap();

    Command::cargo_bin("freeq-bundle")
        .unwrap()
        .arg("uninstall")
        .arg("--vst3-dir")
        .arg(dir.path().join("vst3"))
        .assert()
        .success();
}
