//! CLI integration tests for libusb-recipe.
//!
//! These cover the commands that resolve configuration without touching the
//! network or running build tools.

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the libusb-recipe binary command.
fn recipe() -> Command {
    Command::cargo_bin("libusb-recipe").unwrap()
}

/// Create a temporary directory to run commands in.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

// ============================================================================
// libusb-recipe info
// ============================================================================

#[test]
fn test_info_linux_gcc() {
    let tmp = temp_dir();

    recipe()
        .args(["info", "--os", "Linux", "--compiler", "gcc", "--arch", "x86_64"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("libusb 1.0.22"))
        .stdout(predicate::str::contains("strategy:     autotools"))
        .stdout(predicate::str::contains("libudev1/237@totemic/stable"))
        .stdout(predicate::str::contains("pthread"));
}

#[test]
fn test_info_visual_studio_prunes_fpic() {
    let tmp = temp_dir();

    recipe()
        .args([
            "info",
            "--os",
            "Windows",
            "--compiler",
            "Visual Studio",
            "--compiler-version",
            "12",
            "--arch",
            "x86",
        ])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("strategy:     msbuild"))
        .stdout(predicate::str::contains("fpic:         (not applicable)"))
        .stdout(predicate::str::contains("enable_udev:  (not applicable)"));
}

#[test]
fn test_info_json() {
    let tmp = temp_dir();

    let output = recipe()
        .args([
            "info", "--json", "--os", "Macos", "--compiler", "apple-clang", "--arch", "armv8",
        ])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["strategy"], "NativeMake");
    assert_eq!(json["link"]["frameworks"][0], "IOKit");
    assert_eq!(json["link"]["system_libs"][0], "objc");
    assert!(json["options"]["enable_udev"].is_null());
}

#[test]
fn test_info_flags_udev_mismatch() {
    let tmp = temp_dir();

    recipe()
        .args(["info", "--os", "Linux", "--compiler", "gcc", "--no-udev"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("enable_udev:  False"))
        .stdout(predicate::str::contains("udev support is disabled"));
}

#[test]
fn test_info_reads_project_profile() {
    let tmp = temp_dir();
    fs::write(
        tmp.path().join("recipe.toml"),
        "[settings]\nos = \"Windows\"\ncompiler = \"gcc\"\narch = \"x86\"\n\n[options]\nshared = false\n",
    )
    .unwrap();

    recipe()
        .args(["info"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("strategy:     mingw-autotools"))
        .stdout(predicate::str::contains("shared:       False"));
}

#[test]
fn test_info_flags_override_profile() {
    let tmp = temp_dir();
    fs::write(tmp.path().join("recipe.toml"), "[settings]\nos = \"Windows\"\ncompiler = \"gcc\"\n").unwrap();

    recipe()
        .args(["info", "--os", "Linux"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("strategy:     autotools"));
}

#[test]
fn test_info_unsupported_visual_studio_arch() {
    let tmp = temp_dir();

    recipe()
        .args([
            "info",
            "--os",
            "Windows",
            "--compiler",
            "msvc",
            "--arch",
            "armv8",
        ])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported configuration"));
}

#[test]
fn test_info_invalid_setting() {
    let tmp = temp_dir();

    recipe()
        .args(["info", "--arch", "sparc"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("sparc"));
}

#[test]
fn test_missing_explicit_profile() {
    let tmp = temp_dir();

    recipe()
        .args(["info", "--profile", "nope.toml"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("profile not found"));
}

#[test]
fn test_shared_and_static_conflict() {
    recipe()
        .args(["info", "--shared", "--static"])
        .assert()
        .failure();
}

// ============================================================================
// libusb-recipe sysreqs
// ============================================================================

#[test]
fn test_sysreqs_not_needed_off_linux() {
    let tmp = temp_dir();

    recipe()
        .args(["sysreqs", "--os", "Macos", "--compiler", "apple-clang"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no system packages required"));
}

// ============================================================================
// libusb-recipe completions
// ============================================================================

#[test]
fn test_completions_bash() {
    recipe()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("libusb-recipe"));
}

#[test]
fn test_help_lists_commands() {
    recipe()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("info"));
}
