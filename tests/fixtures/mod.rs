//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Path to the qmkgen binary
pub fn qmkgen_bin() -> &'static str {
    env!("CARGO_BIN_EXE_qmkgen")
}

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("fixture path has a parent"))
        .expect("Failed to create fixture directory");
    fs::write(&path, content).expect("Failed to write fixture file");
}

/// A temporary QMK tree plus an empty config directory.
pub struct MockQmk {
    /// Root of the mock QMK checkout
    pub qmk: TempDir,
    /// Isolated config directory (no config.toml)
    pub config: TempDir,
}

impl MockQmk {
    /// Root path of the mock QMK checkout.
    pub fn root(&self) -> &Path {
        self.qmk.path()
    }

    /// Builds a `qmkgen` command isolated from the user's environment.
    ///
    /// Runs from the config directory so the working directory never names a keyboard.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(qmkgen_bin());
        cmd.env("QMKGEN_CONFIG_DIR", self.config.path())
            .env_remove("QMK_HOME")
            .env_remove("RUST_LOG")
            .current_dir(self.config.path())
            .args(args);
        cmd
    }

    /// Builds a `generate-dfu-header` command against this tree.
    pub fn generate(&self, extra: &[&str]) -> Command {
        let qmk_path = self.root().to_str().expect("utf-8 temp path").to_string();
        let mut args = vec!["generate-dfu-header", "--qmk-path", qmk_path.as_str()];
        args.extend_from_slice(extra);
        self.command(&args)
    }

    /// Path to a file inside the config directory (handy as an output target).
    pub fn scratch(&self, relative: &str) -> PathBuf {
        self.config.path().join(relative)
    }
}

/// Creates a mock QMK tree:
///
/// - `foo`: manufacturer "Acme", no bootloader settings
/// - `lufa/full`: all four `qmk_lufa_bootloader` pins
/// - `vendor/board/rev1`: settings split between parent `info.json` and child `keyboard.json`,
///   plus a `loud` keymap overriding the speaker pin
/// - `legacy`: `rules.mk` only with an `info.json`
/// - `nomaker`: keyboard without a manufacturer
pub fn mock_qmk() -> MockQmk {
    let qmk = TempDir::new().expect("Failed to create temp QMK dir");
    let config = TempDir::new().expect("Failed to create temp config dir");
    let root = qmk.path();

    write_file(root, "Makefile", "");
    write_file(root, "keyboards/foo/keyboard.json", r#"{"manufacturer": "Acme"}"#);
    write_file(
        root,
        "keyboards/lufa/full/keyboard.json",
        r#"{
            "manufacturer": "Full Stack",
            "qmk_lufa_bootloader": {
                "speaker": "C6",
                "led": "B0",
                "esc_input": "D5",
                "esc_output": "F1"
            }
        }"#,
    );
    write_file(
        root,
        "keyboards/vendor/board/info.json",
        r#"{
            "manufacturer": "Vendor Inc",
            "qmk_lufa_bootloader": {"esc_output": "F1", "esc_input": "D5"}
        }"#,
    );
    write_file(
        root,
        "keyboards/vendor/board/rev1/keyboard.json",
        r#"{"qmk_lufa_bootloader": {"led": "B0"}}"#,
    );
    write_file(
        root,
        "keyboards/vendor/board/keymaps/loud/keymap.json",
        r#"{"keyboard": "vendor/board/rev1", "config": {"qmk_lufa_bootloader": {"speaker": "C6"}}}"#,
    );
    write_file(root, "keyboards/legacy/rules.mk", "BOOTLOADER = qmk-dfu\n");
    write_file(root, "keyboards/legacy/info.json", r#"{"manufacturer": "Old Timer"}"#);
    write_file(root, "keyboards/nomaker/keyboard.json", r#"{"keyboard_name": "No Maker"}"#);

    MockQmk { qmk, config }
}
