//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the file names it reads from a QMK tree.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "qmkgen";

/// The binary name of the application (used in command examples and generated file banners).
pub const APP_BINARY_NAME: &str = "qmkgen";

/// Directory under the QMK root that holds keyboard definitions.
pub const KEYBOARDS_DIR: &str = "keyboards";

/// Directory inside a keyboard folder that holds keymaps.
pub const KEYMAPS_DIR: &str = "keymaps";

/// Per-level keyboard data file (merged from parent to child folders).
pub const INFO_JSON: &str = "info.json";

/// Buildable keyboard data file; marks a folder as a keyboard.
pub const KEYBOARD_JSON: &str = "keyboard.json";

/// Legacy build rules file; also marks a folder as a keyboard.
pub const RULES_MK: &str = "rules.mk";

/// Keymap data file carrying the `config` override layer.
pub const KEYMAP_JSON: &str = "keymap.json";

/// Keymap C source; marks a folder as a keymap.
pub const KEYMAP_C: &str = "keymap.c";

/// Environment variable pointing at the QMK firmware checkout.
pub const QMK_HOME_ENV: &str = "QMK_HOME";

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "QMKGEN_CONFIG_DIR";
