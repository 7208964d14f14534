//! Keymap-level overrides for keyboard info records.
//!
//! A keymap's `keymap.json` may carry a `config` object holding info.json
//! keys. Those values win over the keyboard's own data files when a build
//! targets that keymap.

use anyhow::Result;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{KEYBOARDS_DIR, KEYMAPS_DIR, KEYMAP_C, KEYMAP_JSON};
use crate::parser::keyboard_json::read_json_object;

/// Finds the keymap folder for a keyboard.
///
/// Keymaps may live in the keyboard folder itself or in any parent folder
/// (e.g. `vendor/board/keymaps/default` serves `vendor/board/rev1`). Only
/// folders holding a `keymap.json` or `keymap.c` count; the deepest wins.
pub fn find_keymap_dir(qmk_path: &Path, keyboard: &str, keymap: &str) -> Option<PathBuf> {
    let keyboards_dir = qmk_path.join(KEYBOARDS_DIR);
    let segments: Vec<&str> = keyboard.split('/').filter(|s| !s.is_empty()).collect();

    (1..=segments.len()).rev().find_map(|depth| {
        let candidate = segments[..depth]
            .iter()
            .fold(keyboards_dir.clone(), |dir, segment| dir.join(segment))
            .join(KEYMAPS_DIR)
            .join(keymap);

        let is_keymap =
            candidate.join(KEYMAP_JSON).is_file() || candidate.join(KEYMAP_C).is_file();
        is_keymap.then_some(candidate)
    })
}

/// Returns the override layer a keymap applies to its keyboard's info record.
///
/// # Arguments
///
/// * `qmk_path` - Path to QMK firmware root directory
/// * `keyboard` - Keyboard name (e.g., "crkbd/rev1")
/// * `keymap` - Optional keymap name
///
/// # Returns
///
/// The keymap's `config` object, or an empty object when there is nothing to apply
pub fn get_keyboard_overrides(
    qmk_path: &Path,
    keyboard: &str,
    keymap: Option<&str>,
) -> Result<Value> {
    let empty = Value::Object(Map::new());

    let Some(keymap) = keymap.filter(|k| !k.is_empty()) else {
        return Ok(empty);
    };

    let Some(keymap_dir) = find_keymap_dir(qmk_path, keyboard, keymap) else {
        debug!("No keymap folder for {}:{}", keyboard, keymap);
        return Ok(empty);
    };

    let keymap_json = keymap_dir.join(KEYMAP_JSON);
    if !keymap_json.is_file() {
        debug!("No {} in {}", KEYMAP_JSON, keymap_dir.display());
        return Ok(empty);
    }

    let data = read_json_object(&keymap_json)?;
    match data.get("config") {
        None => Ok(empty),
        Some(config @ Value::Object(_)) => {
            debug!("Applying keymap overrides from {}", keymap_json.display());
            Ok(config.clone())
        }
        Some(_) => anyhow::bail!(
            "The \"config\" entry in {} must be an object",
            keymap_json.display()
        ),
    }
}
