//! QMK keyboard discovery and info record assembly.
//!
//! This module answers "is this a keyboard?" for a QMK tree and builds the
//! merged info record for a keyboard by layering every `info.json` and
//! `keyboard.json` from the top-level vendor folder down to the keyboard
//! folder itself.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::constants::{INFO_JSON, KEYBOARDS_DIR, KEYBOARD_JSON, KEYMAPS_DIR, RULES_MK};

/// Returns the folder of a keyboard inside the QMK tree.
pub fn keyboard_folder(qmk_path: &Path, keyboard: &str) -> PathBuf {
    qmk_path.join(KEYBOARDS_DIR).join(keyboard)
}

/// Checks that a keyboard name is a plain relative path below keyboards/.
fn is_relative_keyboard_name(keyboard: &str) -> bool {
    !keyboard.is_empty()
        && Path::new(keyboard)
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}

/// Returns true if `keyboard` names a buildable keyboard in the QMK tree.
///
/// A keyboard folder carries either a `rules.mk` or a `keyboard.json`.
/// Absolute paths and paths escaping keyboards/ are never keyboards.
pub fn is_keyboard(qmk_path: &Path, keyboard: &str) -> bool {
    if !is_relative_keyboard_name(keyboard) {
        return false;
    }

    let folder = keyboard_folder(qmk_path, keyboard);
    folder.join(RULES_MK).is_file() || folder.join(KEYBOARD_JSON).is_file()
}

/// Scans the QMK keyboards directory and returns a list of available keyboards.
///
/// # Arguments
///
/// * `qmk_path` - Path to QMK firmware root directory
///
/// # Returns
///
/// A sorted vector of keyboard names (relative paths from keyboards/ directory)
pub fn scan_keyboards(qmk_path: &Path) -> Result<Vec<String>> {
    let keyboards_dir = qmk_path.join(KEYBOARDS_DIR);

    if !keyboards_dir.is_dir() {
        anyhow::bail!(
            "QMK keyboards directory not found: {}",
            keyboards_dir.display()
        );
    }

    let mut keyboards = Vec::new();
    scan_keyboards_recursive(qmk_path, &keyboards_dir, "", &mut keyboards)?;

    // Sort alphabetically for consistent ordering
    keyboards.sort();

    Ok(keyboards)
}

/// Recursively scans keyboard directories looking for keyboard markers.
fn scan_keyboards_recursive(
    qmk_path: &Path,
    dir: &Path,
    prefix: &str,
    keyboards: &mut Vec<String>,
) -> Result<()> {
    let entries =
        fs::read_dir(dir).context(format!("Failed to read directory: {}", dir.display()))?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name();
        let name_str = name.to_string_lossy();

        // Skip hidden directories and keymap folders
        if name_str.starts_with('.') || name_str == KEYMAPS_DIR {
            continue;
        }

        if path.is_dir() {
            let keyboard_name = if prefix.is_empty() {
                name_str.to_string()
            } else {
                format!("{}/{}", prefix, name_str)
            };

            if is_keyboard(qmk_path, &keyboard_name) {
                keyboards.push(keyboard_name.clone());
            }

            scan_keyboards_recursive(qmk_path, &path, &keyboard_name, keyboards)?;
        }
    }

    Ok(())
}

/// Reads a JSON data file whose top level must be an object.
pub fn read_json_object(path: &Path) -> Result<Map<String, Value>> {
    let content = fs::read_to_string(path)
        .context(format!("Failed to read {}", path.display()))?;

    let value: Value = serde_json::from_str(&content)
        .context(format!("Failed to parse {}", path.display()))?;

    match value {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!(
            "Expected a JSON object at the top of {}, found {}",
            path.display(),
            json_type_name(&other)
        ),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Recursively merges `overlay` into `base`.
///
/// Objects merge key by key; any other overlay value replaces the base value.
pub fn deep_update(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let nested = overlay_value.is_object()
                    && base_map.get(key).is_some_and(Value::is_object);

                if nested {
                    if let Some(base_value) = base_map.get_mut(key) {
                        deep_update(base_value, overlay_value);
                    }
                } else {
                    base_map.insert(key.clone(), overlay_value.clone());
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}

/// Lists the data files contributing to a keyboard's info record, outermost first.
///
/// For `vendor/board/rev1` this yields, where present:
/// `vendor/info.json`, `vendor/keyboard.json`, `vendor/board/info.json`, ...
pub fn info_json_layers(qmk_path: &Path, keyboard: &str) -> Vec<PathBuf> {
    let mut layers = Vec::new();
    let mut folder = qmk_path.join(KEYBOARDS_DIR);

    for segment in keyboard.split('/').filter(|s| !s.is_empty()) {
        folder.push(segment);
        for file_name in [INFO_JSON, KEYBOARD_JSON] {
            let candidate = folder.join(file_name);
            if candidate.is_file() {
                layers.push(candidate);
            }
        }
    }

    layers
}

/// Builds the merged info record for a keyboard.
///
/// # Arguments
///
/// * `qmk_path` - Path to QMK firmware root directory
/// * `keyboard` - Keyboard name (e.g., "crkbd/rev1")
/// * `overrides` - Override layer applied after all keyboard files (e.g., keymap config)
///
/// # Returns
///
/// The merged record, with `keyboard_folder` set to the keyboard name
pub fn info_json(qmk_path: &Path, keyboard: &str, overrides: &Value) -> Result<Value> {
    if !is_relative_keyboard_name(keyboard) {
        anyhow::bail!("Invalid keyboard name: \"{}\"", keyboard);
    }

    let mut record = Value::Object(Map::new());

    for layer in info_json_layers(qmk_path, keyboard) {
        debug!("Merging {}", layer.display());
        let data = read_json_object(&layer)?;
        deep_update(&mut record, &Value::Object(data));
    }

    if !overrides.is_null() {
        deep_update(&mut record, overrides);
    }

    if let Value::Object(map) = &mut record {
        map.insert(
            "keyboard_folder".to_string(),
            Value::String(keyboard.to_string()),
        );
    }

    Ok(record)
}
