//! Parsing of QMK data files.
//!
//! This module discovers keyboards in a QMK tree, assembles their merged
//! info records, applies keymap overrides and provides dotted-path access
//! into the resulting JSON.

pub mod dotted;
pub mod keyboard_json;
pub mod keymap_json;

// Re-export commonly used functions
pub use dotted::{has_dotted, lookup_dotted};
pub use keyboard_json::{info_json, is_keyboard, scan_keyboards};
pub use keymap_json::get_keyboard_overrides;
