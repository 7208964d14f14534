//! qmkgen Library
//!
//! This library provides build-time code generators for QMK firmware,
//! including keyboard discovery, merged info.json records with keymap
//! overrides, and the LUFA bootloader `Keyboard.h` generator.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod firmware;
pub mod parser;
