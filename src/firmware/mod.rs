//! Firmware source generation.
//!
//! This module renders generated C sources consumed by the QMK build and
//! writes them into place.

pub mod dfu_header;
pub mod output;

// Re-export firmware types
pub use dfu_header::DfuHeaderGenerator;
pub use output::write_with_backup;
