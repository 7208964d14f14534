//! CLI command handlers for qmkgen.
//!
//! Each subcommand is a clap `Args` struct with an `execute` method returning
//! a [`CliResult`]; `main` turns errors into process exit codes.

pub mod common;
pub mod dfu_header;
pub mod qmk;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use dfu_header::{generate_dfu_header, DfuHeaderRequest, GenerateDfuHeaderArgs};
pub use qmk::ListKeyboardsArgs;
