//! QMK metadata commands for keyboard discovery.
//!
//! `list-keyboards` backs keyboard-name completion for `--keyboard`. It reads
//! the QMK tree directly, so the QMK CLI does not need to be installed.

use crate::cli::common::{error_chain, CliError, CliResult};
use crate::config::Config;
use crate::constants::KEYBOARDS_DIR;
use crate::parser::scan_keyboards;
use clap::Args;
use regex::Regex;
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

/// List all buildable keyboards in a QMK firmware directory
#[derive(Debug, Clone, Args)]
pub struct ListKeyboardsArgs {
    /// Path to QMK firmware repository (defaults to QMK_HOME, then config, then cwd)
    #[arg(long, value_name = "PATH")]
    pub qmk_path: Option<PathBuf>,

    /// Optional regex filter for keyboard names
    #[arg(long, value_name = "REGEX")]
    pub filter: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON response for list-keyboards command
#[derive(Debug, Clone, Serialize)]
struct ListKeyboardsResponse {
    /// List of keyboard paths
    keyboards: Vec<String>,
    /// Total count
    count: usize,
}

impl ListKeyboardsArgs {
    /// Execute the list-keyboards command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load().unwrap_or_else(|e| {
            warn!("Ignoring unreadable configuration: {}", error_chain(&e));
            Config::default()
        });
        let qmk_path = config
            .resolve_qmk_home(self.qmk_path.as_deref())
            .map_err(|e| CliError::io(error_chain(&e)))?;

        // Validate QMK path
        if !qmk_path.exists() {
            return Err(CliError::io(format!(
                "QMK path does not exist: {}",
                qmk_path.display()
            )));
        }

        let keyboards_dir = qmk_path.join(KEYBOARDS_DIR);
        if !keyboards_dir.is_dir() {
            return Err(CliError::io(format!(
                "QMK keyboards directory not found: {}",
                keyboards_dir.display()
            )));
        }

        let keyboards = scan_keyboards(&qmk_path).map_err(|e| {
            CliError::io(format!(
                "Failed to scan keyboards directory: {}",
                error_chain(&e)
            ))
        })?;

        if keyboards.is_empty() {
            return Err(CliError::validation("No keyboards found in QMK directory"));
        }

        let keyboards = filter_keyboards(keyboards, self.filter.as_deref())?;

        // Output results
        if self.json {
            let response = ListKeyboardsResponse {
                count: keyboards.len(),
                keyboards,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            println!("Found {} keyboards:", keyboards.len());
            for kb in &keyboards {
                println!("  {kb}");
            }
        }

        Ok(())
    }
}

/// Applies an optional regex filter to keyboard names.
fn filter_keyboards(mut keyboards: Vec<String>, filter: Option<&str>) -> CliResult<Vec<String>> {
    let Some(filter_str) = filter else {
        return Ok(keyboards);
    };

    let regex = Regex::new(filter_str)
        .map_err(|e| CliError::validation(format!("Invalid regex pattern: {e}")))?;
    keyboards.retain(|kb| regex.is_match(kb));

    if keyboards.is_empty() {
        return Err(CliError::validation(format!(
            "No keyboards match filter: {}",
            filter_str
        )));
    }

    Ok(keyboards)
}
