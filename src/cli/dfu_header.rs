//! `generate-dfu-header` command: LUFA `Keyboard.h` for the QMK DFU bootloader.
//!
//! Used by the make system. The header is printed to stdout unless `--output`
//! is given, in which case any existing file is kept as `<name>.bak`.

use crate::cli::common::{error_chain, CliError, CliResult};
use crate::config::Config;
use crate::constants::{KEYBOARDS_DIR, KEYMAPS_DIR};
use crate::firmware::{write_with_backup, DfuHeaderGenerator};
use crate::parser::{get_keyboard_overrides, info_json, is_keyboard};
use clap::Args;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Generate the LUFA Keyboard.h used when building the QMK DFU bootloader
#[derive(Debug, Clone, Args)]
pub struct GenerateDfuHeaderArgs {
    /// Keyboard to generate LUFA Keyboard.h for
    #[arg(short, long, visible_alias = "kb", value_name = "NAME")]
    pub keyboard: Option<String>,

    /// Keymap whose config overrides apply
    #[arg(short = 'm', long, visible_alias = "km", value_name = "NAME")]
    pub keymap: Option<String>,

    /// File to write to (prints to stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Quiet mode, only output error messages
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to QMK firmware repository (defaults to QMK_HOME, then config, then cwd)
    #[arg(long, value_name = "PATH")]
    pub qmk_path: Option<PathBuf>,
}

/// Fully resolved inputs for one header generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfuHeaderRequest {
    /// QMK firmware root
    pub qmk_path: PathBuf,
    /// Keyboard identifier, if one could be determined
    pub keyboard: Option<String>,
    /// Keymap identifier
    pub keymap: Option<String>,
    /// Destination file; `None` means stdout
    pub output: Option<PathBuf>,
    /// Suppress the success message
    pub quiet: bool,
}

impl GenerateDfuHeaderArgs {
    /// Execute the generate-dfu-header command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load().unwrap_or_else(|e| {
            warn!("Ignoring unreadable configuration: {}", error_chain(&e));
            Config::default()
        });
        let cwd = std::env::current_dir()
            .map_err(|e| CliError::io(format!("Failed to determine current directory: {e}")))?;

        let request = self.resolve(&config, &cwd)?;
        let header = generate_dfu_header(&request)?;

        if request.output.is_none() {
            println!("{header}");
        }

        Ok(())
    }

    /// Resolves the QMK root and the keyboard/keymap identifiers.
    ///
    /// Flags win, then the working directory (inside keyboards/), then the
    /// `[user]` section of the configuration file.
    pub fn resolve(&self, config: &Config, cwd: &Path) -> CliResult<DfuHeaderRequest> {
        let qmk_path = config
            .resolve_qmk_home(self.qmk_path.as_deref())
            .map_err(|e| CliError::io(error_chain(&e)))?;

        let from_directory = keyboard_from_directory(&qmk_path, cwd);
        if let Some((keyboard, keymap)) = &from_directory {
            debug!("Working directory names keyboard {keyboard} (keymap {keymap:?})");
        }

        let keyboard = self
            .keyboard
            .clone()
            .or_else(|| from_directory.as_ref().map(|(kb, _)| kb.clone()))
            .or_else(|| config.user.keyboard.clone());

        let keymap = self
            .keymap
            .clone()
            .or_else(|| from_directory.as_ref().and_then(|(_, km)| km.clone()))
            .or_else(|| config.user.keymap.clone());

        Ok(DfuHeaderRequest {
            qmk_path,
            keyboard,
            keymap,
            output: self.output.clone(),
            quiet: self.quiet,
        })
    }
}

/// Generates the bootloader header for a resolved request.
///
/// Returns the header text. When the request names an output file the text
/// is also written there, rotating any existing file to `<name>.bak`.
pub fn generate_dfu_header(request: &DfuHeaderRequest) -> CliResult<String> {
    let keyboard = request
        .keyboard
        .as_deref()
        .filter(|kb| !kb.is_empty())
        .ok_or_else(|| CliError::validation("Missing parameter: --keyboard"))?;

    if !is_keyboard(&request.qmk_path, keyboard) {
        return Err(CliError::validation(format!(
            "Invalid keyboard: \"{keyboard}\""
        )));
    }

    let keymap = request.keymap.as_deref();
    let overrides = get_keyboard_overrides(&request.qmk_path, keyboard, keymap)
        .map_err(|e| CliError::io(error_chain(&e)))?;
    let info = info_json(&request.qmk_path, keyboard, &overrides)
        .map_err(|e| CliError::io(error_chain(&e)))?;

    let header = DfuHeaderGenerator::new(keyboard, &info)
        .generate()
        .map_err(|e| CliError::io(error_chain(&e)))?;

    if let Some(output) = &request.output {
        write_with_backup(output, &header).map_err(|e| CliError::io(error_chain(&e)))?;

        if !request.quiet {
            info!("Wrote Keyboard.h to {}.", output.display());
        }
    }

    Ok(header)
}

/// Derives keyboard and keymap from a directory inside `<qmk>/keyboards/`.
///
/// `keyboards/vendor/board/rev1/keymaps/mine/src` yields
/// `("vendor/board/rev1", Some("mine"))`. Without a `keymaps` segment the
/// deepest keyboard folder containing `dir` is used.
pub fn keyboard_from_directory(qmk_path: &Path, dir: &Path) -> Option<(String, Option<String>)> {
    let keyboards_dir = canonical_or_same(&qmk_path.join(KEYBOARDS_DIR));
    let dir = canonical_or_same(dir);

    let relative = dir.strip_prefix(&keyboards_dir).ok()?;
    let segments: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let (keyboard_segments, keymap) = match segments.iter().position(|s| s == KEYMAPS_DIR) {
        Some(index) => (&segments[..index], segments.get(index + 1).cloned()),
        None => (&segments[..], None),
    };

    (1..=keyboard_segments.len()).rev().find_map(|depth| {
        let keyboard = keyboard_segments[..depth].join("/");
        is_keyboard(qmk_path, &keyboard).then(|| (keyboard, keymap.clone()))
    })
}

fn canonical_or_same(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
