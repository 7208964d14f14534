//! Writing generated files into a build tree.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Returns the backup location for `path` (`<name>.bak` next to it).
pub fn backup_path(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .context(format!("Output path has no file name: {}", path.display()))?;

    let mut backup_name = file_name.to_os_string();
    backup_name.push(".bak");

    Ok(path.with_file_name(backup_name))
}

/// Writes `content` to `path`, keeping the previous file as `<name>.bak`.
///
/// Parent directories are created as needed. An existing backup is replaced.
pub fn write_with_backup(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context(format!(
            "Failed to create output directory: {}",
            parent.display()
        ))?;
    }

    if path.exists() {
        let backup = backup_path(path)?;
        fs::rename(path, &backup).context(format!(
            "Failed to move {} to {}",
            path.display(),
            backup.display()
        ))?;
    }

    fs::write(path, content).context(format!("Failed to write {}", path.display()))?;

    Ok(())
}
