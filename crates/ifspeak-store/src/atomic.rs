//! Atomic file replacement
//!
//! Writes land in a sibling temp file which is then renamed over the target,
//! so readers see either the old or the new contents.

use crate::errors::{io_error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Atomically replace `target_path` with `content`, creating parent
/// directories as needed
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error("create_config_dir", parent, e))?;
    }

    let temp_path = temp_sibling(target_path);
    if let Err(e) = fs::write(&temp_path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_error("write_config_temp", &temp_path, e));
    }

    fs::rename(&temp_path, target_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        io_error("rename_config_temp", target_path, e)
    })
}

// `ifspeak.toml` -> `ifspeak.toml.tmp`; the extension is kept.
fn temp_sibling(target_path: &Path) -> PathBuf {
    let mut name = target_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    target_path.with_file_name(name)
}
