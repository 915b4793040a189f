pub mod delay;
pub mod diff;
pub mod normalize;
pub mod watch;

use std::path::Path;

/// Read a captured screen: one display row per line
pub fn read_screen(path: &Path) -> std::io::Result<Vec<String>> {
    Ok(std::fs::read_to_string(path)?
        .lines()
        .map(str::to_string)
        .collect())
}
