//! Report export helpers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// File name for an exported version, e.g. `tonality-report-05.03.2025-14-07.csv`
///
/// Characters that are unsafe in file names become `-`; runs of them collapse.
pub fn export_file_name(version_label: &str) -> String {
    let mut sanitized = String::with_capacity(version_label.len());
    let mut last_dash = false;

    for ch in version_label.trim().chars() {
        let safe = ch.is_alphanumeric() || ch == '.' || ch == '_';
        if safe {
            sanitized.push(ch);
            last_dash = false;
        } else if !last_dash {
            sanitized.push('-');
            last_dash = true;
        }
    }

    let sanitized = sanitized.trim_matches('-');
    let label = if sanitized.is_empty() { "report" } else { sanitized };
    format!("tonality-report-{}.csv", label)
}

/// Write the downloaded CSV into `dir`, creating it if needed
pub fn write_export(dir: &Path, version_label: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let path = dir.join(export_file_name(version_label));
    std::fs::write(&path, bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}
