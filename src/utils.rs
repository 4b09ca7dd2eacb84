/// Utility functions used throughout the application

use std::path::PathBuf;

/// Get platform-specific log file path
pub fn get_log_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("sentui.log");
    path
}

/// Get platform-specific cache fallback path
pub fn get_cache_fallback_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("sentui-cache");
    path
}

/// Format a file size the way the upload dialog shows it (e.g. "1.5 KB")
///
/// Always kilobytes with one decimal, even for large files.
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3072.0 KB");
    }
}
