//! Upload Form Model
//!
//! State of the CSV picker shared by the import and metrics dialogs.
//! The path is typed by the user; `choose` resolves it to file metadata.

use std::path::{Path, PathBuf};

use crate::model::types::SelectedFile;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadForm {
    /// Path as typed in the dialog
    pub input: String,
    pub file: Option<SelectedFile>,
    pub error: Option<String>,
    pub is_submitting: bool,
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Expand a leading `~/` to the home directory
fn expand_home(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(input)
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.error = None;
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
        self.error = None;
    }

    /// Resolve the typed path to a CSV file; sets `error` on failure
    pub fn choose(&mut self) -> bool {
        let raw = self.input.trim();
        if raw.is_empty() {
            self.file = None;
            self.error = Some("Choose a CSV file".to_string());
            return false;
        }

        let path = expand_home(raw);
        if !is_csv(&path) {
            self.file = None;
            self.error = Some("Only .csv files are supported".to_string());
            return false;
        }

        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| raw.to_string());
                self.file = Some(SelectedFile {
                    path,
                    name,
                    size: meta.len(),
                });
                self.error = None;
                true
            }
            _ => {
                self.file = None;
                self.error = Some(format!("File not found: {}", raw));
                false
            }
        }
    }

    pub fn can_submit(&self) -> bool {
        self.file.is_some() && !self.is_submitting
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
