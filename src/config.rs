use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub base_url: String,
    /// HS256 secret used to verify access tokens; claims are read unverified when absent
    #[serde(default)]
    pub jwt_secret: Option<String>,
    /// Where exported CSV reports are written (defaults to the download dir)
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
    #[serde(default)]
    pub vim_mode: bool,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).context("Failed to parse config file")
    }

    /// Directory for exported reports, falling back to downloads, then the cwd
    pub fn resolved_export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Determine the config file path with fallback logic
///
/// 1. `--config <path>` (must exist)
/// 2. `<config_dir>/sentui/config.yaml`
/// 3. `./config.yaml`
pub fn resolve_config_path(cli_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = cli_path {
        let p = PathBuf::from(path);
        if p.exists() {
            return Ok(p);
        }
        anyhow::bail!("Config file not found at specified path: {}", path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("sentui").join("config.yaml");
        if config_path.exists() {
            return Ok(config_path);
        }
    }

    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(local_config);
    }

    let expected_path = dirs::config_dir()
        .map(|dir| dir.join("sentui").join("config.yaml").display().to_string())
        .unwrap_or_else(|| "~/.config/sentui/config.yaml".to_string());

    anyhow::bail!(
        "Config file not found. Expected locations:\n\
         1. {} (preferred)\n\
         2. ./config.yaml (fallback)\n\
         \n\
         Use --config <path> to specify a custom location.",
        expected_path
    )
}
