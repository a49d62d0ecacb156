use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::version::DEFAULT_TARGET_VERSION;

/// Global configuration loaded from `~/.config/cfgdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CfgdlConfig {
    /// Base URL of the configuration console backend.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Optional API token sent as `Authorization: Token <token>`.
    #[serde(default)]
    pub api_token: Option<String>,
    /// Directory where project archives are saved (None = current directory).
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Request demo configurations instead of the user's own.
    #[serde(default)]
    pub demo_mode: bool,
    /// Version the generated project targets (None = built-in default).
    #[serde(default)]
    pub target_version: Option<String>,
    /// Post activity events to the backend; when false they are only logged.
    #[serde(default = "default_activities_enabled")]
    pub activities_enabled: bool,
    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_server_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_activities_enabled() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CfgdlConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            api_token: None,
            download_dir: None,
            demo_mode: false,
            target_version: None,
            activities_enabled: default_activities_enabled(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CfgdlConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn target_version_or_default(&self) -> &str {
        self.target_version
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(DEFAULT_TARGET_VERSION)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cfgdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CfgdlConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] but at an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<CfgdlConfig> {
    if !path.exists() {
        let default_cfg = CfgdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: CfgdlConfig = toml::from_str(&data)?;
    Ok(cfg)
}
