use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_repository() -> String {
    "asgardcms/platform".to_string()
}

fn default_archive_url_field() -> String {
    "zipball_url".to_string()
}

fn default_resolve_timeout_secs() -> u64 {
    2
}

/// Global configuration loaded from `~/.config/forge/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgeConfig {
    /// Base URL of the hosting API used for the latest-release lookup.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// `owner/name` identifier of the platform template repository.
    #[serde(default = "default_repository")]
    pub repository: String,
    /// JSON field of the release body that names the downloadable archive.
    #[serde(default = "default_archive_url_field")]
    pub archive_url_field: String,
    /// Timeout in seconds for the latest-release lookup.
    #[serde(default = "default_resolve_timeout_secs")]
    pub resolve_timeout_secs: u64,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            repository: default_repository(),
            archive_url_field: default_archive_url_field(),
            resolve_timeout_secs: default_resolve_timeout_secs(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("forge")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ForgeConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ForgeConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ForgeConfig = toml::from_str(&data)?;
    Ok(cfg)
}
