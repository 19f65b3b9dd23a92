use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AppError;
use crate::os_release::DEFAULT_OS_RELEASE_PATHS;

pub const ENV_CONFIG: &str = "SUPPORT_END_NOTIFIER_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// os-release files to try, first readable one wins
    #[serde(default = "default_os_release_paths")]
    pub os_release_paths: Vec<PathBuf>,
    /// Program (and arguments) started when the user clicks "Start upgrade"
    #[serde(default = "default_upgrade_command")]
    pub upgrade_command: Vec<String>,
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

fn default_os_release_paths() -> Vec<PathBuf> {
    DEFAULT_OS_RELEASE_PATHS.iter().map(PathBuf::from).collect()
}

fn default_upgrade_command() -> Vec<String> {
    vec!["gnome-software".to_string()]
}

fn default_app_name() -> String {
    "support-end".to_string()
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            os_release_paths: default_os_release_paths(),
            upgrade_command: default_upgrade_command(),
            app_name: default_app_name(),
        }
    }
}

/// Explicitly requested config file, if any: `--config` first, then the environment.
pub fn explicit_config_path(cli_value: Option<PathBuf>) -> Option<PathBuf> {
    cli_value.or_else(|| std::env::var_os(ENV_CONFIG).map(PathBuf::from))
}

pub fn default_config_path() -> Option<PathBuf> {
    let pd = ProjectDirs::from("", "", "support-end-notifier")?;
    Some(pd.config_dir().join("config.yaml"))
}

/// An explicit path must load; a missing default file just means defaults.
pub fn find_and_load(cli_value: Option<PathBuf>) -> Result<NotifierConfig, AppError> {
    if let Some(path) = explicit_config_path(cli_value) {
        return load_config(&path);
    }
    match default_config_path() {
        Some(path) if path.exists() => load_config(&path),
        _ => {
            debug!("no config file; using defaults");
            Ok(NotifierConfig::default())
        }
    }
}

pub fn load_config(path: &Path) -> Result<NotifierConfig, AppError> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("read {} failed: {e}", path.display())))?;
    let cfg: NotifierConfig = serde_yaml::from_str(&data)
        .map_err(|e| AppError::Config(format!("parse {} failed: {e}", path.display())))?;
    debug!(path=%path.display(), "loaded config");
    Ok(cfg)
}
