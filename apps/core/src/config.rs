use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::discovery::{default_system_root, default_user_root, ExtensionRoots};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// When true only the enabled-extensions list feeds discovery; the
    /// disabled list is appended otherwise. Read at rebuild time.
    pub only_enabled: bool,
    pub max_results: u16,
    pub user_root: PathBuf,
    pub system_root: PathBuf,
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            only_enabled: true,
            max_results: 10,
            user_root: default_user_root(),
            system_root: default_system_root(),
            config_path: stable_app_data_dir().join("config.toml"),
        }
    }
}

impl Config {
    pub fn roots(&self) -> ExtensionRoots {
        ExtensionRoots::new(self.user_root.clone(), self.system_root.clone())
    }
}

pub fn stable_app_data_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".local/share/shellprefs"),
        None => std::env::temp_dir().join("shellprefs"),
    }
}

pub fn validate(cfg: &Config) -> Result<(), String> {
    if cfg.max_results < 1 || cfg.max_results > 50 {
        return Err("max_results out of range".into());
    }

    if cfg.user_root.as_os_str().is_empty() {
        return Err("user_root is required".into());
    }

    if cfg.system_root.as_os_str().is_empty() {
        return Err("system_root is required".into());
    }

    Ok(())
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::Parse(error) => write!(f, "parse error: {error}"),
            Self::Invalid(error) => write!(f, "invalid config: {error}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// On-disk shape: every field optional so a partial file overlays the
/// defaults.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    only_enabled: Option<bool>,
    max_results: Option<u16>,
    user_root: Option<PathBuf>,
    system_root: Option<PathBuf>,
}

pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = Config::default();
    if let Some(path) = path {
        config.config_path = path.to_path_buf();
    }

    let raw = match std::fs::read_to_string(&config.config_path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            validate(&config).map_err(ConfigError::Invalid)?;
            return Ok(config);
        }
        Err(error) => return Err(ConfigError::Io(error)),
    };

    let file: ConfigFile = toml::from_str(&raw).map_err(|error| ConfigError::Parse(error.to_string()))?;
    if let Some(only_enabled) = file.only_enabled {
        config.only_enabled = only_enabled;
    }
    if let Some(max_results) = file.max_results {
        config.max_results = max_results;
    }
    if let Some(user_root) = file.user_root {
        config.user_root = user_root;
    }
    if let Some(system_root) = file.system_root {
        config.system_root = system_root;
    }

    validate(&config).map_err(ConfigError::Invalid)?;
    Ok(config)
}

pub fn save(config: &Config) -> Result<(), ConfigError> {
    validate(config).map_err(ConfigError::Invalid)?;

    let file = ConfigFile {
        only_enabled: Some(config.only_enabled),
        max_results: Some(config.max_results),
        user_root: Some(config.user_root.clone()),
        system_root: Some(config.system_root.clone()),
    };
    let raw = toml::to_string_pretty(&file).map_err(|error| ConfigError::Parse(error.to_string()))?;

    if let Some(parent) = config.config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&config.config_path, raw)?;
    Ok(())
}
