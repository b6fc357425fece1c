use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::transport::Service;

pub const AUTH_URL_ENV: &str = "CLOUDBOX_AUTH_URL";
pub const FILE_URL_ENV: &str = "CLOUDBOX_FILE_URL";

const DEFAULT_AUTH_URL: &str = "http://localhost:8082";
const DEFAULT_FILE_URL: &str = "http://localhost:8081";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Base addresses of the two backend services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub auth_url: String,
    pub file_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            file_url: DEFAULT_FILE_URL.to_string(),
        }
    }
}

impl Endpoints {
    pub fn new(auth_url: &str, file_url: &str) -> Self {
        Self {
            auth_url: auth_url.trim_end_matches('/').to_string(),
            file_url: file_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self, service: Service) -> &str {
        match service {
            Service::Identity => self.auth_url.trim_end_matches('/'),
            Service::Files => self.file_url.trim_end_matches('/'),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoints: Endpoints,
}

impl Config {
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "cloudbox", "cloudbox")
    }

    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let proj_dirs = Self::project_dirs().ok_or(ConfigError::NoConfigDir)?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Load the config file (if any), then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_overrides(
            std::env::var(AUTH_URL_ENV).ok(),
            std::env::var(FILE_URL_ENV).ok(),
        );
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn apply_overrides(&mut self, auth_url: Option<String>, file_url: Option<String>) {
        if let Some(url) = auth_url.filter(|u| !u.trim().is_empty()) {
            self.endpoints.auth_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = file_url.filter(|u| !u.trim().is_empty()) {
            self.endpoints.file_url = url.trim_end_matches('/').to_string();
        }
    }
}
