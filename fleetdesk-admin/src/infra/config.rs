use std::path::{Path, PathBuf};

use fleetdesk_model::Role;
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::messages::Route;

const APP_DIR: &str = "fleetdesk";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid role: {value}")]
    InvalidRole { var: &'static str, value: String },

    #[error("failed to write config")]
    Io(#[from] std::io::Error),

    #[error("failed to encode config")]
    Encode(#[from] serde_json::Error),
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the hosted data service.
    pub service_url: String,
    /// Public API key sent with every request.
    pub api_key: String,
    /// Access token of the signed-in operator, if any.
    pub access_token: Option<String>,
    /// Origin of the web app; sign-up confirmations redirect to its login.
    pub app_origin: String,
    /// Role of the signed-in operator. Only admins may use the screen.
    pub role: Role,
    /// Use the in-memory service instead of the hosted one.
    pub demo: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("service_url", &self.service_url)
            .field("has_api_key", &!self.api_key.is_empty())
            .field("has_access_token", &self.access_token.is_some())
            .field("app_origin", &self.app_origin)
            .field("role", &self.role)
            .field("demo", &self.demo)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:54321".to_string(),
            api_key: String::new(),
            access_token: None,
            app_origin: "http://localhost:5173".to_string(),
            role: Role::User,
            demo: false,
        }
    }
}

impl Config {
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Defaults, then the config file, then `FLEETDESK_*` environment
    /// variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::path()
            .and_then(|path| Self::load_from(&path))
            .unwrap_or_default();

        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Read a config file. Missing or malformed files yield `None`.
    pub fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_json(&content),
            Err(err) => {
                warn!("Failed to read {}: {}", path.display(), err);
                None
            }
        }
    }

    fn from_json(content: &str) -> Option<Self> {
        serde_json::from_str(content)
            .inspect_err(|err| warn!("Ignoring malformed config file: {}", err))
            .ok()
    }

    /// Apply overrides from a variable lookup.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = lookup("FLEETDESK_SERVICE_URL") {
            self.service_url = url;
        }
        if let Some(key) = lookup("FLEETDESK_API_KEY") {
            self.api_key = key;
        }
        if let Some(token) = lookup("FLEETDESK_ACCESS_TOKEN") {
            self.access_token = Some(token).filter(|t| !t.is_empty());
        }
        if let Some(origin) = lookup("FLEETDESK_APP_ORIGIN") {
            self.app_origin = origin;
        }
        if let Some(role) = lookup("FLEETDESK_ROLE") {
            self.role = role.parse().map_err(|_| ConfigError::InvalidRole {
                var: "FLEETDESK_ROLE",
                value: role,
            })?;
        }
        if let Some(demo) = lookup("FLEETDESK_DEMO") {
            self.demo = matches!(demo.as_str(), "1" | "true" | "yes");
        }
        Ok(())
    }

    /// Where sign-up confirmation links send new users.
    pub fn redirect_target(&self) -> String {
        format!(
            "{}{}",
            self.app_origin.trim_end_matches('/'),
            Route::Login.path()
        )
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        match Self::path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    /// Write the config to `path`, creating its directory.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
