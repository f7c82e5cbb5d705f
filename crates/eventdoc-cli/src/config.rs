//! Configuration management for the CLI
//!
//! Configuration comes from `~/.eventdoc/config.yaml`, overridable field
//! by field through `EVENTDOC_*` environment variables. On first run a
//! template file is written so the user can fill in their credentials.
//!
//! Copyright (c) 2025 Eventdoc Team
//! Licensed under the Apache-2.0 license

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use eventdoc_confluence::Auth;

use crate::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub confluence: ConfluenceConfig,
}

/// Confluence connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfluenceConfig {
    /// Base URL of the Confluence instance
    pub host: String,

    /// Atlassian account email, paired with `api_key`
    pub email: String,

    /// Atlassian API token
    pub api_key: String,

    /// Pre-built `Authorization` header value; takes precedence over
    /// email plus API token when set
    pub basic_auth: String,
}

impl Default for ConfluenceConfig {
    fn default() -> Self {
        Self {
            host: "https://<your-domain>.atlassian.net".to_string(),
            email: "your@email.com".to_string(),
            api_key: "YOUR_API_KEY".to_string(),
            basic_auth: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from a specific file or the default location
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::load()?,
        };

        config.merge_with_env();
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("can't read config file '{}': {e}", path.display()))
        })?;

        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load from `~/.eventdoc/config.yaml`, writing a template on first
    /// run so the user has something to edit
    fn load() -> Result<Self> {
        if std::env::var("EVENTDOC_NO_CONFIG_FILE").as_deref() == Ok("1") {
            return Ok(Self::default());
        }

        let path = Self::default_config_path()?;
        if path.exists() {
            return Self::from_file(&path);
        }

        let config = Self::default();
        config.save(&path)?;

        Err(Error::config(format!(
            "please, update your config file: {}",
            path.display()
        )))
    }

    fn default_config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::config("can't determine the user home directory"))?;

        Ok(home.join(".eventdoc").join("config.yaml"))
    }

    /// Apply `EVENTDOC_CONFLUENCE_*` environment overrides
    fn merge_with_env(&mut self) {
        if let Ok(host) = std::env::var("EVENTDOC_CONFLUENCE_HOST") {
            self.confluence.host = host;
        }
        if let Ok(email) = std::env::var("EVENTDOC_CONFLUENCE_EMAIL") {
            self.confluence.email = email;
        }
        if let Ok(api_key) = std::env::var("EVENTDOC_CONFLUENCE_API_KEY") {
            self.confluence.api_key = api_key;
        }
        if let Ok(basic_auth) = std::env::var("EVENTDOC_CONFLUENCE_BASIC_AUTH") {
            self.confluence.basic_auth = basic_auth;
        }
    }

    fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Credentials for the Confluence client
    pub fn auth(&self) -> Auth {
        if !self.confluence.basic_auth.is_empty() {
            Auth::Header(self.confluence.basic_auth.clone())
        } else {
            Auth::Basic {
                email: self.confluence.email.clone(),
                api_key: self.confluence.api_key.clone(),
            }
        }
    }
}
