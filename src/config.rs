//! Settings for the client and the inbox controller.

use crate::client::{ClientBuilder, DEFAULT_BASE_URL, DEFAULT_PAGE_LIMIT};
use crate::clipboard::DEFAULT_FEEDBACK;
use crate::error::ConfigError;
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Domain selected before the catalog has loaded.
pub const DEFAULT_DOMAIN: &str = "barid.site";

const QUALIFIER: &str = "site";
const ORGANIZATION: &str = "barid";
const APPLICATION: &str = "barid-inbox";

/// Runtime settings. Every field has a default, so a partial TOML file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub default_domain: String,
    /// Messages requested per inbox sync.
    pub page_limit: u32,
    /// Per-request timeout; unset means no timeout.
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    pub proxy: Option<String>,
    /// How long the copy button shows its acknowledgment.
    pub copy_feedback_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_domain: DEFAULT_DOMAIN.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            timeout_secs: None,
            user_agent: None,
            proxy: None,
            copy_feedback_ms: DEFAULT_FEEDBACK.as_millis() as u64,
        }
    }
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read the file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loaded config");
        Self::from_toml(&content)
    }

    /// Read `path` when given, otherwise the platform config file if it exists.
    ///
    /// An explicit path must exist; the platform file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load_from(path);
        }
        match default_config_path() {
            Ok(path) if path.exists() => Self::load_from(&path),
            Ok(_) | Err(ConfigError::MissingDirectories) => Ok(Self::default()),
            Err(err) => Err(err),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }

    /// A [`ClientBuilder`] carrying the HTTP-related settings.
    pub fn client_builder(&self) -> ClientBuilder {
        let mut builder = ClientBuilder::new().base_url(self.base_url.clone());
        if let Some(timeout) = self.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if let Some(proxy) = &self.proxy {
            builder = builder.proxy(proxy.clone());
        }
        builder
    }
}

/// `config.toml` inside the platform config directory.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .ok_or(ConfigError::MissingDirectories)?;
    Ok(dirs.config_dir().join("config.toml"))
}
