use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_LOG_TARGET: &str = "tableau_groups";

/// Connection settings for one Tableau site.
#[derive(Deserialize, Clone, Debug)]
pub struct TableauConf {
    pub server_url: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    pub site_id: String,
    pub token: String,
    /// Full API base URL. Takes precedence over the one built from
    /// `server_url`, `api_version` and `site_id`.
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default = "default_log_target")]
    pub log_target: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_version() -> String {
    "3.19".to_string()
}

fn default_log_target() -> String {
    DEFAULT_LOG_TARGET.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl TableauConf {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn api_url(&self) -> String {
        match &self.api_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!(
                "{}/api/{}/sites/{}",
                self.server_url.trim_end_matches('/'),
                self.api_version,
                self.site_id
            ),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
