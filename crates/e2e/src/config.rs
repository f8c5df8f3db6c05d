//! Suite configuration
//!
//! Defaults point at the public demo services. A TOML file may override
//! any subset of fields; the harness then applies flags and environment
//! variables on top.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use qaguru_common::User;

use crate::error::{E2eError, E2eResult};
use crate::playwright::PlaywrightConfig;

/// Top level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Airport Gap API
    pub airport: AirportConfig,

    /// RealWorld web application
    pub realworld: RealWorldConfig,

    /// Browser automation
    pub playwright: PlaywrightConfig,

    /// Output directory for results and failure screenshots
    pub output_dir: PathBuf,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            airport: AirportConfig::default(),
            realworld: RealWorldConfig::default(),
            playwright: PlaywrightConfig::default(),
            output_dir: PathBuf::from("test-results"),
        }
    }
}

/// Airport Gap API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AirportConfig {
    /// API root, without trailing slash
    pub base_url: String,

    /// Account used for `POST /tokens`
    pub email: Option<String>,
    pub password: Option<String>,

    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for AirportConfig {
    fn default() -> Self {
        Self {
            base_url: "https://airportgap.com/api".to_string(),
            email: None,
            password: None,
            request_timeout_ms: 30_000,
        }
    }
}

impl AirportConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Credentials for token issuance
    pub fn credentials(&self) -> E2eResult<(&str, &str)> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(E2eError::Config(
                "airport.email and airport.password are required for token issuance".to_string(),
            )),
        }
    }
}

/// RealWorld application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RealWorldConfig {
    /// Application root including the hash router prefix
    pub base_url: String,

    /// Pre-registered account. When absent, each scenario registers a
    /// generated user.
    pub account: Option<User>,
}

impl Default for RealWorldConfig {
    fn default() -> Self {
        Self {
            base_url: "https://realworld.qa.guru/#/".to_string(),
            account: None,
        }
    }
}

impl SuiteConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml(toml: &str) -> E2eResult<Self> {
        toml::from_str(toml).map_err(E2eError::from)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load `path` when given, defaults otherwise
    pub fn load(path: Option<&Path>) -> E2eResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
