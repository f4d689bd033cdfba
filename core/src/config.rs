//! Client configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::view::DEFAULT_LISTS_TITLE;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// What a session does after a successful create, delete or toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefreshPolicy {
    /// Re-fetch the affected collection and redraw its view.
    #[default]
    FullRefetch,
    /// Leave the view alone and return [`Outcome::Mutated`]; the caller
    /// reloads, usually with [`Intent::reload`].
    ///
    /// [`Outcome::Mutated`]: crate::session::Outcome::Mutated
    /// [`Intent::reload`]: crate::intent::Intent::reload
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub lists_title: String,
    pub refresh: RefreshPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            lists_title: DEFAULT_LISTS_TITLE.to_string(),
            refresh: RefreshPolicy::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid client config: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("base_url must not be empty")]
    EmptyBaseUrl,
}

impl ClientConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = serde_json::from_str(raw)?;
        if config.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_refresh(mut self, refresh: RefreshPolicy) -> Self {
        self.refresh = refresh;
        self
    }
}
