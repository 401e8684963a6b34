use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::policy::{ItemOwnershipPolicy, PolicyKind, UnknownPolicy};
use crate::user::{StaticUserDirectory, User, UNKNOWN_USER_ID};

pub const POLICY_ENV: &str = "OWNERSHIP_POLICY";
pub const UNKNOWN_USER_ENV: &str = "OWNERSHIP_UNKNOWN_USER";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} is invalid: {source}")]
    InvalidPolicy {
        var: &'static str,
        #[source]
        source: UnknownPolicy,
    },

    #[error("{var} must not be blank")]
    BlankUnknownUser { var: &'static str },

    #[error("JSON parsing failed: {message}")]
    JsonParsingFailed { message: String },

    #[error("IO error reading {path}: {message}")]
    IoError { path: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub policy: PolicyKind,
    #[serde(rename = "unknownUserId", default = "default_unknown_user")]
    pub unknown_user_id: String,
}

fn default_unknown_user() -> String {
    UNKNOWN_USER_ID.to_string()
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            unknown_user_id: default_unknown_user(),
        }
    }
}

/// Read configuration from `OWNERSHIP_POLICY` and `OWNERSHIP_UNKNOWN_USER`.
///
/// An unset or empty `OWNERSHIP_POLICY` selects the default policy. An unset
/// `OWNERSHIP_UNKNOWN_USER` keeps `unknown`; a set but blank one is an error.
pub fn load_from_env() -> Result<PolicyConfig, ConfigError> {
    let mut cfg = PolicyConfig::default();

    if let Some(raw) = non_empty_var(POLICY_ENV) {
        cfg.policy = raw.parse().map_err(|source| ConfigError::InvalidPolicy {
            var: POLICY_ENV,
            source,
        })?;
    }
    if let Ok(raw) = std::env::var(UNKNOWN_USER_ENV) {
        cfg = cfg.with_unknown_user_id(&raw, UNKNOWN_USER_ENV)?;
    }

    debug!(
        policy = %cfg.policy,
        unknown_user = %cfg.unknown_user_id,
        "loaded ownership config"
    );
    Ok(cfg)
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|s| !s.trim().is_empty())
}

impl PolicyConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: PolicyConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::JsonParsingFailed {
                message: e.to_string(),
            })?;
        let id = cfg.unknown_user_id.clone();
        cfg.with_unknown_user_id(&id, "unknownUserId")
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "loading ownership config file");
        Self::from_json(&raw)
    }

    /// Replace the sentinel id; `source` names the setting in the error.
    pub fn with_unknown_user_id(
        mut self,
        id: &str,
        source: &'static str,
    ) -> Result<Self, ConfigError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ConfigError::BlankUnknownUser { var: source });
        }
        self.unknown_user_id = id.to_string();
        Ok(self)
    }

    pub fn build_policy(&self) -> Box<dyn ItemOwnershipPolicy> {
        self.policy.build()
    }

    /// A request-scoped directory honouring the configured sentinel id.
    pub fn user_directory(&self, acting_user: Option<&str>) -> StaticUserDirectory {
        StaticUserDirectory::new(acting_user.map(User::new))
            .with_unknown_id(self.unknown_user_id.clone())
    }
}
