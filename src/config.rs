use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date_util::parse_timestamp;
use crate::error::{Error, Result};

const DEFAULT_AGENT_NAME: &str = "Agent";
const DEFAULT_AGENT_EMOJI: &str = "🤖";
const DEFAULT_OWNER_USERNAME: &str = "owner";

/// Branding for the agent whose profile is shown.
///
/// Only `birth_date` feeds any computation (uptime). The remaining fields
/// are carried for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    pub agent_name: String,
    pub agent_emoji: String,
    pub owner_username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_location: Option<String>,
    /// Origin timestamp literal. See [`parse_timestamp`] for accepted forms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            agent_name: DEFAULT_AGENT_NAME.into(),
            agent_emoji: DEFAULT_AGENT_EMOJI.into(),
            owner_username: DEFAULT_OWNER_USERNAME.into(),
            agent_description: None,
            agent_avatar: None,
            agent_location: None,
            birth_date: None,
        }
    }
}

impl Branding {
    /// Load branding from `path` if given, else from
    /// `~/.agentprofile/branding.json` if it exists, else from the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        if let Some(path) = default_path().filter(|p| p.exists()) {
            log::debug!("Loading branding from {}", path.display());
            return Self::from_file(&path);
        }
        Self::from_env()
    }

    /// Read a JSON branding file and validate it.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        let branding: Branding = serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("invalid branding file {}: {e}", path.display())))?;
        branding.normalized().validated()
    }

    /// Build branding from `AGENT_*`, `OWNER_USERNAME` and `BIRTH_DATE`
    /// environment variables and validate it.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok()).validated()
    }

    /// Build branding from an arbitrary variable lookup. Empty values count
    /// as unset. Does not validate.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            agent_name: get("AGENT_NAME").unwrap_or(defaults.agent_name),
            agent_emoji: get("AGENT_EMOJI").unwrap_or(defaults.agent_emoji),
            owner_username: get("OWNER_USERNAME").unwrap_or(defaults.owner_username),
            agent_description: get("AGENT_DESCRIPTION"),
            agent_avatar: get("AGENT_AVATAR"),
            agent_location: get("AGENT_LOCATION"),
            birth_date: get("BIRTH_DATE"),
        }
    }

    /// Check everything that can be checked once at startup. Currently that
    /// is only the origin timestamp.
    pub fn validate(&self) -> Result<()> {
        self.origin().map(|_| ())
    }

    fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    fn normalized(mut self) -> Self {
        for field in [
            &mut self.agent_description,
            &mut self.agent_avatar,
            &mut self.agent_location,
            &mut self.birth_date,
        ] {
            if field.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *field = None;
            }
        }
        self
    }

    /// The configured origin timestamp. `Ok(None)` when no birth date is
    /// set; an error when one is set but cannot be parsed.
    pub fn origin(&self) -> Result<Option<DateTime<Utc>>> {
        match self.birth_date.as_deref() {
            None => Ok(None),
            Some(raw) => parse_timestamp(raw)
                .map(Some)
                .ok_or_else(|| Error::Config(format!("unparsable birthDate: {raw:?}"))),
        }
    }

    /// Description, falling back to a generic line naming the owner.
    pub fn description(&self) -> String {
        match &self.agent_description {
            Some(desc) => desc.clone(),
            None => format!(
                "AI assistant for {}. Powered by OpenClaw.",
                self.owner_username
            ),
        }
    }
}

/// `~/.agentprofile/branding.json`, if a home directory is known.
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".agentprofile").join("branding.json"))
}
